//! Synchronous client for the monthly global temperature dataset.
//!
//! The dataset is a single JSON document:
//! `{"baseTemperature": f64, "monthlyVariance": [{"year", "month", "variance"}, ...]}`.
//!
//! ### Notes
//! - One GET per load. Failures are surfaced as errors, never retried.
//! - Network timeouts use a sane default (30s total, 10s connect).
//!
//! Typical usage:
//! ```no_run
//! # use temp_heatmap::Client;
//! let client = Client::default();
//! let dataset = client.fetch()?;
//! println!("{} samples", dataset.samples().len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::{Dataset, RawDataset};
use anyhow::{Context, Result, bail};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

#[derive(Debug, Clone)]
pub struct Client {
    pub url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_url(DEFAULT_URL)
    }
}

impl Client {
    /// Client for a mirror of the dataset at `url`.
    pub fn with_url(url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("temp-heatmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            url: url.into(),
            http,
        }
    }

    /// Fetch and validate the dataset.
    ///
    /// ### Errors
    /// - Network/HTTP error (non-2xx status included)
    /// - JSON decoding error
    /// - Malformed dataset (no samples, month outside 1..=12, non-finite values)
    pub fn fetch(&self) -> Result<Dataset> {
        log::info!("fetching dataset from {}", self.url);
        let resp = self
            .http
            .get(&self.url)
            .send()
            .with_context(|| format!("GET {}", self.url))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("GET {} failed with HTTP {}", self.url, status);
        }
        let raw: RawDataset = resp
            .json()
            .with_context(|| format!("decode json from {}", self.url))?;
        let dataset = Dataset::try_from(raw).context("invalid dataset")?;
        log::info!(
            "loaded {} samples (base {} °C)",
            dataset.samples().len(),
            dataset.base_temperature()
        );
        Ok(dataset)
    }
}
