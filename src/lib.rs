//! temp_heatmap
//!
//! A lightweight Rust library for rendering monthly global temperature variance as a
//! banded heat map. Pairs with the `temp-heatmap` CLI.
//!
//! ### Features
//! - Fetch the monthly variance dataset (or load a saved copy)
//! - Threshold color banding: eleven equal-width temperature bands, cold to hot
//! - Positional scales shared by the legend and the heat map
//! - SVG/PNG output with a color legend and per-cell hover regions/tooltips
//!
//! ### Example
//! ```no_run
//! use temp_heatmap::{Client, ColorBand, viz};
//!
//! let dataset = Client::default().fetch()?;
//! let band = ColorBand::from_dataset(&dataset)?;
//! println!("first band color {}", band.colors()[0]);
//! let hover = viz::plot_heatmap(&dataset, "heatmap.svg", &viz::RenderOptions::default())?;
//! println!("{} hoverable cells", hover.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod color;
pub mod models;
pub mod scale;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use color::{Band, BandError, Color, ColorBand, DEFAULT_PALETTE};
pub use models::{Dataset, DatasetError, Sample};
pub use scale::{BandScale, Layout, LayoutError, LinearScale, Scales};
