use chrono::Month;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One monthly observation: deviation (°C) from the dataset's base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub year: i32,
    /// Calendar month, 1 = January.
    pub month: u32,
    pub variance: f64,
}

/// Reasons a dataset is rejected before any band or scale is built from it.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset contains no samples")]
    Empty,
    #[error("month {month} out of range 1..=12 (year {year})")]
    MonthOutOfRange { year: i32, month: u32 },
    #[error("non-finite variance for {year}-{month:02}")]
    NonFinite { year: i32, month: u32 },
    #[error("base temperature is not a finite number")]
    NonFiniteBase,
}

/// Raw document as served by the dataset URL.
///
/// ```json
/// {"baseTemperature": 8.66, "monthlyVariance": [{"year": 1753, "month": 1, "variance": -1.366}]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    pub base_temperature: f64,
    pub monthly_variance: Vec<Sample>,
}

/// Validated dataset. Construct via [`Dataset::new`] or `TryFrom<RawDataset>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    base_temperature: f64,
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(base_temperature: f64, samples: Vec<Sample>) -> Result<Self, DatasetError> {
        if !base_temperature.is_finite() {
            return Err(DatasetError::NonFiniteBase);
        }
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        for s in &samples {
            if !(1..=12).contains(&s.month) {
                return Err(DatasetError::MonthOutOfRange {
                    year: s.year,
                    month: s.month,
                });
            }
            if !s.variance.is_finite() {
                return Err(DatasetError::NonFinite {
                    year: s.year,
                    month: s.month,
                });
            }
        }
        Ok(Self {
            base_temperature,
            samples,
        })
    }

    pub fn base_temperature(&self) -> f64 {
        self.base_temperature
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Absolute temperature of a sample: base + variance.
    pub fn temperature(&self, sample: &Sample) -> f64 {
        self.base_temperature + sample.variance
    }

    /// Absolute temperatures in sample order.
    pub fn temperatures(&self) -> Vec<f64> {
        self.samples.iter().map(|s| self.temperature(s)).collect()
    }

    /// Inclusive (min, max) year. Never fails: samples are non-empty.
    pub fn year_extent(&self) -> (i32, i32) {
        self.samples
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), s| {
                (lo.min(s.year), hi.max(s.year))
            })
    }

    /// (min, max) absolute temperature.
    pub fn temperature_extent(&self) -> (f64, f64) {
        self.temperatures()
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            })
    }
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DatasetError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Dataset::new(raw.base_temperature, raw.monthly_variance)
    }
}

/// Full English month name ("January" for 1). Returns `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let m = u8::try_from(month).ok()?;
    Month::try_from(m).ok().map(|m| m.name())
}

/// Round to one decimal place, folding `-0.0` into `0.0`.
pub fn round1(v: f64) -> f64 {
    let r = (v * 10.0).round() / 10.0;
    if r == 0.0 { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(year: i32, month: u32, variance: f64) -> Sample {
        Sample {
            year,
            month,
            variance,
        }
    }

    #[test]
    fn rejects_empty_and_bad_months() {
        assert_eq!(Dataset::new(8.66, vec![]), Err(DatasetError::Empty));
        assert_eq!(
            Dataset::new(8.66, vec![s(1800, 13, 0.1)]),
            Err(DatasetError::MonthOutOfRange {
                year: 1800,
                month: 13
            })
        );
        assert_eq!(
            Dataset::new(8.66, vec![s(1800, 0, 0.1)]),
            Err(DatasetError::MonthOutOfRange {
                year: 1800,
                month: 0
            })
        );
        assert_eq!(
            Dataset::new(f64::NAN, vec![s(1800, 1, 0.1)]),
            Err(DatasetError::NonFiniteBase)
        );
    }

    #[test]
    fn extents() {
        let d = Dataset::new(
            8.0,
            vec![s(1900, 1, -1.0), s(1753, 6, 2.0), s(2015, 12, 0.5)],
        )
        .unwrap();
        assert_eq!(d.year_extent(), (1753, 2015));
        assert_eq!(d.temperature_extent(), (7.0, 10.0));
    }

    #[test]
    fn month_names_and_rounding() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(13), None);
        assert_eq!(round1(-0.04), 0.0);
        assert!(round1(-0.04).is_sign_positive());
        assert_eq!(round1(1.86), 1.9);
    }
}
