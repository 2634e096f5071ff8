//! Color banding: split a temperature domain into equal-width buckets and map each
//! bucket to a fixed palette color (threshold / step-function semantics).

use crate::models::Dataset;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// 8-bit RGB color. Serializes as a `#rrggbb` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let h = s.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return None;
        }
        let ch = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
        Some(Self::new(ch(0)?, ch(2)?, ch(4)?))
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a color string like \"#ffe090\"")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Color::from_hex(s).ok_or_else(|| E::custom(format!("invalid color {s:?}")))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// Diverging blue → yellow → red palette, cold to hot.
pub const DEFAULT_PALETTE: [Color; 11] = [
    Color::new(0x31, 0x37, 0x8b), // #31378b
    Color::new(0x45, 0x75, 0xb5), // #4575b5
    Color::new(0x75, 0xac, 0xd2), // #75acd2
    Color::new(0xab, 0xd9, 0xe9), // #abd9e9
    Color::new(0xe0, 0xf3, 0xf9), // #e0f3f9
    Color::new(0xff, 0xff, 0xbf), // #ffffbf
    Color::new(0xff, 0xe0, 0x90), // #ffe090
    Color::new(0xfd, 0xae, 0x61), // #fdae61
    Color::new(0xf5, 0x6d, 0x43), // #f56d43
    Color::new(0xd7, 0x30, 0x27), // #d73027
    Color::new(0x86, 0x15, 0x0e), // #86150e
];

#[derive(Debug, Error, PartialEq)]
pub enum BandError {
    #[error("cannot build color bands from an empty value series")]
    EmptyInput,
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("value series contains a non-finite number")]
    NonFinite,
    #[error("value range {min}..{max} cannot be split into strictly increasing bands")]
    Unresolvable { min: f64, max: f64 },
}

/// One bucket with a finite, presentation-ready range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub index: usize,
    pub color: Color,
    pub low: f64,
    pub high: f64,
    /// Last band: `high` is the domain maximum and is included.
    pub last: bool,
}

impl Band {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.low && (v < self.high || (self.last && v <= self.high))
    }
}

/// Threshold color scale over `[min, max]`.
///
/// Invariant: `boundaries.len() == colors.len() - 1`, boundaries strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBand {
    min: f64,
    max: f64,
    step: f64,
    boundaries: Vec<f64>,
    colors: Vec<Color>,
}

/// Step and `n - 1` inner thresholds over `[min, max]`, or `None` unless
/// `min < b1 < ... < max` holds in floating point.
fn thresholds(min: f64, max: f64, n: usize) -> Option<(f64, Vec<f64>)> {
    let step = (max - min) / n as f64;
    let boundaries: Vec<f64> = (1..n).map(|k| min + k as f64 * step).collect();
    let strict = std::iter::once(min)
        .chain(boundaries.iter().copied())
        .chain(std::iter::once(max))
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| w[0] < w[1]);
    strict.then_some((step, boundaries))
}

impl ColorBand {
    /// Build equal-width bands over the extent of `values`, one per palette entry.
    ///
    /// A flat series (min == max), or one whose spread is too small to give distinct
    /// thresholds at its magnitude, is widened by `max(1, 1e-6 * |extreme|)` on each side.
    pub fn build(values: &[f64], palette: &[Color]) -> Result<Self, BandError> {
        if palette.is_empty() {
            return Err(BandError::EmptyPalette);
        }
        if values.is_empty() {
            return Err(BandError::EmptyInput);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(BandError::NonFinite);
        }

        let (mut min, mut max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let n = palette.len();
        let (step, boundaries) = match thresholds(min, max, n) {
            Some(t) => t,
            None => {
                // Flat, or too narrow for the magnitude to yield distinct floats.
                let pad = 1f64.max(min.abs().max(max.abs()) * 1e-6);
                let (lo, hi) = (min, max);
                min -= pad;
                max += pad;
                thresholds(min, max, n).ok_or(BandError::Unresolvable { min: lo, max: hi })?
            }
        };

        Ok(Self {
            min,
            max,
            step,
            boundaries,
            colors: palette.to_vec(),
        })
    }

    /// Bands over every absolute temperature of the dataset, default palette.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, BandError> {
        Self::build(&dataset.temperatures(), &DEFAULT_PALETTE)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of boundaries `<= value`: the bucket the value falls in.
    pub fn bucket_index(&self, value: f64) -> usize {
        self.boundaries.partition_point(|b| *b <= value)
    }

    pub fn color_for(&self, value: f64) -> Color {
        self.colors[self.bucket_index(value)]
    }

    fn index_of(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    /// Raw extent of the bucket painted with `color`; open ends are `None`.
    pub fn invert_extent(&self, color: Color) -> Option<(Option<f64>, Option<f64>)> {
        let i = self.index_of(color)?;
        let low = i.checked_sub(1).map(|j| self.boundaries[j]);
        let high = self.boundaries.get(i).copied();
        Some((low, high))
    }

    /// Finite range of the bucket painted with `color`, open ends clamped to the domain.
    pub fn range_for(&self, color: Color) -> Option<Band> {
        self.index_of(color).map(|i| self.band(i))
    }

    fn band(&self, i: usize) -> Band {
        let low = i.checked_sub(1).map_or(self.min, |j| self.boundaries[j]);
        let high = self.boundaries.get(i).copied().unwrap_or(self.max);
        Band {
            index: i,
            color: self.colors[i],
            low,
            high,
            last: i + 1 == self.colors.len(),
        }
    }

    /// Every bucket in ascending order.
    pub fn bands(&self) -> Vec<Band> {
        (0..self.colors.len()).map(|i| self.band(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_rejects() {
        let c = Color::from_hex("#ffe090").unwrap();
        assert_eq!(c, Color::new(0xff, 0xe0, 0x90));
        assert_eq!(c.hex(), "#ffe090");
        assert_eq!(Color::from_hex("abd9e9"), Some(DEFAULT_PALETTE[3]));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&DEFAULT_PALETTE[0]).unwrap();
        assert_eq!(json, "\"#31378b\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DEFAULT_PALETTE[0]);
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn boundaries_are_equal_steps() {
        let band = ColorBand::build(&[0.0, 11.0, 5.5], &DEFAULT_PALETTE).unwrap();
        assert_eq!(band.boundaries().len(), 10);
        assert_eq!(band.step(), 1.0);
        for (k, b) in band.boundaries().iter().enumerate() {
            assert!((b - (k as f64 + 1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn flat_series_is_widened() {
        let band = ColorBand::build(&[3.0, 3.0], &DEFAULT_PALETTE).unwrap();
        assert_eq!(band.domain(), (2.0, 4.0));
        assert!(band.boundaries().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn narrow_spread_at_large_magnitude_is_widened() {
        let band = ColorBand::build(&[1e6, 1e6 + 1e-9], &DEFAULT_PALETTE).unwrap();
        let (min, max) = band.domain();
        assert!(min <= 1e6 && max >= 1e6 + 1e-9);
        assert!(band.boundaries().windows(2).all(|w| w[0] < w[1]));
        assert!(min < band.boundaries()[0]);
        assert!(band.boundaries()[9] < max);
        assert_eq!(band.color_for(1e6), band.color_for(1e6 + 1e-9));

        let huge = ColorBand::build(&[1e300, 1e300], &DEFAULT_PALETTE).unwrap();
        assert!(huge.boundaries().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn overflowing_range_is_rejected() {
        assert!(matches!(
            ColorBand::build(&[-f64::MAX, f64::MAX], &DEFAULT_PALETTE),
            Err(BandError::Unresolvable { .. })
        ));
    }

    #[test]
    fn preconditions() {
        assert_eq!(
            ColorBand::build(&[], &DEFAULT_PALETTE),
            Err(BandError::EmptyInput)
        );
        assert_eq!(ColorBand::build(&[1.0], &[]), Err(BandError::EmptyPalette));
        assert_eq!(
            ColorBand::build(&[1.0, f64::NAN], &DEFAULT_PALETTE),
            Err(BandError::NonFinite)
        );
    }

    #[test]
    fn invert_extent_is_open_at_ends() {
        let band = ColorBand::build(&[0.0, 11.0], &DEFAULT_PALETTE).unwrap();
        assert_eq!(band.invert_extent(DEFAULT_PALETTE[0]), Some((None, Some(1.0))));
        assert_eq!(
            band.invert_extent(DEFAULT_PALETTE[10]),
            Some((Some(10.0), None))
        );
        assert_eq!(band.invert_extent(Color::new(1, 2, 3)), None);

        let first = band.range_for(DEFAULT_PALETTE[0]).unwrap();
        assert_eq!((first.low, first.high), (0.0, 1.0));
        let last = band.range_for(DEFAULT_PALETTE[10]).unwrap();
        assert_eq!((last.low, last.high), (10.0, 11.0));
        assert!(last.contains(11.0));
        assert!(!first.contains(1.0));
    }
}
