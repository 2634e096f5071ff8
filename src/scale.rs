//! Positional scales shared by the legend and the heat map.
//!
//! All scales are plain values: built once per dataset, then only read.

use thiserror::Error;

use crate::color::ColorBand;
use crate::models::Dataset;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("width {width} leaves no room for cells inside {pad}px left/right padding")]
    TooNarrow { width: u32, pad: u32 },
    #[error("height {height} leaves no room for cells inside {pad}px top/bottom padding")]
    TooShort { height: u32, pad: u32 },
    #[error("legend width {width} leaves no room for bars inside {pad}px padding")]
    LegendTooNarrow { width: u32, pad: u32 },
}

/// Pixel geometry of the rendered figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Heat-map area width.
    pub width: u32,
    /// Heat-map area height.
    pub height: u32,
    /// Left/right gutter around the cells (holds the month axis).
    pub pad_lr: u32,
    /// Top/bottom gutter around the cells (holds the year axis).
    pub pad_tb: u32,
    pub legend_width: u32,
    pub legend_height: u32,
    pub legend_pad: u32,
    pub legend_bar_height: u32,
    pub title_height: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 400,
            pad_lr: 100,
            pad_tb: 30,
            legend_width: 400,
            legend_height: 60,
            legend_pad: 20,
            legend_bar_height: 24,
            title_height: 48,
        }
    }
}

impl Layout {
    /// Full canvas size: title band, legend band and heat map stacked vertically.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.width.max(self.legend_width),
            self.title_height + self.legend_height + self.height,
        )
    }

    /// Top-left of the legend band; its bars start where the first year column starts.
    pub fn legend_origin(&self) -> (f64, f64) {
        (
            self.pad_lr.saturating_sub(self.legend_pad) as f64,
            self.title_height as f64,
        )
    }

    /// Reject geometries whose padding swallows the drawing area; those would
    /// invert the scale ranges and produce an empty chart.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fits = |size: u32, pad: u32| u64::from(size) > 2 * u64::from(pad);
        if !fits(self.width, self.pad_lr) {
            return Err(LayoutError::TooNarrow {
                width: self.width,
                pad: self.pad_lr,
            });
        }
        if !fits(self.height, self.pad_tb) {
            return Err(LayoutError::TooShort {
                height: self.height,
                pad: self.pad_tb,
            });
        }
        if !fits(self.legend_width, self.legend_pad) {
            return Err(LayoutError::LegendTooNarrow {
                width: self.legend_width,
                pad: self.legend_pad,
            });
        }
        Ok(())
    }

    /// Top-left of the heat-map area.
    pub fn chart_origin(&self) -> (f64, f64) {
        (0.0, (self.title_height + self.legend_height) as f64)
    }
}

/// Continuous linear map `domain -> range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Round tick values inside the domain, roughly `count` of them,
    /// spaced by 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !(hi > lo) {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        if step >= 1.0 {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            let inv = (1.0 / step).round();
            let first = (lo * inv).ceil() as i64;
            let last = (hi * inv).floor() as i64;
            (first..=last).map(|i| i as f64 / inv).collect()
        }
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let err = raw / power;
    let factor = if err >= 50f64.sqrt() {
        10.0
    } else if err >= 10f64.sqrt() {
        5.0
    } else if err >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

/// Discrete scale: the twelve calendar months as equal bands over `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    pub start: f64,
    pub end: f64,
}

impl BandScale {
    pub const MONTHS: u32 = 12;

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn bandwidth(&self) -> f64 {
        (self.end - self.start) / Self::MONTHS as f64
    }

    /// Leading edge of the month's band; `None` outside 1..=12.
    pub fn position(&self, month: u32) -> Option<f64> {
        if !(1..=Self::MONTHS).contains(&month) {
            return None;
        }
        Some(self.start + (month - 1) as f64 * self.bandwidth())
    }

    /// Center of the month's band (axis tick position).
    pub fn center(&self, month: u32) -> Option<f64> {
        self.position(month).map(|p| p + self.bandwidth() / 2.0)
    }
}

/// The three independent scales one render needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    /// Year -> x inside the heat-map area.
    pub time: LinearScale,
    /// Month -> y band inside the heat-map area.
    pub month: BandScale,
    /// Temperature -> x inside the legend area.
    pub legend: LinearScale,
}

impl Scales {
    pub fn build(dataset: &Dataset, band: &ColorBand, layout: &Layout) -> Self {
        let (min_year, max_year) = dataset.year_extent();
        let (mut lo, mut hi) = (min_year as f64, max_year as f64);
        if min_year == max_year {
            lo -= 1.0;
            hi += 1.0;
        }
        let time = LinearScale::new(
            (lo, hi),
            (
                layout.pad_lr as f64,
                layout.width.saturating_sub(layout.pad_lr) as f64,
            ),
        );
        let month = BandScale::new(
            layout.pad_tb as f64,
            layout.height.saturating_sub(layout.pad_tb) as f64,
        );
        let legend = LinearScale::new(
            band.domain(),
            (
                layout.legend_pad as f64,
                layout.legend_width.saturating_sub(layout.legend_pad) as f64,
            ),
        );
        Self {
            time,
            month,
            legend,
        }
    }

    /// Width of one year column.
    pub fn cell_width(&self) -> f64 {
        let y0 = self.time.domain.0;
        self.time.map(y0 + 1.0) - self.time.map(y0)
    }
}
