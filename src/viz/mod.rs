//! Visualization: render the temperature heat map to **SVG** or **PNG**.
//!
//! - Eleven-band threshold legend (cold blue → hot red) above the chart
//! - One cell per (year, month), years on x, calendar months on y
//! - Hover regions for every cell, returned as a [`HoverMap`]
//!
//! Drawing goes through the [`Surface`] trait; [`PlottersSurface`] is the
//! plotters-backed implementation used for file output.

pub mod hover;
pub mod plotters_surface;
pub mod render;
pub mod surface;
pub mod text;

pub use hover::{HoverHandler, HoverMap, Tooltip};
pub use plotters_surface::PlottersSurface;
pub use render::{cells, render, render_heatmap, render_legend, render_title};
pub use surface::{Anchor, Axis, AxisOrient, Cell, Rect, Surface, Tick, Translated};

use crate::color::ColorBand;
use crate::models::Dataset;
use crate::scale::{Layout, Scales};
use anyhow::Result;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // From `src/viz/mod.rs` → project root → `assets/DejaVuSans.ttf`
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::warn!("bundled font could not be registered; labels may be missing");
        }
    });
}

/// Output options for [`plot_heatmap`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    pub layout: Layout,
}

/// Build bands and scales for `dataset` and write the figure to `out_path`.
///
/// `.svg` selects the SVG backend; any other extension is written as a bitmap
/// (format from the extension, e.g. `.png`). Returns the hover regions in canvas pixels.
pub fn plot_heatmap<P: AsRef<Path>>(
    dataset: &Dataset,
    out_path: P,
    options: &RenderOptions,
) -> Result<HoverMap> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let layout = &options.layout;
    layout.validate()?;

    let band = ColorBand::from_dataset(dataset)?;
    let scales = Scales::build(dataset, &band, layout);
    let (min, max) = band.domain();
    log::debug!(
        "color domain {:.3}..{:.3}, step {:.3}, {} bands",
        min,
        max,
        band.step(),
        band.len()
    );

    let size = layout.canvas_size();
    let hover = if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(out_path, size).into_drawing_area();
        draw(root, dataset, &band, &scales, layout)?
    } else {
        let root = BitMapBackend::new(out_path, size).into_drawing_area();
        draw(root, dataset, &band, &scales, layout)?
    };
    log::info!(
        "wrote {} ({}x{}, {} cells)",
        out_path.display(),
        size.0,
        size.1,
        hover.len()
    );
    Ok(hover)
}

/// Helper that draws to any Plotters backend.
fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    dataset: &Dataset,
    band: &ColorBand,
    scales: &Scales,
    layout: &Layout,
) -> Result<HoverMap> {
    let mut surface = PlottersSurface::new(root)?;
    render(dataset, band, scales, layout, &mut surface)?;
    surface.finish()
}
