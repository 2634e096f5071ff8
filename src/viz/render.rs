//! The render pipeline: title, legend and heat map drawn onto a [`Surface`].

use anyhow::Result;

use crate::color::ColorBand;
use crate::models::{Dataset, month_name};
use crate::scale::{BandScale, Layout, Scales};

use super::surface::{Anchor, Axis, AxisOrient, Cell, Rect, Surface, Tick, Translated};
use super::text::truncate_to_width;

pub const HEADING: &str = "Monthly Global Land-Surface Temperature";

const HEADING_FONT_PX: u32 = 18;
const CAPTION_FONT_PX: u32 = 13;
const YEAR_TICKS: usize = 10;

/// `"1753 - 2015: base temperature 8.66 °C"`
pub fn description(dataset: &Dataset) -> String {
    let (min_year, max_year) = dataset.year_extent();
    format!(
        "{} - {}: base temperature {} °C",
        min_year,
        max_year,
        dataset.base_temperature()
    )
}

/// Every sample as a positioned, colored cell in heat-map coordinates.
pub fn cells(dataset: &Dataset, band: &ColorBand, scales: &Scales) -> Vec<Cell> {
    let w = scales.cell_width();
    let h = scales.month.bandwidth();
    dataset
        .samples()
        .iter()
        .filter_map(|s| {
            let y = scales.month.position(s.month)?;
            let temperature = dataset.temperature(s);
            Some(Cell {
                sample: *s,
                temperature,
                color: band.color_for(temperature),
                rect: Rect::new(scales.time.map(s.year as f64), y, w, h),
            })
        })
        .collect()
}

pub fn render_title(dataset: &Dataset, surface: &mut dyn Surface) -> Result<()> {
    let (w, h) = surface.size();
    let cx = w as f64 / 2.0;
    let max_px = w.saturating_sub(20);
    surface.draw_text(
        &truncate_to_width(HEADING, HEADING_FONT_PX, max_px),
        (cx, h as f64 * 0.32),
        Anchor::Center,
        HEADING_FONT_PX,
    )?;
    surface.draw_text(
        &truncate_to_width(&description(dataset), CAPTION_FONT_PX, max_px),
        (cx, h as f64 * 0.75),
        Anchor::Center,
        CAPTION_FONT_PX,
    )
}

/// One bar per band plus an axis labelled at the inner boundaries, in legend coordinates.
pub fn render_legend(
    band: &ColorBand,
    scales: &Scales,
    layout: &Layout,
    surface: &mut dyn Surface,
) -> Result<()> {
    let axis_y = layout.legend_height.saturating_sub(layout.legend_pad) as f64;
    let bar_h = layout.legend_bar_height as f64;
    let legend = &scales.legend;

    for b in band.bands() {
        let x0 = legend.map(b.low);
        let x1 = legend.map(b.high);
        surface.fill_rect(
            Rect::new(x0, axis_y - bar_h, x1 - x0, bar_h),
            band.color_for(b.low),
        )?;
    }

    let ticks = band
        .boundaries()
        .iter()
        .map(|v| Tick {
            pos: legend.map(*v),
            label: format!("{v:.1}"),
        })
        .collect();
    surface.draw_axis(&Axis {
        orient: AxisOrient::Bottom,
        offset: axis_y,
        span: legend.range,
        ticks,
    })
}

/// Cells, year axis and month axis, in heat-map coordinates. Every cell gets a hover region.
pub fn render_heatmap(
    dataset: &Dataset,
    band: &ColorBand,
    scales: &Scales,
    layout: &Layout,
    surface: &mut dyn Surface,
) -> Result<()> {
    let drawn = cells(dataset, band, scales);
    for cell in &drawn {
        surface.fill_rect(cell.rect, cell.color)?;
    }
    log::debug!("drew {} cells", drawn.len());
    for cell in drawn {
        surface.attach_hover(cell)?;
    }

    let time = &scales.time;
    let year_ticks = time
        .ticks(YEAR_TICKS)
        .into_iter()
        .map(|y| Tick {
            pos: time.map(y),
            label: format!("{y:.0}"),
        })
        .collect();
    surface.draw_axis(&Axis {
        orient: AxisOrient::Bottom,
        offset: layout.height.saturating_sub(layout.pad_tb) as f64,
        span: time.range,
        ticks: year_ticks,
    })?;

    let month = &scales.month;
    let month_ticks = (1..=BandScale::MONTHS)
        .filter_map(|m| {
            Some(Tick {
                pos: month.center(m)?,
                label: month_name(m)?.to_string(),
            })
        })
        .collect();
    surface.draw_axis(&Axis {
        orient: AxisOrient::Left,
        offset: layout.pad_lr as f64,
        span: (month.start, month.end),
        ticks: month_ticks,
    })
}

/// Full figure: title band on top, legend below it, heat map at the bottom.
pub fn render(
    dataset: &Dataset,
    band: &ColorBand,
    scales: &Scales,
    layout: &Layout,
    surface: &mut dyn Surface,
) -> Result<()> {
    let (canvas_w, _) = surface.size();

    {
        let mut title = Translated::new(surface, (0.0, 0.0), (canvas_w, layout.title_height));
        render_title(dataset, &mut title)?;
    }

    {
        let mut legend = Translated::new(
            surface,
            layout.legend_origin(),
            (layout.legend_width, layout.legend_height),
        );
        render_legend(band, scales, layout, &mut legend)?;
    }

    let mut chart = Translated::new(
        surface,
        layout.chart_origin(),
        (layout.width, layout.height),
    );
    render_heatmap(dataset, band, scales, layout, &mut chart)
}
