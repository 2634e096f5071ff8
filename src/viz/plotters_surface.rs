//! [`Surface`] implementation on top of a plotters drawing area (SVG or bitmap).

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::hover::HoverMap;
use super::surface::{Anchor, Axis, AxisOrient, Cell, Rect, Surface};
use crate::color::Color;

const TICK_LEN: i32 = 6;
const TICK_FONT_PX: u32 = 11;

pub fn rgb_color(c: Color) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn text_style(font_px: u32, anchor: Anchor) -> TextStyle<'static> {
    let pos = match anchor {
        Anchor::TopCenter => Pos::new(HPos::Center, VPos::Top),
        Anchor::Center => Pos::new(HPos::Center, VPos::Center),
        Anchor::CenterLeft => Pos::new(HPos::Left, VPos::Center),
        Anchor::CenterRight => Pos::new(HPos::Right, VPos::Center),
    };
    TextStyle::from((FontFamily::SansSerif, font_px)).pos(pos)
}

/// Draws onto a plotters area and collects hover regions in the area's pixel space.
pub struct PlottersSurface<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    hover: HoverMap,
}

impl<DB: DrawingBackend> PlottersSurface<DB> {
    pub fn new(area: DrawingArea<DB, Shift>) -> Result<Self> {
        area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let size = area.dim_in_pixel();
        Ok(Self {
            area,
            hover: HoverMap::new(size),
        })
    }

    /// Flush the drawing and hand back the hover regions.
    pub fn finish(self) -> Result<HoverMap> {
        self.area.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(self.hover)
    }

    fn line(&self, from: (i32, i32), to: (i32, i32)) -> Result<()> {
        self.area
            .draw(&PathElement::new(vec![from, to], BLACK.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))
    }

    fn label(&self, text: &str, at: (i32, i32), style: &TextStyle) -> Result<()> {
        self.area
            .draw(&Text::new(text.to_string(), at, style.clone()))
            .map_err(|e| anyhow!("{:?}", e))
    }
}

impl<DB: DrawingBackend> Surface for PlottersSurface<DB> {
    fn size(&self) -> (u32, u32) {
        self.area.dim_in_pixel()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        let (x0, y0, x1, y1) = rect.to_pixels();
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }
        self.area
            .draw(&Rectangle::new(
                [(x0, y0), (x1, y1)],
                rgb_color(color).filled(),
            ))
            .map_err(|e| anyhow!("{:?}", e))
    }

    fn draw_axis(&mut self, axis: &Axis) -> Result<()> {
        let offset = axis.offset.round() as i32;
        let (s0, s1) = (axis.span.0.round() as i32, axis.span.1.round() as i32);
        match axis.orient {
            AxisOrient::Bottom => {
                self.line((s0, offset), (s1, offset))?;
                let style = text_style(TICK_FONT_PX, Anchor::TopCenter);
                for t in &axis.ticks {
                    let x = t.pos.round() as i32;
                    self.line((x, offset), (x, offset + TICK_LEN))?;
                    self.label(&t.label, (x, offset + TICK_LEN + 3), &style)?;
                }
            }
            AxisOrient::Left => {
                self.line((offset, s0), (offset, s1))?;
                let style = text_style(TICK_FONT_PX, Anchor::CenterRight);
                for t in &axis.ticks {
                    let y = t.pos.round() as i32;
                    self.line((offset - TICK_LEN, y), (offset, y))?;
                    self.label(&t.label, (offset - TICK_LEN - 3, y), &style)?;
                }
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: (f64, f64),
        anchor: Anchor,
        font_px: u32,
    ) -> Result<()> {
        let style = text_style(font_px, anchor);
        self.label(text, (at.0.round() as i32, at.1.round() as i32), &style)
    }

    fn attach_hover(&mut self, cell: Cell) -> Result<()> {
        self.hover.push(cell);
        Ok(())
    }
}
