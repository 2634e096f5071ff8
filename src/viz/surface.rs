//! Drawing primitives the renderer needs, independent of any backend.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::models::{Sample, month_name, round1};

/// Axis-aligned rectangle in pixels, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: left/top edges inside, right/bottom edges outside.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Integer corners `(x0, y0, x1, y1)`; rounding each edge keeps adjacent cells flush.
    pub fn to_pixels(&self) -> (i32, i32, i32, i32) {
        (
            self.x.round() as i32,
            self.y.round() as i32,
            (self.x + self.w).round() as i32,
            (self.y + self.h).round() as i32,
        )
    }
}

/// Where a text label sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered horizontally, hanging below the point (bottom-axis labels).
    TopCenter,
    /// Centered on the point.
    Center,
    /// Left edge at the point, vertically centered.
    CenterLeft,
    /// Right edge at the point, vertically centered (left-axis labels).
    CenterRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    /// Horizontal line, ticks and labels below it.
    Bottom,
    /// Vertical line, ticks and labels to its left.
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis in pixels.
    pub pos: f64,
    pub label: String,
}

/// A drawable axis: where the line is, how far it spans, and its labelled ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    /// y of a bottom axis, x of a left axis.
    pub offset: f64,
    pub span: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let (along, across) = match self.orient {
            AxisOrient::Bottom => (dx, dy),
            AxisOrient::Left => (dy, dx),
        };
        Self {
            orient: self.orient,
            offset: self.offset + across,
            span: (self.span.0 + along, self.span.1 + along),
            ticks: self
                .ticks
                .iter()
                .map(|t| Tick {
                    pos: t.pos + along,
                    label: t.label.clone(),
                })
                .collect(),
        }
    }
}

/// A drawn heat-map cell: the sample, its derived temperature and fill, and where it sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub sample: Sample,
    pub temperature: f64,
    pub color: Color,
    pub rect: Rect,
}

impl Cell {
    /// Tooltip text: `"1753 - January"`, `"1.9 °C"`, `"-6.8 °C"`.
    pub fn tooltip(&self) -> Vec<String> {
        let month = month_name(self.sample.month).unwrap_or("?");
        vec![
            format!("{} - {}", self.sample.year, month),
            format!("{:.1} °C", round1(self.temperature)),
            format!("{:.1} °C", round1(self.sample.variance)),
        ]
    }
}

/// Backend the renderer draws onto. Coordinates are pixels relative to the surface.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;

    fn draw_axis(&mut self, axis: &Axis) -> Result<()>;

    fn draw_text(&mut self, text: &str, at: (f64, f64), anchor: Anchor, font_px: u32)
    -> Result<()>;

    /// Register hover behaviour for a cell that has already been filled.
    fn attach_hover(&mut self, cell: Cell) -> Result<()>;
}

/// View of another surface shifted by `(dx, dy)`: lets legend and chart code
/// work in their own local coordinates.
pub struct Translated<'a> {
    inner: &'a mut dyn Surface,
    dx: f64,
    dy: f64,
    size: (u32, u32),
}

impl<'a> Translated<'a> {
    pub fn new(inner: &'a mut dyn Surface, origin: (f64, f64), size: (u32, u32)) -> Self {
        Self {
            inner,
            dx: origin.0,
            dy: origin.1,
            size,
        }
    }
}

impl Surface for Translated<'_> {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.inner.fill_rect(rect.translate(self.dx, self.dy), color)
    }

    fn draw_axis(&mut self, axis: &Axis) -> Result<()> {
        self.inner.draw_axis(&axis.translate(self.dx, self.dy))
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: (f64, f64),
        anchor: Anchor,
        font_px: u32,
    ) -> Result<()> {
        self.inner
            .draw_text(text, (at.0 + self.dx, at.1 + self.dy), anchor, font_px)
    }

    fn attach_hover(&mut self, cell: Cell) -> Result<()> {
        let rect = cell.rect.translate(self.dx, self.dy);
        self.inner.attach_hover(Cell { rect, ..cell })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_containment_is_half_open() {
        let r = Rect::new(10.0, 20.0, 5.0, 5.0);
        assert!(r.contains(10.0, 20.0));
        assert!(r.contains(14.9, 24.9));
        assert!(!r.contains(15.0, 22.0));
        assert!(!r.contains(12.0, 25.0));
    }

    #[test]
    fn axis_translation_follows_orientation() {
        let axis = Axis {
            orient: AxisOrient::Left,
            offset: 100.0,
            span: (30.0, 370.0),
            ticks: vec![Tick {
                pos: 44.0,
                label: "January".into(),
            }],
        };
        let moved = axis.translate(5.0, 108.0);
        assert_eq!(moved.offset, 105.0);
        assert_eq!(moved.span, (138.0, 478.0));
        assert_eq!(moved.ticks[0].pos, 152.0);
    }
}
