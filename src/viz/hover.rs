//! Hover interaction, modelled without any event loop.
//!
//! Rendering registers one region per cell in a [`HoverMap`]. A host feeds pointer
//! positions to [`HoverMap::pointer_moved`], which turns them into `on_enter` /
//! `on_leave` calls on a [`HoverHandler`] such as the [`Tooltip`] overlay.

use serde::{Deserialize, Serialize};

use super::surface::Cell;
use super::text::estimate_text_width_px;

pub trait HoverHandler {
    /// Pointer entered `cell` at canvas position `pointer`.
    fn on_enter(&mut self, cell: &Cell, pointer: (i32, i32));
    fn on_leave(&mut self);
}

/// Hover regions of one rendered canvas, in canvas pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoverMap {
    pub canvas: (u32, u32),
    pub regions: Vec<Cell>,
    #[serde(skip)]
    active: Option<usize>,
}

impl HoverMap {
    pub fn new(canvas: (u32, u32)) -> Self {
        Self {
            canvas,
            regions: Vec::new(),
            active: None,
        }
    }

    pub fn push(&mut self, cell: Cell) {
        self.regions.push(cell);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn hit_index(&self, x: f64, y: f64) -> Option<usize> {
        // Later regions are drawn on top.
        self.regions.iter().rposition(|c| c.rect.contains(x, y))
    }

    /// Topmost cell under the point.
    pub fn hit(&self, x: f64, y: f64) -> Option<&Cell> {
        self.hit_index(x, y).map(|i| &self.regions[i])
    }

    /// Topmost cell for `(year, month)`: the one hit-testing reaches at its own center.
    pub fn find(&self, year: i32, month: u32) -> Option<&Cell> {
        self.regions
            .iter()
            .rev()
            .find(|c| c.sample.year == year && c.sample.month == month)
    }

    /// Cell the pointer is currently over, if any.
    pub fn active(&self) -> Option<&Cell> {
        self.active.map(|i| &self.regions[i])
    }

    /// Feed one pointer position. Leaving a cell fires `on_leave` before any
    /// `on_enter` for the next one; staying inside the same cell fires nothing.
    pub fn pointer_moved(&mut self, x: i32, y: i32, handler: &mut dyn HoverHandler) {
        let hit = self.hit_index(x as f64, y as f64);
        if hit == self.active {
            return;
        }
        if self.active.is_some() {
            handler.on_leave();
        }
        if let Some(i) = hit {
            handler.on_enter(&self.regions[i], (x, y));
        }
        self.active = hit;
    }

    /// Pointer left the canvas.
    pub fn pointer_left(&mut self, handler: &mut dyn HoverHandler) {
        if self.active.take().is_some() {
            handler.on_leave();
        }
    }
}

const TOOLTIP_FONT_PX: u32 = 13;
const TOOLTIP_PAD: i32 = 6;
const TOOLTIP_OFFSET: i32 = 12;

/// Tooltip overlay state: what it says, where it is, whether it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    canvas: (u32, u32),
    pub visible: bool,
    /// Top-left corner in canvas pixels.
    pub position: (i32, i32),
    pub lines: Vec<String>,
    /// Year of the cell last entered.
    pub year: Option<i32>,
}

impl Tooltip {
    pub fn new(canvas: (u32, u32)) -> Self {
        Self {
            canvas,
            visible: false,
            position: (0, 0),
            lines: Vec::new(),
            year: None,
        }
    }

    /// Box size for the current lines.
    pub fn size(&self) -> (i32, i32) {
        let text_w = self
            .lines
            .iter()
            .map(|l| estimate_text_width_px(l, TOOLTIP_FONT_PX) as i32)
            .max()
            .unwrap_or(0);
        let line_h = TOOLTIP_FONT_PX as i32 + 4;
        (
            text_w + 2 * TOOLTIP_PAD,
            self.lines.len() as i32 * line_h + 2 * TOOLTIP_PAD,
        )
    }

    // Below-right of the pointer; flipped to the other side when it would leave the canvas.
    fn place(&self, pointer: (i32, i32)) -> (i32, i32) {
        let (w, h) = self.size();
        let (cw, ch) = (self.canvas.0 as i32, self.canvas.1 as i32);
        let mut x = pointer.0 + TOOLTIP_OFFSET;
        let mut y = pointer.1 + TOOLTIP_OFFSET;
        if x + w > cw {
            x = pointer.0 - TOOLTIP_OFFSET - w;
        }
        if y + h > ch {
            y = pointer.1 - TOOLTIP_OFFSET - h;
        }
        (x.clamp(0, (cw - w).max(0)), y.clamp(0, (ch - h).max(0)))
    }
}

impl HoverHandler for Tooltip {
    fn on_enter(&mut self, cell: &Cell, pointer: (i32, i32)) {
        self.lines = cell.tooltip();
        self.year = Some(cell.sample.year);
        self.position = self.place(pointer);
        self.visible = true;
    }

    fn on_leave(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_PALETTE;
    use crate::models::Sample;
    use crate::viz::surface::Rect;

    fn cell(variance: f64) -> Cell {
        Cell {
            sample: Sample {
                year: 1900,
                month: 6,
                variance,
            },
            temperature: 8.66 + variance,
            color: DEFAULT_PALETTE[0],
            rect: Rect::new(10.0, 10.0, 8.0, 8.0),
        }
    }

    #[test]
    fn find_agrees_with_hit_for_duplicate_samples() {
        let mut map = HoverMap::new((100, 100));
        map.push(cell(-1.0));
        map.push(cell(2.0));

        let found = map.find(1900, 6).unwrap().clone();
        assert_eq!(found.sample.variance, 2.0);
        let (cx, cy) = (found.rect.x + 4.0, found.rect.y + 4.0);
        assert_eq!(map.hit(cx, cy), Some(&found));

        let mut tip = Tooltip::new(map.canvas);
        map.pointer_moved(cx as i32, cy as i32, &mut tip);
        assert_eq!(map.active(), Some(&found));
        assert_eq!(tip.lines, found.tooltip());
    }
}
