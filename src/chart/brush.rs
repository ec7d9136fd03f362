//! Horizontal brush over the overview strip
//!
//! A gesture starts at the mouse-down position and follows the pointer; on
//! release it becomes a [`BrushSelection`] in strip pixels, clamped to the
//! strip and ordered left to right. Selections narrower than
//! [`MIN_EXTENT`] count as empty (a plain click).

use serde::Serialize;

use super::scale::{TimeScale, TimeWindow};

/// Narrowest selection, in pixels, that is not treated as a click
pub const MIN_EXTENT: f64 = 0.5;

/// A selected pixel interval on the strip, `x0 < x1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrushSelection {
    x0: f64,
    x1: f64,
}

impl BrushSelection {
    /// Selection between two positions in either order, or `None` if empty
    pub fn new(a: f64, b: f64, width: f64) -> Option<Self> {
        let clamp = |x: f64| x.clamp(0.0, width.max(0.0));
        let (x0, x1) = if a <= b {
            (clamp(a), clamp(b))
        } else {
            (clamp(b), clamp(a))
        };
        if x1 - x0 < MIN_EXTENT {
            return None;
        }
        Some(Self { x0, x1 })
    }

    /// The whole strip
    pub fn full(width: f64) -> Self {
        Self {
            x0: 0.0,
            x1: width.max(0.0),
        }
    }

    /// Pixel extent of a time window on the strip
    pub fn from_window(window: TimeWindow, strip: &TimeScale) -> Self {
        let (lo, hi) = strip.range();
        let x0 = strip.apply(window.start).clamp(lo, hi);
        let x1 = strip.apply(window.end).clamp(lo, hi);
        Self { x0, x1: x1.max(x0) }
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn to_window(&self, strip: &TimeScale) -> TimeWindow {
        TimeWindow::new(strip.invert(self.x0), strip.invert(self.x1))
    }
}

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushGesture {
    anchor: f64,
    current: f64,
}

impl BrushGesture {
    pub fn begin(x: f64) -> Self {
        Self {
            anchor: x,
            current: x,
        }
    }

    pub fn update(self, x: f64) -> Self {
        Self { current: x, ..self }
    }

    /// Live extent for drawing while dragging
    pub fn extent(&self, width: f64) -> Option<BrushSelection> {
        BrushSelection::new(self.anchor, self.current, width)
    }

    pub fn finish(self, width: f64) -> Option<BrushSelection> {
        self.extent(width)
    }
}
