//! Drawing abstraction the spinner renders onto, plus the software
//! implementations used by the demo host and the tests.

mod raster;
mod term;

pub use raster::{Pixmap, RasterCanvas, SnapshotError};
pub use term::present;

use crate::color::Color;

/// A point in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How stroke endpoints are shaped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrokeCap {
    /// The stroke ends exactly at the endpoint.
    #[default]
    Butt,
    /// A half-disc of the stroke's half-width extends past each endpoint.
    Round,
}

/// Stroke parameters for line drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePaint {
    pub color: Color,
    pub width: f32,
    pub cap: StrokeCap,
}

impl Default for LinePaint {
    fn default() -> Self {
        Self { color: Color::WHITE, width: 1.0, cap: StrokeCap::default() }
    }
}

/// Minimal drawing surface the spinner renders onto.
///
/// Hosts adapt their own drawing primitive by implementing this; the crate
/// ships [`RasterCanvas`] for software rendering. Transform state is a
/// stack: `rotate` composes onto the current transform and `save`/`restore`
/// bracket temporary changes.
pub trait Canvas {
    /// Push the current transform state.
    fn save(&mut self);

    /// Pop back to the most recently saved transform state.
    fn restore(&mut self);

    /// Rotate subsequent drawing by `degrees` clockwise about `(px, py)`.
    fn rotate(&mut self, degrees: f32, px: f32, py: f32);

    /// Stroke a line segment under the current transform.
    fn draw_line(&mut self, from: Point, to: Point, paint: &LinePaint);
}
