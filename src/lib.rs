//! A radial fade spinner: a rotating ring of round-capped line segments
//! whose brightness fades along a precomputed color gradient.
//!
//! The widget is host-agnostic. It measures itself against layout
//! constraints, renders onto anything implementing [`Canvas`], and advances
//! its animation through cooperative [`SpinnerView::tick`] steps driven by
//! the host's frame loop. A software [`Pixmap`]/[`RasterCanvas`] pair and a
//! terminal presenter are included so the bundled demo binary (and the
//! tests) can observe real pixels.

pub mod color;
pub mod measure;
pub mod options;
pub mod render;
pub mod widget;

pub use color::Color;
pub use measure::{dip_to_px, Geometry, MeasureSpec, DEFAULT_SIZE_DIP};
pub use options::SpinnerOptions;
pub use render::{present, Canvas, LinePaint, Pixmap, Point, RasterCanvas, StrokeCap};
pub use widget::{SpinnerView, Tick, DEFAULT_CYCLE};
