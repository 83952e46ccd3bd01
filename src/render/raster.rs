use std::path::Path;

use crate::color::Color;
use crate::render::{Canvas, LinePaint, Point, StrokeCap};

/// A 2-D affine transform, row-major 2x3.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Transform {
    sx: f32,
    shx: f32,
    tx: f32,
    shy: f32,
    sy: f32,
    ty: f32,
}

impl Transform {
    const IDENTITY: Transform =
        Transform { sx: 1.0, shx: 0.0, tx: 0.0, shy: 0.0, sy: 1.0, ty: 0.0 };

    /// Clockwise rotation (y-down coordinates) about a pivot point.
    fn rotate_about(degrees: f32, px: f32, py: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Transform {
            sx: cos,
            shx: -sin,
            tx: px - cos * px + sin * py,
            shy: sin,
            sy: cos,
            ty: py - sin * px - cos * py,
        }
    }

    /// Composition that applies `other` before `self`.
    fn pre_concat(self, other: Transform) -> Transform {
        Transform {
            sx: self.sx * other.sx + self.shx * other.shy,
            shx: self.sx * other.shx + self.shx * other.sy,
            tx: self.sx * other.tx + self.shx * other.ty + self.tx,
            shy: self.shy * other.sx + self.sy * other.shy,
            sy: self.shy * other.shx + self.sy * other.sy,
            ty: self.shy * other.tx + self.sy * other.ty + self.ty,
        }
    }

    fn apply(&self, p: Point) -> Point {
        Point {
            x: self.sx * p.x + self.shx * p.y + self.tx,
            y: self.shy * p.x + self.sy * p.y + self.ty,
        }
    }
}

/// Errors that can occur when writing a pixmap snapshot.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("pixmap buffer does not match its dimensions")]
    Mismatch,

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// An owned RGBA8 pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// A fully transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; (width * height * 4) as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// The color at a pixel; transparent outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Color::argb(self.data[i + 3], self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Source-over blend of `color`, scaled by `coverage` in `[0, 1]`.
    fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let src_alpha = color.a as f32 / 255.0 * coverage;
        if src_alpha <= 0.0 {
            return;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let dst_alpha = self.data[i + 3] as f32 / 255.0;
        let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
        if out_alpha <= 0.0 {
            return;
        }
        let blend = |src: u8, dst: u8| {
            let out =
                (src as f32 * src_alpha + dst as f32 * dst_alpha * (1.0 - src_alpha)) / out_alpha;
            out.round() as u8
        };
        self.data[i] = blend(color.r, self.data[i]);
        self.data[i + 1] = blend(color.g, self.data[i + 1]);
        self.data[i + 2] = blend(color.b, self.data[i + 2]);
        self.data[i + 3] = (out_alpha * 255.0).round() as u8;
    }

    /// Write the buffer to a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let img: image::RgbaImage =
            image::ImageBuffer::from_raw(self.width, self.height, self.data.clone())
                .ok_or(SnapshotError::Mismatch)?;
        img.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Software [`Canvas`] over a [`Pixmap`].
///
/// Keeps a transform stack and strokes anti-aliased line segments by
/// distance-to-segment coverage.
pub struct RasterCanvas<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
    stack: Vec<Transform>,
}

impl<'a> RasterCanvas<'a> {
    pub fn new(pixmap: &'a mut Pixmap) -> Self {
        Self { pixmap, transform: Transform::IDENTITY, stack: Vec::new() }
    }
}

impl Canvas for RasterCanvas<'_> {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        self.transform = self.stack.pop().unwrap_or(Transform::IDENTITY);
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.transform = self.transform.pre_concat(Transform::rotate_about(degrees, px, py));
    }

    fn draw_line(&mut self, from: Point, to: Point, paint: &LinePaint) {
        let a = self.transform.apply(from);
        let b = self.transform.apply(to);
        stroke_segment(self.pixmap, a, b, paint);
    }
}

fn stroke_segment(pixmap: &mut Pixmap, a: Point, b: Point, paint: &LinePaint) {
    let half = (paint.width / 2.0).max(0.0);
    // One extra pixel on every side for the anti-aliased edge.
    let margin = half + 1.0;
    let min_x = (a.x.min(b.x) - margin).floor().max(0.0) as u32;
    let min_y = (a.y.min(b.y) - margin).floor().max(0.0) as u32;
    let max_x = (a.x.max(b.x) + margin).ceil().min(pixmap.width as f32) as u32;
    let max_y = (a.y.max(b.y) + margin).ceil().min(pixmap.height as f32) as u32;

    let ab = Point::new(b.x - a.x, b.y - a.y);
    let len_sq = ab.x * ab.x + ab.y * ab.y;

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(dist) = segment_distance(p, a, ab, len_sq, paint.cap) else {
                continue;
            };
            // Linear 1-px coverage ramp across the stroke edge.
            let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
            if coverage > 0.0 {
                pixmap.blend_pixel(x, y, paint.color, coverage);
            }
        }
    }
}

/// Distance from `p` to the segment starting at `a` with direction `ab`.
///
/// `None` means the point falls outside a butt cap's end lines and receives
/// no coverage at all.
fn segment_distance(p: Point, a: Point, ab: Point, len_sq: f32, cap: StrokeCap) -> Option<f32> {
    let ap = Point::new(p.x - a.x, p.y - a.y);
    if len_sq <= f32::EPSILON {
        // Degenerate segment: a round cap still paints a dot.
        return match cap {
            StrokeCap::Round => Some((ap.x * ap.x + ap.y * ap.y).sqrt()),
            StrokeCap::Butt => None,
        };
    }
    let t = (ap.x * ab.x + ap.y * ab.y) / len_sq;
    if matches!(cap, StrokeCap::Butt) && !(0.0..=1.0).contains(&t) {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    let dx = ap.x - t * ab.x;
    let dy = ap.y - t * ab.y;
    Some((dx * dx + dy * dy).sqrt())
}
