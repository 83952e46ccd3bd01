//! The radial fade spinner widget.

mod animator;
mod gradient;

pub use animator::Tick;

use std::time::{Duration, Instant};

use crate::color::Color;
use crate::measure::{resolve_square, Geometry, MeasureSpec};
use crate::options::SpinnerOptions;
use crate::render::{Canvas, LinePaint, Point, StrokeCap};
use crate::widget::animator::FrameDriver;
use crate::widget::gradient::gradient_table;

/// Cycle length used by [`SpinnerView::start_animation`].
pub const DEFAULT_CYCLE: Duration = Duration::from_millis(1800);

/// A ring of radial line segments whose brightness rotates while animated.
///
/// The widget owns its styling, gradient table, geometry and animation
/// state; the host owns layout and the frame clock. Expected collaboration:
///
/// 1. [`measure`](Self::measure) whenever layout constraints change;
/// 2. [`start_animation`](Self::start_animation) (or the explicit-duration
///    variants) to begin rotating;
/// 3. [`tick`](Self::tick) once per host frame, re-rendering only when it
///    reports [`Tick::Changed`];
/// 4. [`detach`](Self::detach) on teardown, so a repeating driver never
///    outlives the widget's usable life.
#[derive(Debug)]
pub struct SpinnerView {
    options: SpinnerOptions,
    colors: Vec<Color>,
    geometry: Geometry,
    start_index: usize,
    running: bool,
    driver: Option<FrameDriver>,
    paint: LinePaint,
}

impl SpinnerView {
    pub fn new(options: SpinnerOptions) -> Self {
        let options = options.sanitized();
        let colors = gradient_table(options.line_count, options.start_color, options.end_color);
        Self {
            options,
            colors,
            geometry: Geometry::default(),
            start_index: 0,
            running: false,
            driver: None,
            paint: LinePaint { cap: StrokeCap::Round, ..LinePaint::default() },
        }
    }

    pub fn options(&self) -> &SpinnerOptions {
        &self.options
    }

    /// The precomputed gradient table, one entry per segment.
    pub fn gradient(&self) -> &[Color] {
        &self.colors
    }

    /// Geometry resolved by the last call to [`measure`](Self::measure).
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Gradient table entry currently assigned to angular slot 0.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Resolve the widget's square size from the host's constraints.
    ///
    /// `scale` is the display density factor used when a constraint is
    /// [`MeasureSpec::Unspecified`]. Must be called before the first render
    /// and again whenever constraints change.
    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec, scale: f32) -> Geometry {
        self.geometry = resolve_square(width, height, scale, self.options.line_count);
        self.paint.width = self.geometry.line_bold as f32;
        self.geometry
    }

    /// Draw the current frame.
    ///
    /// Segments are stroked outward from a small inner offset, each rotated
    /// `360 / line_count` degrees from the previous one, colored by gradient
    /// entry `(start_index + slot) % line_count`. The canvas transform is
    /// restored before returning. Renders nothing until measured.
    pub fn render(&self, canvas: &mut impl Canvas) {
        let Geometry { size, line_length, line_bold } = self.geometry;
        if size == 0 {
            return;
        }
        let line_count = self.options.line_count;
        let radius = (size / 2) as f32;
        let step = 360.0 / line_count as f32;
        let inner = (line_bold / 2) as f32;

        canvas.save();
        // Lead with one step so the first segment drawn sits at the top.
        canvas.rotate(step, radius, radius);
        for slot in 0..line_count {
            let mut paint = self.paint;
            paint.color = self.colors[(self.start_index + slot) % line_count];
            canvas.draw_line(
                Point::new(radius, inner),
                Point::new(radius, inner + line_length as f32),
                &paint,
            );
            canvas.rotate(step, radius, radius);
        }
        canvas.restore();
    }

    /// Start (or restart) the animation with an explicit cycle duration.
    ///
    /// The first call creates the driver; later calls rewind the existing
    /// one, keeping its original cycle length. [`detach`](Self::detach)
    /// first to pick a new duration.
    pub fn start_animation_with(&mut self, duration: Duration) {
        self.start_animation_at(duration, Instant::now());
    }

    /// Start the animation with the default cycle.
    pub fn start_animation(&mut self) {
        self.start_animation_with(DEFAULT_CYCLE);
    }

    /// Like [`start_animation_with`](Self::start_animation_with) but with an
    /// explicit clock, for hosts that schedule their own time base.
    pub fn start_animation_at(&mut self, duration: Duration, now: Instant) {
        match &mut self.driver {
            Some(driver) => driver.restart(now),
            None => {
                self.driver = Some(FrameDriver::new(self.options.line_count, duration, now));
            }
        }
        self.running = true;
    }

    /// Stop the animation, freezing the cursor at its last value.
    ///
    /// Safe to call when already stopped or never started.
    pub fn stop_animation(&mut self) {
        if self.driver.is_some() {
            self.running = false;
        }
    }

    /// Whether the animation is currently running.
    pub fn is_animation_started(&self) -> bool {
        self.running
    }

    /// Release the animation driver entirely.
    ///
    /// Hosts must call this when tearing the widget down while animated; a
    /// later start creates a fresh driver as if the widget were new.
    pub fn detach(&mut self) {
        self.driver = None;
        self.running = false;
    }

    /// Advance the animation to `now`.
    ///
    /// One cooperative scheduler step: when running, evaluates the driver
    /// and moves the cursor. Returns [`Tick::Changed`] only when the cursor
    /// actually moved, so hosts ticking faster than the cursor advances do
    /// not redraw redundantly.
    pub fn tick(&mut self, now: Instant) -> Tick {
        if !self.running {
            return Tick::Unchanged;
        }
        match self.driver.as_mut().and_then(|driver| driver.step(now)) {
            Some(cursor) => {
                self.start_index = cursor;
                Tick::Changed
            }
            None => Tick::Unchanged,
        }
    }
}

impl Default for SpinnerView {
    fn default() -> Self {
        Self::new(SpinnerOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::dip_to_px;
    use crate::render::{LinePaint, Pixmap, Point, RasterCanvas, StrokeCap};

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn measured(size: u32) -> SpinnerView {
        let mut spinner = SpinnerView::default();
        spinner.measure(MeasureSpec::Exactly(size), MeasureSpec::Exactly(size), 1.0);
        spinner
    }

    fn render_to_pixmap(spinner: &SpinnerView) -> Pixmap {
        let size = spinner.geometry().size;
        let mut pixmap = Pixmap::new(size, size);
        let mut canvas = RasterCanvas::new(&mut pixmap);
        spinner.render(&mut canvas);
        pixmap
    }

    #[test]
    fn gradient_matches_styling() {
        let spinner = SpinnerView::default();
        assert_eq!(spinner.gradient().len(), 12);
        assert_eq!(spinner.gradient()[11], Color::WHITE);
    }

    #[test]
    fn measure_updates_stroke_width() {
        let spinner = measured(48);
        assert_eq!(spinner.geometry(), Geometry { size: 48, line_length: 8, line_bold: 4 });
        assert_eq!(spinner.paint.width, 4.0);
    }

    #[test]
    fn render_before_measure_draws_nothing() {
        let spinner = SpinnerView::default();
        let mut pixmap = Pixmap::new(8, 8);
        let mut canvas = RasterCanvas::new(&mut pixmap);
        spinner.render(&mut canvas);
        assert_eq!(pixmap, Pixmap::new(8, 8));
    }

    #[test]
    fn render_paints_the_ring_but_not_the_corners() {
        let spinner = measured(48);
        let pixmap = render_to_pixmap(&spinner);

        let painted = (0..48)
            .flat_map(|y| (0..48).map(move |x| (x, y)))
            .filter(|&(x, y)| pixmap.pixel(x, y).a > 0)
            .count();
        assert!(painted > 0, "expected the ring to paint pixels");

        for &(x, y) in &[(0, 0), (47, 0), (0, 47), (47, 47)] {
            assert_eq!(pixmap.pixel(x, y), Color::TRANSPARENT, "corner ({x}, {y})");
        }
        // The very center stays clear: segments start at an inner offset.
        assert_eq!(pixmap.pixel(24, 24), Color::TRANSPARENT);
    }

    #[test]
    fn render_leaves_the_canvas_transform_restored() {
        let spinner = measured(48);
        let mut pixmap = Pixmap::new(48, 48);
        let mut canvas = RasterCanvas::new(&mut pixmap);
        spinner.render(&mut canvas);

        // A line drawn afterwards must not inherit the spinner's rotation:
        // only an unrotated stroke can cover the whole top row.
        let paint = LinePaint { color: Color::rgb(255, 0, 0), width: 1.0, cap: StrokeCap::Butt };
        canvas.draw_line(Point::new(0.0, 0.5), Point::new(48.0, 0.5), &paint);
        assert_eq!(pixmap.pixel(2, 0).r, 255);
        assert_eq!(pixmap.pixel(45, 0).r, 255);
    }

    #[test]
    fn cursor_shifts_the_slot_colors() {
        let mut spinner = measured(48);
        let before = render_to_pixmap(&spinner);

        let start = Instant::now();
        spinner.start_animation_at(millis(1200), start);
        spinner.tick(start + millis(550));
        assert_ne!(spinner.start_index(), 0);
        let after = render_to_pixmap(&spinner);
        assert_ne!(before, after);
    }

    #[test]
    fn stop_is_idempotent_and_freezes_the_cursor() {
        let start = Instant::now();
        let mut spinner = measured(48);
        spinner.start_animation_at(millis(1200), start);
        spinner.tick(start + millis(550));
        let frozen = spinner.start_index();

        spinner.stop_animation();
        assert!(!spinner.is_animation_started());
        spinner.stop_animation();
        assert!(!spinner.is_animation_started());

        assert_eq!(spinner.tick(start + millis(900)), Tick::Unchanged);
        assert_eq!(spinner.start_index(), frozen);
    }

    #[test]
    fn stop_without_a_driver_is_a_no_op() {
        let mut spinner = SpinnerView::default();
        spinner.stop_animation();
        assert!(!spinner.is_animation_started());
    }

    #[test]
    fn restart_keeps_the_original_cycle_length() {
        let start = Instant::now();
        let mut spinner = measured(48);
        spinner.start_animation_at(millis(1200), start);
        spinner.tick(start);

        // Restarting rewinds the clock but keeps the 1200ms cycle, so half
        // a cycle after the restart the cursor sits at slot 6.
        spinner.start_animation_at(millis(100), start + millis(400));
        spinner.tick(start + millis(1000));
        assert_eq!(spinner.start_index(), 6);
    }

    #[test]
    fn detach_then_restart_behaves_like_a_fresh_widget() {
        let start = Instant::now();
        let mut spinner = measured(48);
        spinner.start_animation_at(millis(1200), start);
        spinner.tick(start + millis(550));
        assert!(spinner.is_animation_started());

        spinner.detach();
        assert!(!spinner.is_animation_started());
        spinner.detach();

        // A fresh driver honors the new duration.
        spinner.start_animation_at(millis(1000), start + millis(600));
        assert!(spinner.is_animation_started());
        assert_eq!(spinner.tick(start + millis(1100)), Tick::Changed);
        assert_eq!(spinner.start_index(), 6);
    }

    #[test]
    fn lifecycle_end_to_end() {
        let options = SpinnerOptions {
            line_count: 12,
            start_color: Color::from_argb_u32(0xFFFFFFFF),
            end_color: Color::from_argb_u32(0x00000000),
        };
        let mut spinner = SpinnerView::new(options);
        let geometry =
            spinner.measure(MeasureSpec::AtMost(dip_to_px(40.0, 1.0)), MeasureSpec::Unspecified, 1.0);
        assert_eq!(geometry.size, 40);

        spinner.start_animation_with(millis(1500));
        assert!(spinner.is_animation_started());

        spinner.detach();
        assert!(!spinner.is_animation_started());

        spinner.start_animation();
        assert!(spinner.is_animation_started());
    }
}
