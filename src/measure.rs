/// Size the widget takes when the host imposes no constraint, in
/// density-independent units.
pub const DEFAULT_SIZE_DIP: f32 = 40.0;

/// A layout constraint for one axis, as proposed by the hosting layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The host imposes no limit; the widget picks its own size.
    Unspecified,
    /// The widget may be at most this many device pixels.
    AtMost(u32),
    /// The widget must be exactly this many device pixels.
    Exactly(u32),
}

impl MeasureSpec {
    fn resolve(self, default_px: u32) -> u32 {
        match self {
            MeasureSpec::Unspecified => default_px,
            MeasureSpec::AtMost(size) | MeasureSpec::Exactly(size) => size,
        }
    }
}

/// Convert density-independent units to device pixels.
pub fn dip_to_px(dip: f32, scale: f32) -> u32 {
    (dip * scale).max(0.0).round() as u32
}

/// Resolved square geometry of a spinner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Geometry {
    /// Side of the square, in device pixels. Width and height are always
    /// equal.
    pub size: u32,
    /// Length of each radial segment.
    pub line_length: u32,
    /// Stroke width and cap radius of each segment.
    pub line_bold: u32,
}

/// Resolve a square size from per-axis constraints and derive the segment
/// geometry from it.
pub(crate) fn resolve_square(
    width: MeasureSpec,
    height: MeasureSpec,
    scale: f32,
    line_count: usize,
) -> Geometry {
    let default_px = dip_to_px(DEFAULT_SIZE_DIP, scale);
    // The widget is always square, whatever the host proposes per axis.
    let size = width.resolve(default_px).min(height.resolve(default_px));
    Geometry {
        size,
        line_length: size / 6,
        line_bold: size / line_count.max(1) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MeasureSpec::Unspecified, MeasureSpec::Unspecified, 40)]
    #[case(MeasureSpec::Exactly(60), MeasureSpec::Exactly(24), 24)]
    #[case(MeasureSpec::AtMost(48), MeasureSpec::Unspecified, 40)]
    #[case(MeasureSpec::Unspecified, MeasureSpec::AtMost(16), 16)]
    #[case(MeasureSpec::AtMost(100), MeasureSpec::Exactly(72), 72)]
    fn resolved_size_is_square(
        #[case] width: MeasureSpec,
        #[case] height: MeasureSpec,
        #[case] expected: u32,
    ) {
        let geometry = resolve_square(width, height, 1.0, 12);
        assert_eq!(geometry.size, expected);
    }

    #[test]
    fn unspecified_uses_scaled_default() {
        let geometry = resolve_square(MeasureSpec::Unspecified, MeasureSpec::Unspecified, 2.5, 12);
        assert_eq!(geometry.size, 100);
    }

    #[test]
    fn derived_geometry() {
        let geometry = resolve_square(MeasureSpec::Exactly(48), MeasureSpec::Exactly(48), 1.0, 12);
        assert_eq!(geometry.line_length, 8);
        assert_eq!(geometry.line_bold, 4);
    }

    #[test]
    fn measurement_is_idempotent() {
        let first = resolve_square(MeasureSpec::AtMost(40), MeasureSpec::Unspecified, 1.0, 12);
        let second = resolve_square(MeasureSpec::AtMost(40), MeasureSpec::Unspecified, 1.0, 12);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_line_count_does_not_divide_by_zero() {
        let geometry = resolve_square(MeasureSpec::Exactly(40), MeasureSpec::Exactly(40), 1.0, 0);
        assert_eq!(geometry.line_bold, 40);
    }
}
