use crate::color::Color;

/// Build the ordered color table for the radial segments.
///
/// Entry `line_count - 1` is `start` exactly; walking down to entry 0 each
/// color steps a further `1 / line_count` towards `end`, so the table fades
/// from a faint tail to the full start color. The draw loop walks slots in
/// increasing angular order while the cursor advances, which keeps the
/// bright end visually leading the rotation.
pub(crate) fn gradient_table(line_count: usize, start: Color, end: Color) -> Vec<Color> {
    let line_count = line_count.max(1);
    (1..=line_count)
        .map(|i| end.lerp(start, i as f32 / line_count as f32))
        .collect()
}
