use crossterm::style::{Color, Stylize};

pub(crate) const FILLED: char = '█';
pub(crate) const EMPTY: char = '░';

/// Color band of a utilization bar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BarTier {
    Low,
    Medium,
    High,
}

impl BarTier {
    pub(crate) fn from_percent(percent: f64) -> Self {
        if percent >= 75.0 {
            BarTier::High
        } else if percent >= 50.0 {
            BarTier::Medium
        } else {
            BarTier::Low
        }
    }

    fn color(self) -> Color {
        match self {
            BarTier::Low => Color::Green,
            BarTier::Medium => Color::Yellow,
            BarTier::High => Color::Red,
        }
    }
}

/// Number of filled cells for `percent` on a bar `width` cells long.
/// Values above 100 (multi-core load) saturate; negative and NaN give 0.
pub(crate) fn filled_cells(percent: f64, width: usize) -> usize {
    let raw = (percent / 100.0 * width as f64).floor();
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    (raw as usize).min(width)
}

pub(crate) fn draw_bar(percent: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let filled = filled_cells(percent, width);
    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(width - filled));
    bar
}

/// Same glyphs as [`draw_bar`], wrapped in the tier color.
pub(crate) fn draw_colored_bar(percent: f64, width: usize) -> String {
    let bar = draw_bar(percent, width);
    if bar.is_empty() {
        return bar;
    }
    bar.with(BarTier::from_percent(percent).color()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::width::display_width;
    use proptest::prelude::*;

    fn glyphs(bar: &str) -> (usize, usize) {
        let filled = bar.chars().filter(|ch| *ch == FILLED).count();
        let empty = bar.chars().filter(|ch| *ch == EMPTY).count();
        (filled, empty)
    }

    #[test]
    fn test_bar_floor_rounding() {
        assert_eq!(glyphs(&draw_bar(37.5, 20)), (7, 13));
        assert_eq!(glyphs(&draw_bar(99.9, 10)), (9, 1));
    }

    #[test]
    fn test_bar_extremes() {
        assert_eq!(draw_bar(0.0, 4), "░░░░");
        assert_eq!(draw_bar(100.0, 4), "████");
        assert_eq!(draw_bar(150.0, 4), draw_bar(100.0, 4));
        assert_eq!(draw_bar(-20.0, 4), draw_bar(0.0, 4));
        assert_eq!(draw_bar(f64::NAN, 4), draw_bar(0.0, 4));
        assert_eq!(draw_bar(50.0, 0), "");
    }

    #[test]
    fn test_tiers() {
        assert_eq!(BarTier::from_percent(10.0), BarTier::Low);
        assert_eq!(BarTier::from_percent(50.0), BarTier::Medium);
        assert_eq!(BarTier::from_percent(74.9), BarTier::Medium);
        assert_eq!(BarTier::from_percent(75.0), BarTier::High);
        assert_eq!(BarTier::from_percent(400.0), BarTier::High);
    }

    #[test]
    fn test_colored_bar_keeps_width() {
        let bar = draw_colored_bar(80.0, 12);
        assert_eq!(display_width(&bar), 12);
        assert_eq!(glyphs(&bar), (9, 3));
    }

    proptest! {
        #[test]
        fn prop_bar_has_width_glyphs(percent in 0.0f64..=1000.0, width in 0usize..64) {
            let (filled, empty) = glyphs(&draw_bar(percent, width));
            prop_assert_eq!(filled + empty, width);
            prop_assert_eq!(display_width(&draw_bar(percent, width)), width);
        }
    }
}
