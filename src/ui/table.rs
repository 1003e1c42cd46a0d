use super::width::{display_width, drop_unclosed_escapes, pad_to_width, truncate_to_width};

pub(crate) const ELLIPSIS: &str = "...";

/// Fixed-width label cell: long labels are cut with an ellipsis, short ones
/// padded, so the result always fits `max_len` columns.
pub(crate) fn normalize_label(label: &str, max_len: usize) -> String {
    if display_width(label) > max_len {
        // a wide glyph straddling the cut leaves a column short
        pad_to_width(&ellipsize(label, max_len.saturating_sub(ELLIPSIS.len())), max_len)
    } else {
        pad_to_width(label, max_len)
    }
}

/// Cuts values that reach `max_data_len` columns down to
/// `max_data_len - 4` columns plus an ellipsis. Shorter values pass through
/// minus any unclosed escape sequence.
pub(crate) fn fit_value(value: &str, max_data_len: usize) -> String {
    if display_width(value) >= max_data_len {
        ellipsize(value, max_data_len.saturating_sub(ELLIPSIS.len() + 1))
    } else {
        drop_unclosed_escapes(value)
    }
}

/// Value cell of a bordered row: fitted, then padded to the column width.
pub(crate) fn fit_left(value: &str, width: usize, max_data_len: usize) -> String {
    pad_to_width(&fit_value(value, max_data_len), width)
}

pub(crate) fn center_text(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let len = display_width(&text);
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn ellipsize(text: &str, keep_cols: usize) -> String {
    let mut out = truncate_to_width(text, keep_cols);
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_label_pads_short() {
        let label = normalize_label("HOSTNAME", 13);
        assert_eq!(label, "HOSTNAME     ");
        assert_eq!(display_width(&label), 13);
    }

    #[test]
    fn test_normalize_label_truncates_long() {
        let label = normalize_label("NETWORK INTERFACE", 13);
        assert_eq!(label, "NETWORK IN...");
        assert_eq!(display_width(&label), 13);
    }

    #[test]
    fn test_normalize_label_cut_through_wide_glyph_is_padded() {
        let label = normalize_label("a🚀🚀🚀🚀🚀🚀🚀", 13);
        assert_eq!(label, "a🚀🚀🚀🚀... ");
        assert_eq!(display_width(&label), 13);
    }

    #[test]
    fn test_fit_value_drops_trailing_open_escape() {
        assert_eq!(fit_value("\u{1b}\u{e9}abc\u{1b}[31", 32), "\u{e9}abc");
        let cell = fit_left("abc\u{1b}[31", 20, 32);
        assert_eq!(cell, format!("abc{}", " ".repeat(17)));
    }

    #[test]
    fn test_center_text_drops_open_escape() {
        assert_eq!(center_text("ab\u{1b}]0;x", 6), "  ab  ");
    }

    #[test]
    fn test_normalize_label_exact_fit_untouched() {
        assert_eq!(normalize_label("ABCDEFGHIJKLM", 13), "ABCDEFGHIJKLM");
    }

    #[test]
    fn test_fit_value_truncates_at_limit() {
        let long = "x".repeat(40);
        let fitted = fit_value(&long, 32);
        assert_eq!(fitted, format!("{}...", "x".repeat(28)));
        assert_eq!(display_width(&fitted), 31);

        // reaching the limit exactly also truncates
        let edge = "y".repeat(32);
        assert_eq!(display_width(&fit_value(&edge, 32)), 31);
        assert_eq!(fit_value("short", 32), "short");
    }

    #[test]
    fn test_fit_left_pads_truncated_values() {
        let cell = fit_left(&"z".repeat(50), 32, 32);
        assert_eq!(display_width(&cell), 32);
        assert!(cell.ends_with("... "));
    }

    #[test]
    fn test_fit_value_ellipsis_with_wide_glyphs() {
        let value = "🚀".repeat(20);
        let fitted = fit_value(&value, 32);
        assert!(fitted.ends_with(ELLIPSIS));
        assert_eq!(display_width(&fitted), 31);
    }

    #[test]
    fn test_center_text_odd_remainder_goes_right() {
        assert_eq!(center_text("ab", 7), "  ab   ");
        assert_eq!(center_text("toolong", 4), "tool");
    }

    #[test]
    fn test_center_text_measures_colored_text() {
        let centered = center_text("\u{1b}[1mTITLE\u{1b}[0m", 9);
        assert!(centered.starts_with("  \u{1b}[1m"));
        assert_eq!(display_width(&centered), 9);
    }

    proptest! {
        #[test]
        fn prop_label_width(label in "[ -~]{0,30}", max_len in 4usize..20) {
            let out = normalize_label(&label, max_len);
            if label.len() > max_len {
                prop_assert!(out.trim_end().ends_with(ELLIPSIS));
            }
            prop_assert_eq!(display_width(&out), max_len);
        }

        #[test]
        fn prop_label_width_with_wide_glyphs(label in "[a-z🚀日é]{0,20}", max_len in 4usize..20) {
            prop_assert_eq!(display_width(&normalize_label(&label, max_len)), max_len);
        }
    }
}
