use super::table::center_text;

/// Columns a bordered row spends outside its label and value cells:
/// `"│ "`, `" │ "` and `" │"`.
pub(crate) const BORDERS_AND_PADDING: usize = 7;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Divider {
    Top,
    Middle,
    Bottom,
}

impl Divider {
    fn glyphs(self) -> (char, char, char) {
        match self {
            Divider::Top => ('├', '┬', '┤'),
            Divider::Middle => ('├', '┼', '┤'),
            Divider::Bottom => ('└', '┴', '┘'),
        }
    }
}

/// Geometry of a bordered report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    /// Full line width in columns, borders included.
    pub total: usize,
    /// Column of the inner border between label and value.
    pub junction: usize,
}

pub(crate) fn frame_for(label_width: usize, data_width: usize) -> Frame {
    Frame {
        total: data_width + label_width + BORDERS_AND_PADDING,
        junction: label_width + 3,
    }
}

impl Frame {
    fn inner(&self) -> usize {
        self.total.saturating_sub(2)
    }

    /// The two-line cap above the titles.
    pub(crate) fn header(&self) -> [String; 2] {
        let inner = self.inner();
        [
            format!("┌{}┐", "┬".repeat(inner)),
            format!("├{}┤", "┴".repeat(inner)),
        ]
    }

    pub(crate) fn title_row(&self, text: &str) -> String {
        format!("│{}│", center_text(text, self.inner()))
    }

    pub(crate) fn divider(&self, kind: Divider) -> String {
        let (left, mid, right) = kind.glyphs();
        let before = self.junction.saturating_sub(1);
        let after = self.total.saturating_sub(self.junction + 2);
        let mut line = String::with_capacity(self.total * 3);
        line.push(left);
        line.push_str(&"─".repeat(before));
        line.push(mid);
        line.push_str(&"─".repeat(after));
        line.push(right);
        line
    }

    /// Joins already-sized label and value cells into a bordered row.
    pub(crate) fn row(&self, label_cell: &str, value_cell: &str) -> String {
        format!("│ {label_cell} │ {value_cell} │")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::width::display_width;

    #[test]
    fn test_frame_geometry() {
        assert_eq!(frame_for(13, 20), Frame { total: 40, junction: 16 });
        assert_eq!(frame_for(5, 32), Frame { total: 44, junction: 8 });
    }

    #[test]
    fn test_lines_share_total_width() {
        let frame = frame_for(13, 24);
        let [top, under] = frame.header();
        let row = frame.row(&" ".repeat(13), &" ".repeat(24));
        for line in [
            top,
            under,
            frame.title_row("SYSTEM STATUS REPORT"),
            frame.divider(Divider::Top),
            frame.divider(Divider::Middle),
            frame.divider(Divider::Bottom),
            row,
        ] {
            assert_eq!(display_width(&line), frame.total, "{line}");
        }
    }

    #[test]
    fn test_junction_lines_up_with_row_border() {
        let frame = frame_for(13, 20);
        let divider = frame.divider(Divider::Middle);
        let junction = divider.chars().position(|ch| ch == '┼');
        assert_eq!(junction, Some(16));

        let row = frame.row(&format!("{:13}", "OS"), &" ".repeat(20));
        assert_eq!(row.chars().nth(16), Some('│'));
    }

    #[test]
    fn test_divider_corners() {
        let frame = frame_for(5, 20);
        let bottom = frame.divider(Divider::Bottom);
        assert!(bottom.starts_with('└'));
        assert!(bottom.ends_with('┘'));
        assert_eq!(bottom.chars().filter(|ch| *ch == '┴').count(), 1);

        let [top, under] = frame.header();
        assert!(top.starts_with('┌') && top.ends_with('┐'));
        assert!(under.starts_with('├') && under.ends_with('┤'));
    }
}
