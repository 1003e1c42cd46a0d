use std::ops::Range;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// SGR reset appended when a colored string is cut short.
pub(crate) const RESET: &str = "\u{1b}[0m";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Unit {
    /// `closed` is false for a sequence cut off by the end of input or by a
    /// byte that cannot follow ESC.
    Escape { closed: bool },
    Glyph(usize),
}

/// Splits a byte string into escape sequences and visible glyphs.
struct Units<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Units<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Iterator for Units<'_> {
    type Item = (Range<usize>, Unit);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let lead = *self.bytes.get(start)?;

        let (end, unit) = if lead == ESC {
            let (end, closed) = escape_end(self.bytes, start);
            (end, Unit::Escape { closed })
        } else if lead < 0x80 {
            (start + 1, Unit::Glyph(1))
        } else {
            match sequence_len(self.bytes, start) {
                Some(len) => (start + len, Unit::Glyph(glyph_width(self.bytes, start, len))),
                // Lone continuation byte or broken lead byte.
                None => (start + 1, Unit::Glyph(1)),
            }
        };

        self.pos = end;
        Some((start..end, unit))
    }
}

/// Returns the length of a well-formed multi-byte sequence starting at `start`.
fn sequence_len(bytes: &[u8], start: usize) -> Option<usize> {
    let len = match bytes[start] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return None,
    };
    let tail = bytes.get(start + 1..start + len)?;
    tail.iter()
        .all(|b| (0x80..=0xBF).contains(b))
        .then_some(len)
}

fn glyph_width(bytes: &[u8], start: usize, len: usize) -> usize {
    match len {
        2 if is_combining_mark(bytes[start], bytes[start + 1]) => 0,
        2 | 3 => 1,
        _ => 2,
    }
}

/// U+0300..=U+036F encodes as `CC 80..BF` and `CD 80..AF`.
fn is_combining_mark(lead: u8, cont: u8) -> bool {
    lead == 0xCC || (lead == 0xCD && cont <= 0xAF)
}

/// Finds the end of the escape sequence starting at `start` and whether it
/// was properly closed. An unterminated sequence runs to the end of the input.
fn escape_end(bytes: &[u8], start: usize) -> (usize, bool) {
    let len = bytes.len();
    let mut i = start + 1;
    match bytes.get(i) {
        None => (len, false),
        Some(b'[') => {
            i += 1;
            while i < len {
                let b = bytes[i];
                i += 1;
                if (0x40..=0x7E).contains(&b) {
                    return (i, true);
                }
            }
            (len, false)
        }
        Some(b']') => {
            i += 1;
            while i < len {
                match bytes[i] {
                    BEL => return (i + 1, true),
                    ESC if bytes.get(i + 1) == Some(&b'\\') => return (i + 2, true),
                    ESC => return (i, true),
                    _ => i += 1,
                }
            }
            (len, false)
        }
        Some(b) if *b < 0x80 => (i + 1, true),
        Some(_) => (i, false),
    }
}

/// Number of terminal columns `text` occupies.
///
/// Widths come from the UTF-8 byte class of each glyph rather than an
/// East-Asian-width table: 2-byte sequences are narrow except combining
/// diacritics (zero-width), 3-byte sequences take one column and 4-byte
/// sequences two. ANSI escape sequences count for nothing.
pub(crate) fn display_width(text: &str) -> usize {
    display_width_bytes(text.as_bytes())
}

/// Byte-level variant of [`display_width`] that also accepts malformed UTF-8.
pub(crate) fn display_width_bytes(bytes: &[u8]) -> usize {
    Units::new(bytes)
        .map(|(_, unit)| match unit {
            Unit::Escape { .. } => 0,
            Unit::Glyph(width) => width,
        })
        .sum()
}

/// Keeps the longest prefix of `text` that fits in `max_cols` columns.
///
/// Escape sequences before the cut are preserved; if any were kept and the
/// text was actually shortened, a reset is appended so color does not bleed
/// into whatever follows. Unclosed sequences are dropped: a terminal would
/// swallow whatever is printed after them.
pub(crate) fn truncate_to_width(text: &str, max_cols: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut styled = false;
    let mut cut = false;

    for (range, unit) in Units::new(text.as_bytes()) {
        let piece = text.get(range).unwrap_or_default();
        match unit {
            Unit::Escape { closed: false } => {}
            Unit::Escape { closed: true } => {
                styled = true;
                out.push_str(piece);
            }
            Unit::Glyph(width) => {
                if used + width > max_cols {
                    cut = true;
                    break;
                }
                used += width;
                out.push_str(piece);
            }
        }
    }

    if cut && styled {
        out.push_str(RESET);
    }
    out
}

/// Right-pads `text` with spaces up to `cols` columns. Unclosed escape
/// sequences are dropped so the padding stays visible.
pub(crate) fn pad_to_width(text: &str, cols: usize) -> String {
    let width = display_width(text);
    let mut out = String::with_capacity(text.len() + cols.saturating_sub(width));
    out.push_str(&drop_unclosed_escapes(text));
    out.extend(std::iter::repeat(' ').take(cols.saturating_sub(width)));
    out
}

/// `text` without any escape sequence that is never closed.
pub(crate) fn drop_unclosed_escapes(text: &str) -> String {
    truncate_to_width(text, usize::MAX)
}
