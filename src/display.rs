//! Display rendering
//!
//! Paints decorated text with ANSI escapes through `crossterm::style`.

use crossterm::style::{Attribute, Color as TermColor, ContentStyle};

use crate::decorate::Range;
use crate::syntax::{Color, Style, Theme};

fn term_color(color: Color) -> Option<TermColor> {
    let color = match color {
        Color::Default => return None,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    };
    Some(color)
}

/// Convert a style to crossterm's representation
pub fn content_style(style: &Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = term_color(style.fg);
    content.background_color = term_color(style.bg);
    if style.bold {
        content.attributes.set(Attribute::Bold);
    }
    if style.italic {
        content.attributes.set(Attribute::Italic);
    }
    if style.underline {
        content.attributes.set(Attribute::Underlined);
    }
    if style.dim {
        content.attributes.set(Attribute::Dim);
    }
    if style.reverse {
        content.attributes.set(Attribute::Reverse);
    }
    content
}

/// Render one text node with its ranges.
///
/// `ranges` must belong to this node and be ordered by start, as
/// [`crate::decorate::project`] returns them. Offsets past the end are clamped.
pub fn paint(text: &str, ranges: &[Range], theme: &Theme) -> String {
    // Char offset -> byte offset, with one entry past the end
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .collect();
    let byte_at = |offset: usize| bounds[offset.min(bounds.len() - 1)];

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    for range in ranges {
        let start = byte_at(range.start).max(pos);
        let end = byte_at(range.end);
        if end <= start {
            continue;
        }
        out.push_str(&text[pos..start]);

        let style = theme.style_for(range.tags.iter().map(String::as_str), range.alias.as_deref());
        let segment = &text[start..end];
        if style.is_default() {
            out.push_str(segment);
        } else {
            out.push_str(&content_style(&style).apply(segment).to_string());
        }
        pos = end;
    }

    out.push_str(&text[pos..]);
    out
}
