//! Style types for rendering decorated ranges
//!
//! A [`Theme`] maps categories to [`Style`]s. Renderers look a range up by
//! its tags first and fall back to the alias of the rule that produced it.

use std::collections::HashMap;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Faint text
    pub dim: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a style with just background color
    pub fn bg(color: Color) -> Self {
        Self {
            bg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Combine two styles: attributes accumulate, `other`'s colors win when set
    pub fn merge(self, other: Style) -> Self {
        Self {
            fg: if other.fg == Color::Default { self.fg } else { other.fg },
            bg: if other.bg == Color::Default { self.bg } else { other.bg },
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            dim: self.dim || other.dim,
            reverse: self.reverse || other.reverse,
        }
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Category to style mapping
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// Create a theme with no styles
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder: style a category
    pub fn with(mut self, category: &str, style: Style) -> Self {
        self.set(category, style);
        self
    }

    pub fn set(&mut self, category: &str, style: Style) {
        self.styles.insert(category.to_string(), style);
    }

    pub fn get(&self, category: &str) -> Option<Style> {
        self.styles.get(category).copied()
    }

    /// Style for a range tagged with `tags`, produced by a rule with `alias`.
    ///
    /// Styles of every known tag are merged. If no tag is known the alias is
    /// tried, then the default style.
    pub fn style_for<'a>(
        &self,
        tags: impl IntoIterator<Item = &'a str>,
        alias: Option<&str>,
    ) -> Style {
        let merged = tags
            .into_iter()
            .filter_map(|tag| self.get(tag))
            .reduce(Style::merge);

        merged
            .or_else(|| alias.and_then(|alias| self.get(alias)))
            .unwrap_or_default()
    }

    /// Styles for the markdown vocabulary plus the aliases its rules declare
    pub fn markdown() -> Self {
        Self::empty()
            .with("bold", Style::default().with_bold())
            .with("italic", Style::default().with_italic())
            .with("underlined", Style::default().with_underline())
            .with("title", Style::fg(Color::BrightWhite).with_bold())
            .with("list", Style::fg(Color::BrightYellow))
            .with("hr", Style::fg(Color::BrightBlack).with_dim())
            .with("blockquote", Style::fg(Color::BrightBlack).with_italic())
            .with("code", Style::bg(Color::BrightBlack))
            .with("url", Style::fg(Color::Blue).with_underline())
            // Alias fallbacks
            .with("important", Style::default().with_bold())
            .with("keyword", Style::fg(Color::Magenta))
            .with("punctuation", Style::fg(Color::BrightBlack))
            .with("comment", Style::fg(Color::BrightBlack).with_italic())
            .with("tag", Style::fg(Color::Cyan))
            .with("entity", Style::fg(Color::BrightRed))
    }
}
