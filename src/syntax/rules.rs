//! Pattern rules for decoration grammars
//!
//! A [`Rule`] is one alternative pattern for a category. It may declare an
//! alias used as a rendering fallback, a lookbehind prefix, and a nested
//! grammar that re-tokenizes whatever the rule matched.

use super::grammar::Grammar;
use crate::error::{DecorError, Result};

/// Compiled regex behind a rule
///
/// Patterns that the `regex` crate accepts stay on its linear-time engine.
/// Backreferences and look-around fall back to `fancy_regex`.
#[derive(Debug, Clone)]
pub enum Pattern {
    Plain(regex::Regex),
    Fancy(fancy_regex::Regex),
}

impl Pattern {
    /// Compile a pattern, preferring the `regex` engine
    pub fn new(pattern: &str) -> Result<Self> {
        if let Ok(regex) = regex::Regex::new(pattern) {
            return Ok(Pattern::Plain(regex));
        }
        fancy_regex::Regex::new(pattern)
            .map(Pattern::Fancy)
            .map_err(|source| DecorError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Source text of the pattern
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Plain(regex) => regex.as_str(),
            Pattern::Fancy(regex) => regex.as_str(),
        }
    }

    /// Whether the pattern needed the backtracking engine
    pub fn is_fancy(&self) -> bool {
        matches!(self, Pattern::Fancy(_))
    }

    /// Locate the leftmost match starting at or after `pos`.
    ///
    /// Returns the whole match and the end of capture group 1, if it took part.
    /// `^` and `\b` see the whole of `text`, not just the part from `pos`.
    fn locate(&self, text: &str, pos: usize) -> Option<(usize, usize, Option<usize>)> {
        match self {
            Pattern::Plain(regex) => {
                let caps = regex.captures_at(text, pos)?;
                let whole = caps.get(0)?;
                Some((whole.start(), whole.end(), caps.get(1).map(|g| g.end())))
            }
            Pattern::Fancy(regex) => match regex.captures_from_pos(text, pos) {
                Ok(caps) => {
                    let caps = caps?;
                    let whole = caps.get(0)?;
                    Some((whole.start(), whole.end(), caps.get(1).map(|g| g.end())))
                }
                Err(err) => {
                    tracing::warn!(pattern = regex.as_str(), %err, "pattern failed while matching");
                    None
                }
            },
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A match found by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Byte offset where the regex match began, lookbehind prefix included
    pub from: usize,
    /// Byte offset where the token begins
    pub start: usize,
    /// Byte offset where the token ends (exclusive)
    pub end: usize,
}

/// A single pattern rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pattern: Pattern,
    /// Capture group 1 is context only and stays outside the token
    lookbehind: bool,
    alias: Option<String>,
    inside: Option<Grammar>,
}

impl Rule {
    /// Create a new rule from a regex pattern
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            lookbehind: false,
            alias: None,
            inside: None,
        })
    }

    /// Builder: exclude capture group 1 from the token
    pub fn with_lookbehind(mut self) -> Self {
        self.lookbehind = true;
        self
    }

    /// Builder: set the alias category
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Builder: tokenize matches again with a nested grammar
    pub fn with_inside(mut self, grammar: Grammar) -> Self {
        self.inside = Some(grammar);
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn lookbehind(&self) -> bool {
        self.lookbehind
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn inside(&self) -> Option<&Grammar> {
        self.inside.as_ref()
    }

    /// Nested grammar, created empty on first use
    pub(crate) fn inside_mut(&mut self) -> &mut Grammar {
        self.inside.get_or_insert_with(Grammar::new)
    }

    /// Find the first non-empty match at or after `start`
    pub fn find_at(&self, text: &str, start: usize) -> Option<Hit> {
        let mut pos = start;
        while pos <= text.len() {
            let (from, end, group_end) = self.pattern.locate(text, pos)?;
            let token_start = if self.lookbehind {
                group_end.unwrap_or(from).max(from)
            } else {
                from
            };
            if end > token_start {
                return Some(Hit {
                    from,
                    start: token_start,
                    end,
                });
            }
            // Empty token: retry one character further on
            let next = end.max(pos);
            pos = next + text[next..].chars().next()?.len_utf8();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_at() {
        let rule = Rule::new(r"\d+").unwrap();
        assert_eq!(rule.find_at("abc 123 def", 0).map(|h| (h.start, h.end)), Some((4, 7)));
        assert_eq!(rule.find_at("abc 123 def", 5).map(|h| (h.start, h.end)), Some((5, 7)));
        assert_eq!(rule.find_at("no numbers", 0), None);
        assert_eq!(rule.find_at("12", 2), None);
    }

    #[test]
    fn test_lookbehind_excludes_group() {
        let rule = Rule::new(r"(^|[^\\])\*[^*]+\*").unwrap().with_lookbehind();
        let hit = rule.find_at("a *b*", 0).unwrap();
        assert_eq!(hit.from, 1);
        assert_eq!((hit.start, hit.end), (2, 5));

        // Escaped marker cannot open
        assert_eq!(rule.find_at(r"\*b*", 0), None);
    }

    #[test]
    fn test_empty_matches_skipped() {
        let rule = Rule::new(r"x*").unwrap();
        let hit = rule.find_at("abxx", 0).unwrap();
        assert_eq!((hit.start, hit.end), (2, 4));
        assert_eq!(rule.find_at("é", 0), None);
    }

    #[test]
    fn test_fancy_fallback() {
        let plain = Pattern::new(r"\*\*[^*]+\*\*").unwrap();
        assert!(!plain.is_fancy());

        let fancy = Pattern::new(r"([*-])(?:[\t ]*\1){2,}").unwrap();
        assert!(fancy.is_fancy());

        let rule = Rule::new(r"([*-])(?:[\t ]*\1){2,}").unwrap();
        assert!(rule.find_at("* * *", 0).is_some());
        assert!(rule.find_at("* - *", 0).is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::new(r"(unclosed").unwrap_err();
        assert!(matches!(err, DecorError::InvalidPattern { .. }));
        assert!(err.to_string().contains("(unclosed"));
    }
}
