//! Token trees produced by the tokenizer
//!
//! A token is plain text, a categorized leaf, or a categorized node whose
//! content was re-tokenized by a nested grammar. Concatenating the literal
//! text of a token sequence always reproduces the tokenized input.

use std::collections::BTreeSet;
use std::fmt;

/// One unit of classified or unclassified text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Unstyled text
    Plain(String),
    /// A match with no nested grammar
    Leaf {
        category: String,
        alias: Option<String>,
        text: String,
    },
    /// A match re-tokenized by the rule's nested grammar
    Nested {
        category: String,
        alias: Option<String>,
        children: Vec<Token>,
    },
}

impl Token {
    /// Create a plain token
    pub fn plain(text: &str) -> Self {
        Token::Plain(text.to_string())
    }

    /// Create a leaf token without alias
    pub fn leaf(category: &str, text: &str) -> Self {
        Token::Leaf {
            category: category.to_string(),
            alias: None,
            text: text.to_string(),
        }
    }

    /// Category of a structured token, `None` for plain text
    pub fn category(&self) -> Option<&str> {
        match self {
            Token::Plain(_) => None,
            Token::Leaf { category, .. } | Token::Nested { category, .. } => Some(category),
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Token::Plain(_) => None,
            Token::Leaf { alias, .. } | Token::Nested { alias, .. } => alias.as_deref(),
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Token::Plain(_))
    }

    /// The exact source text this token was cut from
    pub fn literal(&self) -> String {
        let mut out = String::new();
        self.push_literal(&mut out);
        out
    }

    fn push_literal(&self, out: &mut String) {
        match self {
            Token::Plain(text) | Token::Leaf { text, .. } => out.push_str(text),
            Token::Nested { children, .. } => {
                for child in children {
                    child.push_literal(out);
                }
            }
        }
    }

    /// Add the categories of every structured token in this tree to `out`
    pub fn collect_categories(&self, out: &mut BTreeSet<String>) {
        if let Some(category) = self.category() {
            out.insert(category.to_string());
        }
        if let Token::Nested { children, .. } = self {
            for child in children {
                child.collect_categories(out);
            }
        }
    }
}

/// Length in chars of the text a token was matched from.
///
/// Nested content is summed, so the result does not depend on how deeply
/// a match was re-tokenized.
pub fn text_len(token: &Token) -> usize {
    match token {
        Token::Plain(text) | Token::Leaf { text, .. } => text.chars().count(),
        Token::Nested { children, .. } => children.iter().map(text_len).sum(),
    }
}

/// Concatenated literal text of a token sequence
pub fn literal(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.push_literal(&mut out);
    }
    out
}

/// Indented tree view, one token per line
pub struct TokenTree<'a>(pub &'a [Token]);

impl TokenTree<'_> {
    fn write(f: &mut fmt::Formatter<'_>, tokens: &[Token], depth: usize) -> fmt::Result {
        for token in tokens {
            let indent = depth * 2;
            match token {
                Token::Plain(text) => writeln!(f, "{:indent$}{:?}", "", text)?,
                Token::Leaf { category, alias, text } => {
                    write!(f, "{:indent$}{}", "", category)?;
                    if let Some(alias) = alias {
                        write!(f, " ({})", alias)?;
                    }
                    writeln!(f, " {:?}", text)?;
                }
                Token::Nested { category, alias, children } => {
                    write!(f, "{:indent$}{}", "", category)?;
                    if let Some(alias) = alias {
                        write!(f, " ({})", alias)?;
                    }
                    writeln!(f)?;
                    Self::write(f, children, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TokenTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write(f, self.0, 0)
    }
}
