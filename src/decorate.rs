//! Range projection and decoration passes
//!
//! [`project`] flattens the token tree of one text node into tagged ranges
//! with character offsets. A [`Decorator`] runs tokenize + project over
//! every text node a [`Document`] exposes, recomputing everything each pass.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::syntax::{text_len, tokenize, Grammar, Token};

/// Child indices from the document root down to a text node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodePath(pub Vec<usize>);

impl From<Vec<usize>> for NodePath {
    fn from(path: Vec<usize>) -> Self {
        Self(path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A leaf text node as seen by the decorator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode<'a> {
    pub path: NodePath,
    pub text: &'a str,
}

/// Anything that can list its text nodes with their paths
pub trait Document {
    /// Every leaf text node currently visible, in document order
    fn text_nodes(&self) -> Vec<TextNode<'_>>;
}

/// A decorated span of one text node.
///
/// Offsets count chars from the start of the node's text; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Range {
    /// Categories that are true over this span
    pub tags: BTreeSet<String>,
    /// Alias of the outermost token, for style fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub start: usize,
    pub end: usize,
    pub path: NodePath,
}

impl Range {
    /// Whether `category` is true over this range
    pub fn is(&self, category: &str) -> bool {
        self.tags.contains(category)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this range covers a char offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Which categories a range carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagPolicy {
    /// Only the top-level token's category. Nested matches are not tagged.
    #[default]
    Outermost,
    /// The top-level category plus every category nested inside it
    Nested,
}

/// Flatten a token sequence into ranges relative to `path`.
///
/// Plain tokens emit nothing. Each structured top-level token emits exactly
/// one range, so ranges come out ordered by start and never overlap.
pub fn project(tokens: &[Token], path: &NodePath, policy: TagPolicy) -> Vec<Range> {
    let mut ranges = Vec::new();
    let mut offset = 0;

    for token in tokens {
        let length = text_len(token);
        let end = offset + length;

        if let Some(category) = token.category() {
            let mut tags = BTreeSet::new();
            match policy {
                TagPolicy::Outermost => {
                    tags.insert(category.to_string());
                }
                TagPolicy::Nested => token.collect_categories(&mut tags),
            }
            ranges.push(Range {
                tags,
                alias: token.alias().map(str::to_string),
                start: offset,
                end,
                path: path.clone(),
            });
        }

        offset = end;
    }

    ranges
}

/// Runs decoration passes against a shared grammar
#[derive(Debug, Clone)]
pub struct Decorator {
    grammar: Arc<Grammar>,
    policy: TagPolicy,
}

impl Decorator {
    pub fn new(grammar: Arc<Grammar>) -> Self {
        Self {
            grammar,
            policy: TagPolicy::default(),
        }
    }

    /// Builder: set how nested categories are tagged
    pub fn with_policy(mut self, policy: TagPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn policy(&self) -> TagPolicy {
        self.policy
    }

    /// Tokenize and project a single text node
    pub fn decorate_node(&self, path: &NodePath, text: &str) -> Vec<Range> {
        let tokens = tokenize(text, &self.grammar);
        let ranges = project(&tokens, path, self.policy);
        tracing::trace!(%path, tokens = tokens.len(), ranges = ranges.len(), "decorated node");
        ranges
    }

    /// One full decoration pass over every text node of `doc`
    pub fn decorate<D: Document + ?Sized>(&self, doc: &D) -> Vec<Range> {
        let _span = tracing::debug_span!("decorate").entered();

        let nodes = doc.text_nodes();
        let ranges: Vec<Range> = nodes
            .iter()
            .flat_map(|node| self.decorate_node(&node.path, node.text))
            .collect();

        tracing::debug!(nodes = nodes.len(), ranges = ranges.len(), "decoration pass complete");
        ranges
    }
}
