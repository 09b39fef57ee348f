//! Grammar engine
//!
//! This module provides:
//! - Composable rule tables ([`Grammar`], [`Rule`])
//! - The tokenizer that turns text into token trees
//! - Built-in markup and markdown grammars and a registry to look them up
//! - Style and theme types used to render decorated ranges

mod builtin;
mod grammar;
mod registry;
mod rules;
mod style;
mod tokenizer;
mod tokens;

pub use builtin::{markdown_grammar, markup_grammar};
pub use grammar::Grammar;
pub use registry::{LanguageDefinition, Registry};
pub use rules::{Hit, Pattern, Rule};
pub use style::{Color, Style, Theme};
pub use tokenizer::tokenize;
pub use tokens::{literal, text_len, Token, TokenTree};
