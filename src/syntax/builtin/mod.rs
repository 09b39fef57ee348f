//! Built-in grammars
//!
//! Markup is the generic base; markdown extends it.

mod markdown;
mod markup;

pub use markdown::markdown_grammar;
pub use markup::markup_grammar;

use super::registry::LanguageDefinition;
use crate::error::Result;

/// Get all built-in language definitions
pub fn all_languages() -> Result<Vec<LanguageDefinition>> {
    let mut markup = LanguageDefinition::new("markup", markup_grammar()?);
    for ext in ["html", "htm", "xml", "svg"] {
        markup.add_extension(ext);
    }

    let mut markdown = LanguageDefinition::new("markdown", markdown_grammar()?);
    for ext in ["md", "markdown", "mkd"] {
        markdown.add_extension(ext);
    }

    Ok(vec![markup, markdown])
}
