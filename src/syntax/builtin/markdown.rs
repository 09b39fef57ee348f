//! Markdown grammar
//!
//! Layered on the markup grammar: the markdown rules are inserted ahead of
//! "prolog", so raw HTML comments still take priority but every markdown
//! construct beats the remaining markup rules.

use super::markup::markup_grammar;
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::Rule;

const URL_REFERENCE: &str = r#"!?\[[^\]]+\]:[\t ]+(?:\S+|<(?:\\.|[^>\\])+>)(?:[\t ]+(?:"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|\((?:\\.|[^)\\])*\)))?"#;
const QUOTED_TITLE: &str = r#"(?:"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|\((?:\\.|[^)\\])*\))$"#;
const URL: &str = r#"!?\[[^\]]+\](?:\([^\s)]+(?:[\t ]+"(?:\\.|[^"\\])*")?\)| ?\[[^\]\n]*\])"#;

// Single line breaks may sit inside emphasis, blank lines may not
const BOLD: &str = r"(^|[^\\])(\*\*|__)(?:(?:\r?\n|\r)(?!\r?\n|\r)|.)+?\2";
const ITALIC: &str = r"(^|[^\\])([*_])(?:(?:\r?\n|\r)(?!\r?\n|\r)|.)+?\2";

fn punctuation(pattern: &str) -> Result<Grammar> {
    Ok(Grammar::new().rule("punctuation", Rule::new(pattern)?))
}

/// Create the markdown grammar
pub fn markdown_grammar() -> Result<Grammar> {
    let rules = Grammar::new()
        .rule("blockquote", Rule::new(r"(?m)^>(?:[\t ]*>)*")?.with_alias("punctuation"))
        .rule("code", Rule::new(r"(?m)^(?: {4}|\t).+")?.with_alias("keyword"))
        .rule("code", Rule::new(r"``.+?``|`[^`\n]+`")?.with_alias("keyword"))
        // Setext: text underlined with === or ---
        .rule(
            "title",
            Rule::new(r"\w+.*(?:\r?\n|\r)(?:==+|--+)")?
                .with_alias("important")
                .with_inside(punctuation(r"==+$|--+$")?),
        )
        // ATX: # Title
        .rule(
            "title",
            Rule::new(r"(?m)(^\s*)#+.+")?
                .with_lookbehind()
                .with_alias("important")
                .with_inside(punctuation(r"^#+|#+$")?),
        )
        .rule(
            "hr",
            Rule::new(r"(?m)(^\s*)([*-])(?:[\t ]*\2){2,}(?=\s*$)")?
                .with_lookbehind()
                .with_alias("punctuation"),
        )
        .rule(
            "list",
            Rule::new(r"(?m)(^\s*)(?:[*+-]|\d+\.)(?=[\t ].)")?
                .with_lookbehind()
                .with_alias("punctuation"),
        )
        .rule(
            "url-reference",
            Rule::new(URL_REFERENCE)?.with_alias("url").with_inside(
                Grammar::new()
                    .rule("variable", Rule::new(r"^(!?\[)[^\]]+")?.with_lookbehind())
                    .rule("string", Rule::new(QUOTED_TITLE)?)
                    .rule("punctuation", Rule::new(r"^[\[\]!:]|[<>]")?),
            ),
        )
        .rule(
            "bold",
            Rule::new(BOLD)?
                .with_lookbehind()
                .with_inside(punctuation(r"^\*\*|^__|\*\*$|__$")?),
        )
        .rule(
            "italic",
            Rule::new(ITALIC)?
                .with_lookbehind()
                .with_inside(punctuation(r"^[*_]|[*_]$")?),
        )
        .rule(
            "url",
            Rule::new(URL)?.with_inside(
                Grammar::new()
                    .rule("variable", Rule::new(r"(!?\[)[^\]]+(?=\]$)")?.with_lookbehind())
                    .rule("string", Rule::new(r#""(?:\\.|[^"\\])*"(?=\)$)"#)?),
            ),
        );

    let grammar = markup_grammar()?.insert_before("prolog", rules);

    // Bold and italic each own a copy of url and of one another. Italic is
    // copied into bold before bold is copied into italic, so the nesting
    // stops after two levels.
    let url = grammar.clone_rule("url").unwrap_or_default();
    let grammar = grammar
        .embed("bold", "url", url.clone())
        .embed("italic", "url", url);
    let italic = grammar.clone_rule("italic").unwrap_or_default();
    let grammar = grammar.embed("bold", "italic", italic);
    let bold = grammar.clone_rule("bold").unwrap_or_default();

    Ok(grammar.embed("italic", "bold", bold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::tokenize;
    use crate::syntax::tokens::{literal, Token};

    fn categories(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().filter_map(Token::category).collect()
    }

    fn children(token: &Token) -> &[Token] {
        match token {
            Token::Nested { children, .. } => children,
            other => panic!("expected nested token, got {:?}", other),
        }
    }

    #[test]
    fn test_rule_order() {
        let grammar = markdown_grammar().unwrap();
        assert_eq!(
            grammar.categories().collect::<Vec<_>>(),
            [
                "comment",
                "blockquote",
                "code",
                "title",
                "hr",
                "list",
                "url-reference",
                "bold",
                "italic",
                "url",
                "prolog",
                "doctype",
                "cdata",
                "tag",
                "entity",
            ]
        );
    }

    #[test]
    fn test_inline_styles() {
        let grammar = markdown_grammar().unwrap();
        let text = "Some **bold**, _italic_ and `code` with [a link](http://x.y)";
        let tokens = tokenize(text, &grammar);
        assert_eq!(literal(&tokens), text);
        assert_eq!(categories(&tokens), ["bold", "italic", "code", "url"]);
        assert_eq!(tokens[1].literal(), "**bold**");
        assert_eq!(tokens[5].alias(), Some("keyword"));
    }

    #[test]
    fn test_escaped_marker() {
        let grammar = markdown_grammar().unwrap();
        let tokens = tokenize(r"not \*emphasis*", &grammar);
        assert!(categories(&tokens).is_empty());
    }

    #[test]
    fn test_block_rules() {
        let grammar = markdown_grammar().unwrap();

        let tokens = tokenize("## Heading", &grammar);
        assert_eq!(categories(&tokens), ["title"]);
        assert_eq!(tokens[0].alias(), Some("important"));
        assert_eq!(categories(children(&tokens[0])), ["punctuation"]);

        assert_eq!(categories(&tokenize("> quoted", &grammar)), ["blockquote"]);
        assert_eq!(categories(&tokenize("- item", &grammar)), ["list"]);
        assert_eq!(categories(&tokenize("1. item", &grammar)), ["list"]);
        assert_eq!(categories(&tokenize("* * *", &grammar)), ["hr"]);
        assert_eq!(categories(&tokenize("---", &grammar)), ["hr"]);
        assert_eq!(categories(&tokenize("    let x = 1;", &grammar)), ["code"]);
    }

    #[test]
    fn test_setext_title() {
        let grammar = markdown_grammar().unwrap();
        let tokens = tokenize("Title\n=====", &grammar);
        assert_eq!(categories(&tokens), ["title"]);
        assert_eq!(categories(children(&tokens[0])), ["punctuation"]);
    }

    #[test]
    fn test_url_reference() {
        let grammar = markdown_grammar().unwrap();
        let tokens = tokenize(r#"[id]: http://example.com "Title""#, &grammar);
        assert_eq!(categories(&tokens), ["url-reference"]);
        assert_eq!(tokens[0].alias(), Some("url"));
        assert_eq!(
            categories(children(&tokens[0])),
            ["punctuation", "variable", "punctuation", "punctuation", "string"]
        );
    }

    #[test]
    fn test_nested_emphasis() {
        let grammar = markdown_grammar().unwrap();

        let tokens = tokenize("**bold _inner_ [l](u)**", &grammar);
        assert_eq!(categories(&tokens), ["bold"]);
        assert_eq!(
            categories(children(&tokens[0])),
            ["punctuation", "italic", "url", "punctuation"]
        );

        // Bold is tried before italic at the top level, so italic around
        // bold only happens through italic's own nested grammar
        let tokens = tokenize("_it **strong** x_", &grammar);
        assert_eq!(categories(&tokens), ["bold"]);

        let italic_only = Grammar::new().rules("italic", grammar.clone_rule("italic").unwrap());
        let tokens = tokenize("_it **strong** x_", &italic_only);
        assert_eq!(categories(&tokens), ["italic"]);
        assert_eq!(
            categories(children(&tokens[0])),
            ["punctuation", "bold", "punctuation"]
        );
    }

    #[test]
    fn test_code_beats_earlier_bold() {
        let grammar = markdown_grammar().unwrap();
        let tokens = tokenize("a **b `c** d`", &grammar);
        assert_eq!(literal(&tokens), "a **b `c** d`");
        assert_eq!(categories(&tokens), ["code"]);
        assert_eq!(tokens[1].literal(), "`c** d`");
    }

    #[test]
    fn test_emphasis_right_after_bold() {
        let grammar = markdown_grammar().unwrap();

        let tokens = tokenize("**a**_b_", &grammar);
        assert_eq!(categories(&tokens), ["bold", "italic"]);
        assert_eq!(tokens[1].literal(), "_b_");

        let tokens = tokenize("**a***b*", &grammar);
        assert_eq!(categories(&tokens), ["bold", "italic"]);
        assert_eq!(tokens[0].literal(), "**a**");
        assert_eq!(tokens[1].literal(), "*b*");

        let tokens = tokenize("`x`_b_ and `y`_c_", &grammar);
        assert_eq!(categories(&tokens), ["code", "italic", "code", "italic"]);
    }

    #[test]
    fn test_embedded_copies_stop_nesting() {
        let grammar = markdown_grammar().unwrap();
        let bold = &grammar.get("bold").unwrap()[0];
        let italic_in_bold = &bold.inside().unwrap().get("italic").unwrap()[0];
        let inner = italic_in_bold.inside().unwrap();
        assert!(inner.contains("url"));
        assert!(!inner.contains("bold"));

        let italic = &grammar.get("italic").unwrap()[0];
        let bold_in_italic = &italic.inside().unwrap().get("bold").unwrap()[0];
        assert!(bold_in_italic.inside().unwrap().contains("italic"));
    }

    #[test]
    fn test_changing_bold_copy_leaves_italic() {
        let grammar = markdown_grammar()
            .unwrap()
            .embed("bold", "url", vec![Rule::new(r"@\w+").unwrap()]);

        let bold = tokenize("**see [x](y)**", &grammar);
        assert_eq!(categories(children(&bold[0])), ["punctuation", "punctuation"]);

        let italic = tokenize("_see [x](y)_", &grammar);
        assert_eq!(
            categories(children(&italic[0])),
            ["punctuation", "url", "punctuation"]
        );
    }

    #[test]
    fn test_triple_star() {
        let grammar = markdown_grammar().unwrap();
        let tokens = tokenize("***both***", &grammar);
        assert_eq!(literal(&tokens), "***both***");
        assert_eq!(tokens[0].category(), Some("bold"));
        assert_eq!(tokens[0].literal(), "***both**");
        assert_eq!(tokens[1], Token::plain("*"));
    }
}
