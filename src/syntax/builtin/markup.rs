//! Markup (HTML/XML) grammar, the base the markdown grammar extends

use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::Rule;

/// Create the markup grammar
pub fn markup_grammar() -> Result<Grammar> {
    let namespace = || -> Result<Grammar> {
        Ok(Grammar::new().rule("namespace", Rule::new(r"^[^\s>/:]+:")?))
    };

    let doctype_inside = Grammar::new()
        .rule("string", Rule::new(r#""[^"]*"|'[^']*'"#)?)
        .rule("punctuation", Rule::new(r"^<!|>$|[\[\]]")?)
        .rule("doctype-tag", Rule::new(r"(?i)^DOCTYPE")?)
        .rule("name", Rule::new(r#"[^\s<>'"\[\]]+"#)?);

    let tag_inside = Grammar::new()
        .rule(
            "tag",
            Rule::new(r"^</?[^\s>/]+")?.with_inside(
                Grammar::new()
                    .rule("punctuation", Rule::new(r"^</?")?)
                    .rule("namespace", Rule::new(r"^[^\s>/:]+:")?),
            ),
        )
        .rule(
            "attr-value",
            Rule::new(r#"=\s*(?:"[^"]*"|'[^']*'|[^\s'">=]+)"#)?.with_inside(
                Grammar::new()
                    .rule("punctuation", Rule::new(r"^=")?.with_alias("attr-equals"))
                    .rule("punctuation", Rule::new(r#""|'"#)?),
            ),
        )
        .rule("punctuation", Rule::new(r"/?>")?)
        .rule("attr-name", Rule::new(r"[^\s>/=]+")?.with_inside(namespace()?));

    let grammar = Grammar::new()
        .rule("comment", Rule::new(r"(?s)<!--.*?-->")?)
        .rule("prolog", Rule::new(r"(?s)<\?.+?\?>")?)
        .rule(
            "doctype",
            Rule::new(r#"(?i)<!DOCTYPE(?:[^>"'\[\]]|"[^"]*"|'[^']*')+(?:\[[^\]]*\]\s*)?>"#)?
                .with_inside(doctype_inside),
        )
        .rule("cdata", Rule::new(r"(?is)<!\[CDATA\[.*?\]\]>")?)
        .rule(
            "tag",
            Rule::new(
                r#"</?(?!\d)[^\s>/=$<%]+(?:\s(?:\s*[^\s>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s'">=]+(?=[\s>]))|(?=[\s/>])))+)?\s*/?>"#,
            )?
            .with_inside(tag_inside),
        )
        .rule("entity", Rule::new(r"(?i)&[\da-z]{1,8};")?.with_alias("named-entity"))
        .rule("entity", Rule::new(r"(?i)&#x?[\da-f]{1,8};")?);

    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::tokenize;
    use crate::syntax::tokens::{literal, Token};

    #[test]
    fn test_markup_categories() {
        let grammar = markup_grammar().unwrap();
        assert_eq!(
            grammar.categories().collect::<Vec<_>>(),
            ["comment", "prolog", "doctype", "cdata", "tag", "entity"]
        );
    }

    #[test]
    fn test_tag_tokens() {
        let grammar = markup_grammar().unwrap();
        let text = r#"see <a href="x">here</a> &amp; <!-- note -->"#;
        let tokens = tokenize(text, &grammar);
        assert_eq!(literal(&tokens), text);

        let categories: Vec<_> = tokens.iter().filter_map(Token::category).collect();
        assert_eq!(categories, ["tag", "tag", "entity", "comment"]);

        let Token::Nested { children, .. } = &tokens[1] else {
            panic!("tag should be nested");
        };
        let inner: Vec<_> = children.iter().filter_map(Token::category).collect();
        assert_eq!(inner, ["tag", "attr-name", "attr-value", "punctuation"]);
    }

    #[test]
    fn test_doctype() {
        let grammar = markup_grammar().unwrap();
        let tokens = tokenize("<!DOCTYPE html>", &grammar);
        assert_eq!(tokens.len(), 1);

        let Token::Nested { children, .. } = &tokens[0] else {
            panic!("doctype should be nested");
        };
        assert_eq!(
            children,
            &vec![
                Token::leaf("punctuation", "<!"),
                Token::leaf("doctype-tag", "DOCTYPE"),
                Token::plain(" "),
                Token::leaf("name", "html"),
                Token::leaf("punctuation", ">"),
            ]
        );
    }

    #[test]
    fn test_entity_alias() {
        let grammar = markup_grammar().unwrap();
        let tokens = tokenize("&copy; &#x41;", &grammar);
        assert_eq!(tokens[0].alias(), Some("named-entity"));
        assert_eq!(tokens[2].category(), Some("entity"));
        assert_eq!(tokens[2].alias(), None);
    }
}
