//! Grammar-driven tokenizer
//!
//! Rules run one at a time in table order. Each rule takes every match it
//! finds in the plain text still left over, and later rules only see the
//! fragments between earlier matches. Every fragment is matched as its own
//! haystack, so `^` holds at a fragment's start. Matched text becomes a
//! structured token, re-tokenized with the rule's nested grammar if it has one.

use super::grammar::Grammar;
use super::rules::Rule;
use super::tokens::Token;

/// Tokenize `text` against `grammar`.
///
/// Never fails: text no rule matches comes back as [`Token::Plain`], so an
/// empty grammar yields the whole input as a single plain token.
pub fn tokenize(text: &str, grammar: &Grammar) -> Vec<Token> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut tokens = vec![Token::Plain(text.to_string())];
    for (category, rules) in grammar.iter() {
        for rule in rules {
            tokens = apply_rule(tokens, category, rule);
        }
    }
    tokens
}

/// Split every plain fragment in `tokens` on the matches of one rule
fn apply_rule(tokens: Vec<Token>, category: &str, rule: &Rule) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::Plain(fragment) => split_fragment(&fragment, category, rule, &mut out),
            structured => out.push(structured),
        }
    }
    out
}

fn split_fragment(fragment: &str, category: &str, rule: &Rule, out: &mut Vec<Token>) {
    let mut rest = fragment;
    // The text after a match is a fresh haystack for the same rule
    while let Some(hit) = rule.find_at(rest, 0) {
        if hit.start > 0 {
            out.push(Token::Plain(rest[..hit.start].to_string()));
        }
        out.push(structured(category, rule, &rest[hit.start..hit.end]));
        rest = &rest[hit.end..];
    }
    if !rest.is_empty() {
        out.push(Token::Plain(rest.to_string()));
    }
}

fn structured(category: &str, rule: &Rule, matched: &str) -> Token {
    let category = category.to_string();
    let alias = rule.alias().map(str::to_string);
    match rule.inside() {
        Some(inside) => Token::Nested {
            category,
            alias,
            children: tokenize(matched, inside),
        },
        None => Token::Leaf {
            category,
            alias,
            text: matched.to_string(),
        },
    }
}
