//! Ordered, composable rule tables
//!
//! A [`Grammar`] maps category names to one or more [`Rule`]s. Entry order is
//! match priority: when two rules match at the same position, the one that
//! comes first in the table wins.
//!
//! Grammars are plain values. Composition (`extend`, `insert_before`) returns
//! a new table and leaves the receiver untouched, and embedding one rule
//! inside another goes through [`Grammar::clone_rule`] so every parent owns
//! an independent copy of what it embeds.

use super::rules::Rule;

/// One category and its alternative rules
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    category: String,
    rules: Vec<Rule>,
}

/// An ordered table of categories and their rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grammar {
    entries: Vec<Entry>,
}

impl Grammar {
    /// Create a new empty grammar
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an alternative rule for a category.
    ///
    /// The first rule for a category appends a new entry; later ones are
    /// tried after the earlier alternatives.
    pub fn rule(mut self, category: &str, rule: Rule) -> Self {
        match self.entry_mut(category) {
            Some(entry) => entry.rules.push(rule),
            None => self.entries.push(Entry {
                category: category.to_string(),
                rules: vec![rule],
            }),
        }
        self
    }

    /// Builder: set every rule for a category, replacing any in place
    pub fn rules(mut self, category: &str, rules: Vec<Rule>) -> Self {
        match self.entry_mut(category) {
            Some(entry) => entry.rules = rules,
            None => self.entries.push(Entry {
                category: category.to_string(),
                rules,
            }),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }

    /// Rules for a category, in the order they are tried
    pub fn get(&self, category: &str) -> Option<&[Rule]> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.rules.as_slice())
    }

    /// Category names in priority order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    /// Every category with its rules, in priority order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.entries
            .iter()
            .map(|e| (e.category.as_str(), e.rules.as_slice()))
    }

    fn entry_mut(&mut self, category: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.category == category)
    }

    /// New grammar with `overrides` layered on top of this one.
    ///
    /// A category present in both keeps its position here but takes the
    /// override's rules. Categories only in `overrides` are appended in order.
    pub fn extend(&self, overrides: Grammar) -> Grammar {
        let mut extended = self.clone();
        for entry in overrides.entries {
            extended = extended.rules(&entry.category, entry.rules);
        }
        extended
    }

    /// New grammar with `new_rules` placed immediately before `anchor`.
    ///
    /// Existing entries sharing a name with a new rule are dropped so the new
    /// one wins. A missing anchor appends the new rules at the end.
    pub fn insert_before(&self, anchor: &str, new_rules: Grammar) -> Grammar {
        let mut entries: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| e.category == anchor || !new_rules.contains(&e.category))
            .cloned()
            .collect();

        let Some(at) = entries.iter().position(|e| e.category == anchor) else {
            tracing::debug!(anchor, "anchor category not found, appending rules");
            entries.extend(new_rules.entries);
            return Grammar { entries };
        };

        let replaces_anchor = new_rules.contains(anchor);
        let inserted = new_rules.len();
        entries.splice(at..at, new_rules.entries);
        if replaces_anchor {
            entries.remove(at + inserted);
        }

        Grammar { entries }
    }

    /// Deep copy of a category's rules, nested grammars included
    pub fn clone_rule(&self, category: &str) -> Option<Vec<Rule>> {
        self.get(category).map(<[Rule]>::to_vec)
    }

    /// Builder: install `rules` under `category` in the nested grammar of
    /// every rule of `parent`.
    ///
    /// Each parent rule receives its own copy. Does nothing if `parent` is
    /// not in this grammar.
    pub fn embed(mut self, parent: &str, category: &str, rules: Vec<Rule>) -> Self {
        if let Some(entry) = self.entry_mut(parent) {
            for rule in &mut entry.rules {
                let inside = rule.inside_mut();
                *inside = std::mem::take(inside).rules(category, rules.clone());
            }
        }
        self
    }
}
