//! Configuration file support
//!
//! Loads settings from ~/.markdeco.toml (or %USERPROFILE%\.markdeco.toml on
//! Windows). `MARKDECO_CONFIG` overrides the path.
//!
//! Example:
//! ```text
//! # markdeco configuration
//! grammar = "markdown"
//! nested-tags = "nested"
//!
//! [[rule]]
//! category = "mention"
//! pattern = '@\w+'
//! alias = "url"
//! before = "bold"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::decorate::TagPolicy;
use crate::error::Result;
use crate::syntax::{Grammar, Rule};

/// A user rule layered on the selected grammar
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub category: String,
    pub pattern: String,
    #[serde(default)]
    pub alias: Option<String>,
    /// Treat capture group 1 as context outside the token
    #[serde(default)]
    pub lookbehind: bool,
    /// Insert ahead of this category; appended when absent
    #[serde(default)]
    pub before: Option<String>,
}

impl RuleConfig {
    fn compile(&self) -> Result<Rule> {
        let mut rule = Rule::new(&self.pattern)?;
        if self.lookbehind {
            rule = rule.with_lookbehind();
        }
        if let Some(alias) = &self.alias {
            rule = rule.with_alias(alias);
        }
        tracing::debug!(
            category = %self.category,
            backtracking = rule.pattern().is_fancy(),
            "compiled user rule"
        );
        Ok(rule)
    }
}

/// Configuration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Grammar used when the file extension does not pick one
    pub grammar: Option<String>,
    /// How nested categories show up in ranges
    pub nested_tags: TagPolicy,
    #[serde(rename = "rule")]
    pub rules: Vec<RuleConfig>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("MARKDECO_CONFIG") {
            return Some(PathBuf::from(path));
        }

        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".markdeco.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".markdeco.toml"))
        }
    }

    /// Load configuration from the config file, or defaults.
    ///
    /// A missing file is normal. A file that cannot be read or parsed is
    /// logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::debug!("No config path available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Layer the configured rules on `base`, in file order.
    ///
    /// A rule with `before` goes ahead of that category. Any other rule
    /// replaces a same-named category in place or is appended.
    pub fn apply(&self, base: &Grammar) -> Result<Grammar> {
        let mut grammar = base.clone();
        for rule_config in &self.rules {
            let addition = Grammar::new().rule(&rule_config.category, rule_config.compile()?);
            grammar = match &rule_config.before {
                Some(anchor) => grammar.insert_before(anchor, addition),
                None => grammar.extend(addition),
            };
        }
        Ok(grammar)
    }
}
