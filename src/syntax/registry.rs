//! Grammar registry
//!
//! Maps grammar names and file extensions to shared, immutable grammars.
//! Build one at startup and pass it around; there is no global instance.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::grammar::Grammar;
use crate::error::{DecorError, Result};

/// A named grammar and the file extensions it handles
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Grammar name (e.g., "markdown")
    pub name: String,
    /// File extensions (e.g., ["md", "markdown"])
    pub extensions: Vec<String>,
    pub grammar: Arc<Grammar>,
}

impl LanguageDefinition {
    pub fn new(name: &str, grammar: Grammar) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            grammar: Arc::new(grammar),
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }
}

/// Registry of available grammars
#[derive(Debug, Default)]
pub struct Registry {
    languages: HashMap<String, LanguageDefinition>,
    /// Extension to grammar name mapping
    extension_map: HashMap<String, String>,
}

impl Registry {
    /// Create a registry holding the built-in grammars
    pub fn new() -> Result<Self> {
        let mut registry = Self::default();
        for lang in builtin::all_languages()? {
            registry.add_language(lang);
        }
        Ok(registry)
    }

    /// Add a language definition, replacing one with the same name
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), lang.name.clone());
        }
        self.languages.insert(lang.name.clone(), lang);
    }

    /// Detect grammar name from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(String::as_str)
    }

    /// Get a grammar by name
    pub fn get(&self, name: &str) -> Option<Arc<Grammar>> {
        self.languages.get(name).map(|lang| Arc::clone(&lang.grammar))
    }

    /// Get a grammar by name, failing if it is unknown
    pub fn resolve(&self, name: &str) -> Result<Arc<Grammar>> {
        self.get(name)
            .ok_or_else(|| DecorError::UnknownGrammar(name.to_string()))
    }

    /// List available grammars
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}
