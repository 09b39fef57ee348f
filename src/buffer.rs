//! Buffer representation: paragraphs of text, one per line
//!
//! A minimal document for driving decoration passes. Each line is a
//! paragraph holding a single text node, so line `n` has path `[n, 0]`.

use std::path::{Path, PathBuf};

use crate::decorate::{Document, NodePath, TextNode};
use crate::error::Result;

/// A buffer containing lines of text and metadata
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Lines of text, without trailing newlines
    lines: Vec<String>,
    /// Buffer name (e.g., "README.md", "*stdin*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
}

impl Buffer {
    /// Create a new empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lines: vec![String::new()], // Always have at least one line
            name: name.into(),
            filename: None,
        }
    }

    /// Create a buffer from text
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut buffer = Self::new(name);
        if !text.is_empty() {
            buffer.lines = text.lines().map(str::to_string).collect();
        }
        buffer
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Replace the text of a line. Returns false if the line does not exist.
    pub fn set_line(&mut self, idx: usize, text: &str) -> bool {
        match self.lines.get_mut(idx) {
            Some(line) => {
                *line = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Insert a line before `idx` (or at the end if `idx` is past it)
    pub fn insert_line(&mut self, idx: usize, text: &str) {
        let idx = idx.min(self.lines.len());
        self.lines.insert(idx, text.to_string());
    }
}

impl Document for Buffer {
    fn text_nodes(&self) -> Vec<TextNode<'_>> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| TextNode {
                path: NodePath(vec![idx, 0]),
                text: line.as_str(),
            })
            .collect()
    }
}
