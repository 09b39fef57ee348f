//! markdeco - live markdown decoration for editor buffers
//!
//! A grammar engine tokenizes each text node of a document into a token
//! tree; the range projector flattens that tree into non-overlapping,
//! category-tagged ranges a renderer can style.
//!
//! ```no_run
//! use markdeco::{Buffer, Decorator, Registry};
//!
//! let registry = Registry::new()?;
//! let decorator = Decorator::new(registry.resolve("markdown")?);
//! let buffer = Buffer::from_text("notes", "Some **bold** text");
//! for range in decorator.decorate(&buffer) {
//!     println!("{} {}..{} {:?}", range.path, range.start, range.end, range.tags);
//! }
//! # Ok::<(), markdeco::DecorError>(())
//! ```

pub mod buffer;
pub mod config;
pub mod decorate;
pub mod display;
pub mod error;
pub mod syntax;

pub use buffer::Buffer;
pub use config::Config;
pub use decorate::{project, Decorator, Document, NodePath, Range, TagPolicy, TextNode};
pub use error::{DecorError, Result};
pub use syntax::{tokenize, Grammar, Registry, Rule, Token};
