//! Blog content pipeline.
//!
//! Posts live one-per-file in a content directory. Each file opens with a
//! YAML front matter block followed by the post body.
//!
//! # Storage Layout
//!
//! ```text
//! content/blog/
//! ├── launching-v2.mdx          # identifier: launching-v2
//! └── pricing-explained.mdx     # identifier: pricing-explained
//! ```

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod repository;

pub use document::{ContentDocument, FrontMatter};
pub use error::ContentError;
pub use repository::{ContentRepository, DocumentFilter, DEFAULT_EXTENSION};
