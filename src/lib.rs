//! brochure - Content pipeline and pricing core for a marketing site
//!
//! The website's pages are rendered elsewhere; this crate supplies the data
//! they show.
//!
//! # Modules
//!
//! - `content`: Blog posts read from front-matter files (list, lookup)
//! - `pricing`: Plan table and displayed-price arithmetic
//! - `config`: Content location and pricing configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List posts, newest first
//! brochure posts --limit 3
//!
//! # Show one post
//! brochure show launching-v2 --full
//!
//! # Quote every plan for 25 client accounts
//! brochure price --quantity 25
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod pricing;

// Re-export main types at crate root for convenience
pub use content::{ContentDocument, ContentError, ContentRepository, DocumentFilter, FrontMatter};
pub use pricing::{compute_price, default_plans, quote, PlanQuote, PricingPlan, QuantityRange};
