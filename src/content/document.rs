//! Parsed blog posts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ContentError;
use super::frontmatter;

/// Metadata block of a content file (matches the YAML keys on disk)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,

    /// Publication date, kept as written
    pub date: String,

    pub author: String,

    /// Path or URL of the cover image
    #[serde(rename = "coverImage")]
    pub cover_image: String,

    pub excerpt: String,
}

/// One blog post: its identifier, metadata and body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Unique slug derived from the file name (lookup key and URL segment)
    pub identifier: String,

    /// Post title
    pub title: String,

    /// Post author
    pub author: String,

    /// Publication date as it appears in the front matter.
    ///
    /// Ordering compares this text literally, so only `YYYY-MM-DD` dates sort
    /// chronologically.
    pub published_date: String,

    /// Path or URL of the cover image
    pub cover_image: String,

    /// Short summary shown on cards
    pub excerpt: String,

    /// Markup following the metadata block
    pub body: String,
}

impl ContentDocument {
    /// Build a document from its identifier, metadata and body
    pub fn new(identifier: impl Into<String>, front_matter: FrontMatter, body: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: front_matter.title,
            author: front_matter.author,
            published_date: front_matter.date,
            cover_image: front_matter.cover_image,
            excerpt: front_matter.excerpt,
            body: body.into(),
        }
    }

    /// Parse the full text of a content file
    pub fn parse(identifier: &str, source: &str) -> Result<Self, ContentError> {
        let split = frontmatter::split(source).map_err(|e| ContentError::malformed(identifier, e))?;
        let front_matter: FrontMatter = split
            .parse()
            .map_err(|e| ContentError::malformed(identifier, e))?;

        Ok(Self::new(identifier, front_matter, split.body))
    }

    /// The metadata block this document was parsed from
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: self.title.clone(),
            date: self.published_date.clone(),
            author: self.author.clone(),
            cover_image: self.cover_image.clone(),
            excerpt: self.excerpt.clone(),
        }
    }

    /// Render back into the on-disk form
    pub fn to_source(&self) -> Result<String, serde_yaml::Error> {
        frontmatter::render(&self.front_matter(), &self.body)
    }

    /// The publication date as a calendar date, if written as `YYYY-MM-DD`
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.published_date.trim(), "%Y-%m-%d").ok()
    }

    /// Human-readable date ("Jan 5, 2024"), or the raw text when unparseable
    pub fn display_date(&self) -> String {
        match self.published_on() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => self.published_date.clone(),
        }
    }
}
