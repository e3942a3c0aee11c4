//! Read-only query surface over a directory of content files.
//!
//! Every call re-reads the directory and re-parses the documents it needs;
//! nothing is cached between calls.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tokio::fs;

use super::document::ContentDocument;
use super::error::ContentError;

/// Default file extension for content documents
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Which directory entries count as content documents
#[derive(Debug, Clone)]
pub enum DocumentFilter {
    /// File names ending in `.<ext>`; the identifier is the name without it
    Extension(String),

    /// File names matching a glob; the identifier is the file stem
    Glob(Pattern),
}

impl Default for DocumentFilter {
    fn default() -> Self {
        Self::Extension(DEFAULT_EXTENSION.to_string())
    }
}

impl DocumentFilter {
    /// Build a glob filter (e.g. `"*.md"`)
    pub fn glob(pattern: &str) -> Result<Self, glob::PatternError> {
        Ok(Self::Glob(Pattern::new(pattern)?))
    }

    /// Identifier for `file_name`, or `None` when the file is not a document
    pub fn identifier_for(&self, file_name: &str) -> Option<String> {
        let identifier = match self {
            DocumentFilter::Extension(ext) => file_name.strip_suffix(ext.as_str())?.strip_suffix('.')?,
            DocumentFilter::Glob(pattern) => {
                if !pattern.matches(file_name) {
                    return None;
                }
                Path::new(file_name).file_stem()?.to_str()?
            }
        };

        if identifier.is_empty() {
            None
        } else {
            Some(identifier.to_string())
        }
    }
}

/// A discovered document file (not yet read)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    identifier: String,
    path: PathBuf,
}

/// Lists and resolves content documents stored one-per-file in a directory
#[derive(Debug, Clone)]
pub struct ContentRepository {
    dir: PathBuf,
    filter: DocumentFilter,
}

impl ContentRepository {
    /// Create a repository over `dir`, matching `*.mdx` files
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filter: DocumentFilter::default(),
        }
    }

    /// Replace the document filter
    pub fn with_filter(mut self, filter: DocumentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The directory this repository reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All documents, newest first.
    ///
    /// Dates are compared as plain strings, so `YYYY-MM-DD` is the only
    /// format that orders chronologically. Equal dates keep ascending
    /// identifier order. Any unreadable or malformed document fails the call.
    pub async fn list_all_sorted(&self) -> Result<Vec<ContentDocument>, ContentError> {
        let entries = self.discover().await?;

        let mut documents = Vec::with_capacity(entries.len());
        for entry in &entries {
            documents.push(self.load(entry).await?);
        }

        documents.sort_by(|a, b| b.published_date.cmp(&a.published_date));

        tracing::debug!(
            "Listed {} documents from {}",
            documents.len(),
            self.dir.display()
        );

        Ok(documents)
    }

    /// The `n` newest documents
    pub async fn latest(&self, n: usize) -> Result<Vec<ContentDocument>, ContentError> {
        let mut documents = self.list_all_sorted().await?;
        documents.truncate(n);
        Ok(documents)
    }

    /// Identifiers of all documents, in listing order
    pub async fn identifiers(&self) -> Result<Vec<String>, ContentError> {
        Ok(self
            .list_all_sorted()
            .await?
            .into_iter()
            .map(|doc| doc.identifier)
            .collect())
    }

    /// The document whose identifier is exactly `identifier`
    pub async fn get_by_identifier(&self, identifier: &str) -> Result<ContentDocument, ContentError> {
        let entries = self.discover().await?;

        let entry = entries
            .iter()
            .find(|e| e.identifier == identifier)
            .ok_or_else(|| ContentError::NotFound(identifier.to_string()))?;

        self.load(entry).await
    }

    /// Enumerate document files, sorted by identifier
    async fn discover(&self) -> Result<Vec<Entry>, ContentError> {
        let mut dir = fs::read_dir(&self.dir)
            .await
            .map_err(|e| ContentError::storage(&self.dir, e))?;

        let mut entries = Vec::new();
        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| ContentError::storage(&self.dir, e))?
        {
            let file_name = item.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::warn!("Skipping non UTF-8 file name: {:?}", file_name);
                continue;
            };

            let Some(identifier) = self.filter.identifier_for(name) else {
                continue;
            };

            let path = item.path();
            let metadata = fs::metadata(&path)
                .await
                .map_err(|e| ContentError::storage(&path, e))?;
            if !metadata.is_file() {
                tracing::warn!("Skipping {}: not a regular file", path.display());
                continue;
            }

            tracing::debug!("Discovered document {} at {}", identifier, path.display());
            entries.push(Entry { identifier, path });
        }

        entries.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(entries)
    }

    async fn load(&self, entry: &Entry) -> Result<ContentDocument, ContentError> {
        let source = fs::read_to_string(&entry.path)
            .await
            .map_err(|e| ContentError::storage(&entry.path, e))?;

        ContentDocument::parse(&entry.identifier, &source)
    }
}
