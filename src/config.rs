//! Configuration for brochure.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (BROCHURE_CONTENT_DIR)
//! 2. Config file (.brochure/config.yaml)
//! 3. Defaults (./content/blog, built-in plan table)
//!
//! Config file discovery:
//! - Searches current directory and parents for .brochure/config.yaml
//! - Paths in config file are relative to the project root (the parent of .brochure/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::content::{ContentRepository, DocumentFilter, DEFAULT_EXTENSION};
use crate::pricing::{default_plans, PricingPlan, QuantityRange};

/// Environment variable overriding the content directory
pub const CONTENT_DIR_ENV: &str = "BROCHURE_CONTENT_DIR";

/// Default content directory, relative to the working directory
pub const DEFAULT_CONTENT_DIR: &str = "content/blog";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub pricing: Option<PricingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Content directory (relative to project root)
    pub dir: Option<String>,
    /// File extension of content documents (without the dot)
    pub extension: Option<String>,
    /// Glob for content file names; takes precedence over `extension`
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    pub plans: Option<Vec<PricingPlan>>,
    pub quantity: Option<QuantityRange>,
}

/// How content files are recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMatch {
    Extension(String),
    Pattern(String),
}

impl Default for ContentMatch {
    fn default() -> Self {
        Self::Extension(DEFAULT_EXTENSION.to_string())
    }
}

impl std::fmt::Display for ContentMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentMatch::Extension(ext) => write!(f, "*.{}", ext),
            ContentMatch::Pattern(pattern) => write!(f, "{}", pattern),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding content documents
    pub content_dir: PathBuf,
    /// Which files in `content_dir` are documents
    pub content_match: ContentMatch,
    /// Plan table for quotes
    pub plans: Vec<PricingPlan>,
    /// Slider bounds for quotes
    pub quantity: QuantityRange,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Build the content repository this configuration describes
    pub fn repository(&self) -> Result<ContentRepository> {
        let filter = match &self.content_match {
            ContentMatch::Extension(ext) => DocumentFilter::Extension(ext.clone()),
            ContentMatch::Pattern(pattern) => DocumentFilter::glob(pattern)
                .with_context(|| format!("Invalid content pattern: {}", pattern))?,
        };

        Ok(ContentRepository::new(&self.content_dir).with_filter(filter))
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".brochure").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine an optional config file with the environment override
fn resolve(
    config_file: Option<(PathBuf, ConfigFile)>,
    env_content_dir: Option<String>,
    cwd: &Path,
) -> Result<ResolvedConfig> {
    let (config_path, content, pricing) = match config_file {
        Some((path, file)) => (Some(path), file.content, file.pricing),
        None => (None, ContentConfig::default(), None),
    };

    // Base directory is the parent of .brochure/ (i.e., grandparent of config.yaml)
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(cwd);

    let content_dir = if let Some(env_dir) = env_content_dir {
        PathBuf::from(env_dir)
    } else if let Some(ref dir) = content.dir {
        resolve_path(base_dir, dir)
    } else {
        cwd.join(DEFAULT_CONTENT_DIR)
    };

    let content_match = match (content.pattern, content.extension) {
        (Some(pattern), _) => ContentMatch::Pattern(pattern),
        (None, Some(ext)) => ContentMatch::Extension(ext.trim_start_matches('.').to_string()),
        (None, None) => ContentMatch::default(),
    };

    let (plans, quantity) = match pricing {
        Some(pricing) => (
            pricing.plans.unwrap_or_else(default_plans),
            pricing.quantity.unwrap_or_default(),
        ),
        None => (default_plans(), QuantityRange::default()),
    };

    quantity.validate().context("Invalid pricing.quantity")?;
    if plans.is_empty() {
        anyhow::bail!("pricing.plans must contain at least one plan");
    }

    Ok(ResolvedConfig {
        content_dir,
        content_match,
        plans,
        quantity,
        config_file: config_path,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let config_file = match find_config_file() {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    resolve(config_file, std::env::var(CONTENT_DIR_ENV).ok(), &cwd)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (bypasses the cache)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
