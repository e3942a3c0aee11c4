//! Command-line interface for brochure.
//!
//! Provides commands for listing and inspecting blog posts, emitting the
//! identifiers static generation needs, and quoting plan prices.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::content::{ContentDocument, ContentError};
use crate::pricing::{quote, PlanQuote};

/// brochure - Content pipeline and pricing core for a marketing site
#[derive(Parser, Debug)]
#[command(name = "brochure")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List blog posts, newest first
    Posts {
        /// Maximum number of posts to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single blog post
    Show {
        /// Post identifier (file name without extension)
        identifier: String,

        /// Include the post body
        #[arg(short, long)]
        full: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print every post identifier, one per line
    Slugs,

    /// Quote every plan for a number of client accounts
    Price {
        /// Number of client accounts (clamped to the configured range)
        #[arg(short, long)]
        quantity: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?;

        match self.command {
            Commands::Posts { limit, json } => list_posts(cfg, limit, json).await,
            Commands::Show {
                identifier,
                full,
                json,
            } => show_post(cfg, &identifier, full, json).await,
            Commands::Slugs => list_slugs(cfg).await,
            Commands::Price { quantity, json } => show_prices(cfg, quantity, json),
            Commands::Config => show_config(cfg),
        }
    }
}

/// Cut `text` to at most `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// List posts, newest first
async fn list_posts(cfg: &ResolvedConfig, limit: Option<usize>, json: bool) -> Result<()> {
    let repo = cfg.repository()?;
    let posts = match limit {
        Some(n) => repo.latest(n).await?,
        None => repo.list_all_sorted().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts found in {}", repo.dir().display());
        return Ok(());
    }

    println!("{:<30} {:<14} {:<20} {:<40}", "IDENTIFIER", "DATE", "AUTHOR", "TITLE");
    println!("{}", "-".repeat(104));

    for post in &posts {
        println!(
            "{:<30} {:<14} {:<20} {:<40}",
            truncate(&post.identifier, 30),
            post.display_date(),
            truncate(&post.author, 20),
            truncate(&post.title, 40)
        );
    }

    println!("\nTotal: {} posts", posts.len());

    Ok(())
}

/// Show a single post
async fn show_post(cfg: &ResolvedConfig, identifier: &str, full: bool, json: bool) -> Result<()> {
    let repo = cfg.repository()?;

    let post = match repo.get_by_identifier(identifier).await {
        Ok(post) => post,
        Err(ContentError::NotFound(id)) => {
            eprintln!("Post not found: {}", id);
            std::process::exit(1);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to load post '{}'", identifier)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    print_post(&post, full);
    Ok(())
}

fn print_post(post: &ContentDocument, full: bool) {
    println!("{}", post.title);
    println!("By {} · {}", post.author, post.display_date());
    println!();
    println!("  Identifier: {}", post.identifier);
    println!("  Cover:      {}", post.cover_image);
    println!("  Excerpt:    {}", post.excerpt);

    if full {
        println!("\n{}", post.body);
    } else {
        println!("\nUse --full to show the post body");
    }
}

/// Print identifiers for static page generation
async fn list_slugs(cfg: &ResolvedConfig) -> Result<()> {
    for identifier in cfg.repository()?.identifiers().await? {
        println!("{}", identifier);
    }
    Ok(())
}

/// Quote all plans
fn show_prices(cfg: &ResolvedConfig, quantity: Option<u32>, json: bool) -> Result<()> {
    let requested = quantity.unwrap_or(cfg.quantity.default);
    let quantity = cfg.quantity.clamp(requested);
    if quantity != requested {
        tracing::info!(
            "Quantity {} clamped to {} ({}..={})",
            requested,
            quantity,
            cfg.quantity.min,
            cfg.quantity.max
        );
    }

    let quotes: Vec<PlanQuote> = quote(&cfg.plans, quantity);

    if json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
        return Ok(());
    }

    println!("Client accounts: {}\n", quantity);
    println!("{:<20} {:>10}", "PLAN", "PRICE");
    println!("{}", "-".repeat(31));

    for q in &quotes {
        let badge = if q.highlight { "  (Most Popular)" } else { "" };
        println!("{:<20} {:>6} /mo{}", q.name, format!("${}", q.price), badge);
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("brochure configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Content:");
    println!("  Directory: {}", cfg.content_dir.display());
    println!("  Files:     {}", cfg.content_match);
    println!();
    println!("Pricing:");
    println!(
        "  Quantity:  {}..={} (default {})",
        cfg.quantity.min, cfg.quantity.max, cfg.quantity.default
    );
    for plan in &cfg.plans {
        println!(
            "  {:<12} base {} + {} per account{}",
            plan.name,
            plan.base_price,
            plan.per_unit_cost,
            if plan.highlight { " (highlighted)" } else { "" }
        );
    }

    Ok(())
}
