//! CLI administration tool for the redirect store.
//!
//! Seeds, inspects, and edits the redb store without running the server.
//! The server holds the store file lock while it runs, so stop it first (or
//! send it `SIGHUP` to re-seed from its own `SEED_FILE`).
//!
//! # Usage
//!
//! ```bash
//! # Upsert every pair from a YAML or JSON file
//! cargo run --bin admin -- seed conf.yaml
//!
//! # Add or overwrite a single redirect
//! cargo run --bin admin -- put /docs https://docs.rs
//!
//! # Look up one path
//! cargo run --bin admin -- get /docs
//!
//! # List all stored redirects
//! cargo run --bin admin -- list
//!
//! # Check that the store opens and is readable
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_PATH` (default `my.db`): redb file
//! - `STORE_OPEN_TIMEOUT_MS` (default 1000): how long to wait for the file lock

use path_redirect::application::services::Seeder;
use path_redirect::config::store_open_timeout_ms_from_env;
use path_redirect::domain::entities::PathUrlPair;
use path_redirect::domain::repositories::RedirectRepository;
use path_redirect::domain::resolver::PathResolver;
use path_redirect::infrastructure::parser::{Format, PairFile};
use path_redirect::infrastructure::persistence::{RedbRedirectRepository, default_store_path};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing the redirect store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Upsert all pairs from a YAML or JSON file
    Seed {
        /// Pair file
        file: PathBuf,

        /// File format (inferred from the extension if omitted)
        #[arg(short, long)]
        format: Option<Format>,
    },

    /// Add or overwrite a single redirect
    Put {
        /// Request path, e.g. /docs
        path: String,

        /// Redirect target
        url: String,

        /// Skip confirmation when overwriting
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the redirect target for a path
    Get {
        /// Request path
        path: String,
    },

    /// List all stored redirects
    List,

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check that the store opens and is readable
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let store_path = std::env::var("STORE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_store_path());
    let timeout = Duration::from_millis(store_open_timeout_ms_from_env()?);

    let repo = Arc::new(
        RedbRedirectRepository::open(&store_path, timeout)
            .await
            .with_context(|| format!("Failed to open store {}", store_path.display()))?,
    );

    match cli.command {
        Commands::Seed { file, format } => seed(repo, file, format).await?,
        Commands::Put { path, url, yes } => put(repo, path, url, yes).await?,
        Commands::Get { path } => get(repo, path).await?,
        Commands::List => list(repo).await?,
        Commands::Db { action } => match action {
            DbAction::Check => check(repo, &store_path).await?,
        },
    }

    Ok(())
}

/// Seeds the store from a pair file.
///
/// Unlike the server, a missing file is an error here.
async fn seed(
    repo: Arc<RedbRedirectRepository>,
    file: PathBuf,
    format: Option<Format>,
) -> Result<()> {
    println!("{}", "🌱 Seed Redirects".bright_blue().bold());
    println!();

    let source = PairFile::detect(file, format)?;
    if !source.path.exists() {
        anyhow::bail!("{} does not exist", source.path.display());
    }

    let seeder = Seeder::new(repo, Some(source.clone()));
    let written = seeder
        .seed()
        .await
        .with_context(|| format!("Failed to seed from {}", source.path.display()))?;

    println!(
        "{} {} pairs from {} ({})",
        "✅ Upserted".green().bold(),
        written.to_string().bright_white().bold(),
        source.path.display().to_string().cyan(),
        source.format
    );
    println!();

    Ok(())
}

/// Upserts a single pair, confirming before an overwrite.
async fn put(
    repo: Arc<RedbRedirectRepository>,
    path: String,
    url: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✏️  Put Redirect".bright_blue().bold());
    println!();

    if let Some(existing) = repo.resolve(&path).await? {
        println!("  Path:    {}", path.cyan());
        println!("  Current: {}", existing.bright_black());
        println!("  New:     {}", url.bright_yellow());
        println!();

        if !skip_confirm {
            let confirmed = Confirm::new()
                .with_prompt("Overwrite this redirect?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }
        }
    }

    repo.upsert(vec![PathUrlPair::new(path.clone(), url.clone())])
        .await
        .context("Failed to store redirect")?;

    println!(
        "{} {} -> {}",
        "✅ Stored".green().bold(),
        path.cyan(),
        url.bright_yellow()
    );
    println!();

    Ok(())
}

/// Prints the target for one path.
async fn get(repo: Arc<RedbRedirectRepository>, path: String) -> Result<()> {
    match repo.resolve(&path).await? {
        Some(url) => println!("  {} -> {}", path.cyan(), url.bright_yellow()),
        None => println!("  {} {}", path.cyan(), "not found".yellow()),
    }
    Ok(())
}

/// Lists all stored redirects.
///
/// # Output Format
///
/// ```text
/// 📋 Redirects
///
///   Path                           URL
///   ──────────────────────────────────────────────────────────────
///   /urlshort                      https://github.com/gophercises/urlshort
/// ```
async fn list(repo: Arc<RedbRedirectRepository>) -> Result<()> {
    println!("{}", "📋 Redirects".bright_blue().bold());
    println!();

    let pairs = repo.entries().await.context("Failed to list redirects")?;

    if pairs.is_empty() {
        println!("{}", "  No redirects stored".yellow());
        println!();
        println!(
            "  Seed some with: {} admin seed conf.yaml",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<30} {}",
        "Path".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for pair in &pairs {
        println!("  {:<30} {}", pair.path.cyan(), pair.url);
    }

    println!();
    println!("  Total: {}", pairs.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Verifies the store is readable.
async fn check(repo: Arc<RedbRedirectRepository>, store_path: &std::path::Path) -> Result<()> {
    println!("{}", "🔍 Checking store...".bright_blue().bold());
    println!();

    if repo.health_check().await {
        println!(
            "{} {}",
            "✅ Store is readable:".green().bold(),
            store_path.display().to_string().cyan()
        );
    } else {
        anyhow::bail!("Store {} is not readable", store_path.display());
    }
    println!();

    Ok(())
}
