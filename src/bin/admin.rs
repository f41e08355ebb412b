//! CLI administration tool for shortener-api.
//!
//! Provides commands for managing links, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link (prompts for the URL when omitted)
//! cargo run --bin admin -- links create https://example.com/page
//!
//! # List links
//! cargo run --bin admin -- links list --page 2 --page-size 50
//!
//! # Show or delete a single link
//! cargo run --bin admin -- links show aB3xQ9
//! cargo run --bin admin -- links delete aB3xQ9 -y
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server, most importantly `DATABASE_URL`
//! (default: `sqlite://links.db`) and `CODE_LENGTH`.

use shortener_api::api::dto::link::format_timestamp;
use shortener_api::application::services::LinkService;
use shortener_api::config;
use shortener_api::domain::entities::Link;
use shortener_api::infrastructure::persistence::SqliteLinkRepository;
use shortener_api::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing shortener-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a new short link
    Create {
        /// Target URL (prompted for if omitted)
        url: Option<String>,
    },

    /// List links ordered by id
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 25)]
        page_size: u32,
    },

    /// Show a link with its access count
    Show {
        /// Short code
        code: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type Service = LinkService<SqliteLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = server::connect(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let service = LinkService::new(
        Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone()))),
        config.code_length,
    );

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config.database_url).await?,
    }

    pool.close().await;

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &Service) -> Result<()> {
    match action {
        LinkAction::Create { url } => create_link(service, url).await,
        LinkAction::List { page, page_size } => list_links(service, page, page_size).await,
        LinkAction::Show { code } => show_link(service, &code).await,
        LinkAction::Delete { code, yes } => delete_link(service, &code, yes).await,
    }
}

/// Creates a short link, prompting for the URL if none was given.
async fn create_link(service: &Service, url: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let link = service
        .create(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_link(&link);
    println!();

    Ok(())
}

/// Lists links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links (page 1 of 1)
///
///   ID    Code       Accesses  Created              URL
///   ─────────────────────────────────────────────────────────────────────
///   1     aB3xQ9     3         2024-05-01 10:00     https://example.com/page
/// ```
async fn list_links(service: &Service, page: u32, page_size: u32) -> Result<()> {
    anyhow::ensure!(page > 0, "--page must be greater than 0");
    anyhow::ensure!(page_size > 0, "--page-size must be greater than 0");

    let offset = (i64::from(page) - 1) * i64::from(page_size);
    let result = service
        .list(offset, i64::from(page_size))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    let total_pages = (result.total + i64::from(page_size) - 1) / i64::from(page_size);
    println!(
        "{}",
        format!("📋 Links (page {} of {})", page, total_pages.max(1))
            .bright_blue()
            .bold()
    );
    println!();

    if result.items.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<10} {:<9} {:<20} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Accesses".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &result.items {
        println!(
            "  {:<5} {:<10} {:<9} {:<20} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            link.access_count.to_string(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!(
        "  Total: {}",
        result.total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints a single link with its access count.
async fn show_link(service: &Service, code: &str) -> Result<()> {
    let link = service
        .stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "🔎 Short Link".bright_blue().bold());
    println!();
    print_link(&link);
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &Service, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = service
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if removed {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already removed".yellow());
    }
    println!();

    Ok(())
}

fn print_link(link: &Link) {
    println!("  ID:       {}", link.id.to_string().bright_black());
    println!("  Code:     {}", link.short_code.cyan());
    println!("  URL:      {}", link.url);
    println!("  Created:  {}", format_timestamp(link.created_at));
    println!("  Updated:  {}", format_timestamp(link.updated_at));
    println!(
        "  Accesses: {}",
        link.access_count.to_string().bright_green().bold()
    );
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of redirects served
async fn handle_stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = service
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:     {}",
        summary.links.to_string().bright_green().bold()
    );
    println!(
        "  Accesses:  {}",
        summary.accesses.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            let high_water: Option<i64> =
                sqlx::query_scalar("SELECT seq FROM sqlite_sequence WHERE name = 'links'")
                    .fetch_optional(pool)
                    .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Database:     {}", database_url.bright_white());
            println!(
                "  Highest id:   {}",
                high_water.unwrap_or(0).to_string().bright_white()
            );
            println!();
        }
    }

    Ok(())
}
