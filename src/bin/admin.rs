//! CLI administration tool for shortlink.
//!
//! Provides commands for preparing the database, creating short URLs and
//! inspecting records without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create the database file and apply migrations
//! cargo run --bin admin -- db init
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Shorten a URL, expiring in 7 days
//! cargo run --bin admin -- shorten https://example.com --expiry-days 7
//!
//! # Show a record, including expired ones
//! cargo run --bin admin -- info abc123
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; `DATABASE_URL` defaults to
//! `sqlite://./data.db`.

use shortlink::application::services::ShortenerService;
use shortlink::config::Config;
use shortlink::domain::entities::ShortUrl;
use shortlink::domain::repositories::ShortUrlRepository;
use shortlink::infrastructure::persistence::{self, SqliteShortUrlRepository};
use shortlink::utils::base_url::short_url;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Create a short URL
    Shorten {
        /// URL to shorten (http or https)
        url: String,

        /// Days until the short URL expires (0 or omitted means never)
        #[arg(short, long, allow_negative_numbers = true)]
        expiry_days: Option<i64>,
    },

    /// Show a stored record
    Info {
        /// Short code to look up
        code: String,
    },

    /// Show statistics
    Stats,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Create the database if missing and apply migrations
    Init,

    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = persistence::connect(&config.database_url, config.pool_settings())
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Shorten { url, expiry_days } => {
            shorten(&config, pool.clone(), &url, expiry_days).await?
        }
        Commands::Info { code } => show_info(&config, pool.clone(), &code).await?,
        Commands::Stats => handle_stats(&pool).await?,
    }

    pool.close().await;

    Ok(())
}

/// Handles database setup and diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Init => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            persistence::migrate(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Database ready".green().bold());
        }
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Creates a short URL through the same service the HTTP API uses.
///
/// Submitting a URL that already has an active record prints that record.
async fn shorten(
    config: &Config,
    pool: SqlitePool,
    url: &str,
    expiry_days: Option<i64>,
) -> Result<()> {
    let repo = Arc::new(SqliteShortUrlRepository::new(Arc::new(pool)));
    let service = ShortenerService::with_policy(repo, config.generation_policy());

    let record = service
        .create_short_url(url, expiry_days)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten url: {}", e))?;

    println!("{}", "✨ Short URL ready".green().bold());
    println!();
    print_record(config, &record);

    Ok(())
}

/// Prints a record by code, flagging it when expired.
async fn show_info(config: &Config, pool: SqlitePool, code: &str) -> Result<()> {
    let repo = SqliteShortUrlRepository::new(Arc::new(pool));

    let record = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short code not found")?;

    print_record(config, &record);

    Ok(())
}

fn print_record(config: &Config, record: &ShortUrl) {
    let status = if record.is_expired() {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  Code:     {}", record.code.bright_yellow().bold());
    if let Some(ref base) = config.base_url {
        println!("  Short:    {}", short_url(base, &record.code).bright_cyan());
    }
    println!("  Target:   {}", record.original_url.cyan());
    println!(
        "  Created:  {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    match record.expires_at {
        Some(expires_at) => println!(
            "  Expires:  {}",
            expires_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
        ),
        None => println!("  Expires:  {}", "never".bright_black()),
    }
    println!("  Clicks:   {}", record.clicks.to_string().bright_white());
    println!("  Status:   {}", status);
    println!();
}

/// Displays record and click totals.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(pool)
        .await?;

    let expiries: Vec<DateTime<Utc>> =
        sqlx::query_scalar("SELECT expires_at FROM short_urls WHERE expires_at IS NOT NULL")
            .fetch_all(pool)
            .await?;

    let now = Utc::now();
    let expired = expiries.iter().filter(|&&e| e <= now).count() as i64;
    let active = total - expired;

    let clicks: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0) FROM short_urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Short URLs:    {}",
        total.to_string().bright_green().bold()
    );
    println!(
        "  Active:        {}",
        active.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}
