//! CLI administration tool for shortgate.
//!
//! Inspects links and admission counters directly in the stores, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a short code
//! cargo run --bin admin -- link inspect 1f9a2b
//!
//! # Count active and expired links
//! cargo run --bin admin -- link stats
//!
//! # Show the global counter and one user's counter
//! cargo run --bin admin -- counters show 42
//!
//! # Clear a leaked user counter before its TTL runs out
//! cargo run --bin admin -- counters reset 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `shortgate::config`).

use shortgate::application::services::{
    GLOBAL_COUNTER_KEY, LinkRegistry, LinkResolution, user_counter_key,
};
use shortgate::config::{self, Config, mask_connection_string};
use shortgate::domain::entities::parse_created_at;
use shortgate::domain::repositories::CounterStore;
use shortgate::infrastructure::counters::RedisCounterStore;
use shortgate::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing shortgate.
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
    /// Inspect short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect or reset admission counters
    Counters {
        #[command(subcommand)]
        action: CounterAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Resolve a short code
    Inspect {
        /// Six-character short code
        code: String,
    },

    /// Show record counts
    Stats,
}

/// Counter subcommands.
#[derive(Subcommand)]
enum CounterAction {
    /// Show the global counter and, optionally, one user's counter
    Show {
        /// User ID whose counter to show
        user_id: Option<String>,
    },

    /// Delete a counter
    Reset {
        /// User ID whose counter to delete
        #[arg(required_unless_present = "global", conflicts_with = "global")]
        user_id: Option<String>,

        /// Delete the global counter instead
        #[arg(long)]
        global: bool,

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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config).await?,
        Commands::Counters { action } => handle_counter_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn connect_db(config: &Config) -> Result<PgPool> {
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

async fn connect_counters(config: &Config) -> Result<RedisCounterStore> {
    RedisCounterStore::connect(&config.redis_url)
        .await
        .context("Failed to connect to Redis")
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    let pool = connect_db(config).await?;

    match action {
        LinkAction::Inspect { code } => {
            let registry = LinkRegistry::new(
                Arc::new(PgLinkRepository::new(Arc::new(pool))),
                Duration::from_secs(config.link_ttl_seconds),
            );
            inspect_link(&registry, &code).await?;
        }
        LinkAction::Stats => link_stats(&pool, config.link_ttl_seconds).await?,
    }

    Ok(())
}

/// Prints what a code resolves to.
async fn inspect_link(registry: &LinkRegistry, code: &str) -> Result<()> {
    let resolution = registry.resolve(code).await?;

    match resolution {
        LinkResolution::Found(record) => {
            println!("{} {}", "✓ Active".green().bold(), code.cyan());
            println!("  Full URL:   {}", record.full_url);
            println!("  Created at: {}", record.created_at);
        }
        LinkResolution::Expired(record) => {
            println!("{} {}", "⏱ Expired".yellow().bold(), code.cyan());
            println!("  Full URL:   {}", record.full_url);
            println!("  Created at: {}", record.created_at);
            println!(
                "  {}",
                "The next create-or-fetch for this URL reactivates it".dimmed()
            );
        }
        LinkResolution::NotFound => {
            println!("{} {}", "✗ Not found".red().bold(), code.cyan());
        }
    }

    Ok(())
}

/// Prints total, active and expired record counts.
async fn link_stats(pool: &PgPool, link_ttl_seconds: u64) -> Result<()> {
    let timestamps: Vec<String> = sqlx::query_scalar("SELECT created_at FROM url_map")
        .fetch_all(pool)
        .await
        .context("Failed to read url_map")?;

    let ttl = i64::try_from(link_ttl_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    let now = Utc::now();

    let mut active = 0usize;
    let mut expired = 0usize;
    let mut unreadable = 0usize;
    for raw in &timestamps {
        match parse_created_at(raw) {
            Ok(created_at)
                if created_at
                    .checked_add_signed(ttl)
                    .is_some_and(|deadline| now > deadline) =>
            {
                expired += 1
            }
            Ok(_) => active += 1,
            Err(_) => unreadable += 1,
        }
    }

    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();
    println!("  Total:   {}", timestamps.len().to_string().cyan());
    println!("  Active:  {}", active.to_string().green());
    println!("  Expired: {}", expired.to_string().yellow());
    if unreadable > 0 {
        println!("  Unreadable timestamps: {}", unreadable.to_string().red());
    }

    Ok(())
}

/// Dispatches counter commands.
async fn handle_counter_action(action: CounterAction, config: &Config) -> Result<()> {
    let store = connect_counters(config).await?;

    match action {
        CounterAction::Show { user_id } => {
            let global = store.get(GLOBAL_COUNTER_KEY).await?;
            println!(
                "  {:<24} {} / {}",
                GLOBAL_COUNTER_KEY,
                format_count(global),
                config.max_concurrent_global
            );

            if let Some(user_id) = user_id {
                let key = user_counter_key(&user_id);
                let value = store.get(&key).await?;
                println!(
                    "  {:<24} {} / {}",
                    key,
                    format_count(value),
                    config.max_concurrent_per_user
                );
            }
        }
        CounterAction::Reset {
            user_id,
            global,
            yes,
        } => {
            let key = match user_id {
                Some(user_id) if !global => user_counter_key(&user_id),
                _ => GLOBAL_COUNTER_KEY.to_string(),
            };

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete counter '{}'?", key))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".yellow());
                    return Ok(());
                }
            }

            store.reset(&key).await?;
            println!("{} {}", "✓ Counter deleted:".green().bold(), key);
        }
    }

    Ok(())
}

fn format_count(value: Option<i64>) -> ColoredString {
    match value {
        Some(v) => v.to_string().cyan(),
        None => "absent".dimmed(),
    }
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "Connecting to {}",
                mask_connection_string(&config.database_url)
            );
            let pool = connect_db(config).await?;
            sqlx::query("SELECT 1").execute(&pool).await?;
            println!("{}", "✓ Database connection OK".green().bold());
        }
    }

    Ok(())
}
