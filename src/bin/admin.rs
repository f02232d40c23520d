//! CLI administration tool for shortlink.
//!
//! Inspects and adjusts the code sequence and stored links directly in the
//! database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the next code to be issued
//! cargo run --bin admin -- counter show
//!
//! # Move the sequence forward
//! cargo run --bin admin -- counter set a00
//!
//! # Inspect a stored link
//! cargo run --bin admin -- link b1
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
//! Same as the server; see `shortlink::config`. The in-memory backend is
//! rejected since its state lives only inside a running server.

use shortlink::config::{self, StorageBackend};
use shortlink::domain::entities::GeneratorState;
use shortlink::server::{Storage, open_storage};
use shortlink::utils::alphabet::Alphabet;
use shortlink::utils::sanitizer::UrlSanitizer;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::cmp::Ordering;

/// CLI tool for managing shortlink.
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
    /// Inspect or move the code sequence
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },

    /// Show a stored link and its restored URL
    Link {
        /// Short code to look up
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Sequence subcommands.
#[derive(Subcommand)]
enum CounterAction {
    /// Print the next code to be issued
    Show,

    /// Move the sequence forward to CODE
    Set {
        /// New next code; must come after the current one
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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend == StorageBackend::Memory {
        anyhow::bail!("admin commands need STORAGE_BACKEND=postgres");
    }

    let storage = open_storage(&config)
        .await
        .context("Failed to open storage")?;
    let alphabet = Alphabet::default();

    match cli.command {
        Commands::Counter { action } => handle_counter_action(action, &storage, &alphabet).await?,
        Commands::Link { code } => {
            show_link(&storage, &alphabet, &code, config.max_url_length).await?
        }
        Commands::Stats => handle_stats(&storage).await?,
        Commands::Db { action } => handle_db_action(action, &storage).await?,
    }

    Ok(())
}

/// Dispatches sequence commands.
async fn handle_counter_action(
    action: CounterAction,
    storage: &Storage,
    alphabet: &Alphabet,
) -> Result<()> {
    match action {
        CounterAction::Show => {
            println!("{}", "🔢 Code Sequence".bright_blue().bold());
            println!();
            match next_code(storage).await? {
                Some(code) => println!("  Next code: {}", code.bright_yellow().bold()),
                None => println!("{}", "  Not initialized (starts when the server first runs)".yellow()),
            }
            println!();
        }
        CounterAction::Set { code, yes } => set_counter(storage, alphabet, &code, yes).await?,
    }

    Ok(())
}

async fn next_code(storage: &Storage) -> Result<Option<String>> {
    let state = storage
        .generator_state
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load generator state: {}", e))?;

    Ok(state.map(|s| s.next_code.into_inner()))
}

/// Moves the sequence forward with a confirmation prompt.
///
/// Refuses any code at or before the current one, which would hand out codes
/// that may already be stored.
async fn set_counter(storage: &Storage, alphabet: &Alphabet, code: &str, yes: bool) -> Result<()> {
    println!("{}", "🔢 Move Code Sequence".bright_blue().bold());
    println!();

    let target = alphabet
        .parse_code(code)
        .with_context(|| format!("'{}' is not a valid short code", code))?;

    let current = match next_code(storage).await? {
        Some(current) => alphabet.parse_code(&current)?,
        None => alphabet.first_code(),
    };

    if alphabet.compare(&target, &current)? != Ordering::Greater {
        println!(
            "{}",
            format!(
                "⚠️  {} does not come after the current next code {}; refusing to reissue codes",
                target, current
            )
            .yellow()
        );
        return Ok(());
    }

    println!("  Current: {}", current.to_string().bright_black());
    println!("  New:     {}", target.to_string().cyan());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Move the sequence? Codes in between will never be issued")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    storage
        .generator_state
        .save(GeneratorState::new(target))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save generator state: {}", e))?;

    println!("{}", "✅ Sequence moved".green().bold());
    println!(
        "{}",
        "   Restart running servers to pick up the new position.".bright_black()
    );
    println!();

    Ok(())
}

/// Prints a stored record and its restored URL.
async fn show_link(
    storage: &Storage,
    alphabet: &Alphabet,
    code: &str,
    max_url_length: usize,
) -> Result<()> {
    println!("{}", "🔗 Link".bright_blue().bold());
    println!();

    let code = alphabet
        .parse_code(code)
        .with_context(|| format!("'{}' is not a valid short code", code))?;

    let record = storage
        .urls
        .find_by_code(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No link stored under {}", code))?;

    let restored = UrlSanitizer::with_max_length(max_url_length)
        .restore(&record.sanitized_url, &record.restoration_map)
        .context("Stored record is corrupt")?;

    println!("  Code:          {}", record.short_code.to_string().cyan());
    println!("  Target:        {}", restored.bright_white());
    println!("  Stored as:     {}", record.sanitized_url.bright_black());
    println!(
        "  Substitutions: {}",
        record.restoration_map.len().to_string().bright_black()
    );
    println!(
        "  Created:       {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Displays link count and sequence position.
async fn handle_stats(storage: &Storage) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = storage
        .urls
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let next = next_code(storage).await?.unwrap_or_else(|| "-".to_string());

    println!(
        "  Links:     {}",
        links_count.to_string().bright_green().bold()
    );
    println!("  Next code: {}", next.bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, storage: &Storage) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            next_code(storage).await?;

            println!(
                "{}",
                format!("✅ Database connection OK ({})", storage.backend)
                    .green()
                    .bold()
            );
        }
    }

    Ok(())
}
