//! CLI administration tool for prompthero-ready.
//!
//! Provides commands for managing users and API tokens, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user, then a token for them
//! cargo run --bin admin -- user create founder@example.com --admin
//! cargo run --bin admin -- token create --user <uuid>
//!
//! # List and revoke tokens
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke "Laptop"
//!
//! # Promote a user
//! cargo run --bin admin -- user role <uuid> admin
//!
//! # View statistics / check database
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server

use prompthero_ready::domain::entities::UserRole;
use prompthero_ready::domain::repositories::{AdminRepository, TokenRepository};
use prompthero_ready::infrastructure::persistence::{PgAdminRepository, PgTokenRepository};
use prompthero_ready::utils::mask::mask_connection_string;
use prompthero_ready::utils::token::{generate_token, hash_token};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing prompthero-ready.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token for a user
    Create {
        /// Owner of the token (prompted if omitted)
        #[arg(short, long)]
        user: Option<Uuid>,

        /// Token name (e.g., "Laptop", "CI")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user profile
    Create {
        email: String,

        #[arg(short, long)]
        display_name: Option<String>,

        /// Give the user the admin role
        #[arg(long)]
        admin: bool,
    },

    /// Change a user's role
    Role {
        user_id: Uuid,

        /// `user` or `admin`
        role: UserRole,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            user,
            name,
            token,
            yes,
        } => {
            let secret = std::env::var("TOKEN_SIGNING_SECRET")
                .context("TOKEN_SIGNING_SECRET must be set")?;
            anyhow::ensure!(!secret.is_empty(), "TOKEN_SIGNING_SECRET must not be empty");

            create_token(repo, &secret, user, name, token, yes).await?;
        }
        TokenAction::List => list_tokens(repo).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(repo, name_or_id).await?,
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// Only the HMAC-SHA256 hash is stored; the raw token is printed once.
async fn create_token(
    repo: Arc<PgTokenRepository>,
    signing_secret: &str,
    user: Option<Uuid>,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let user_id = match user {
        Some(id) => id,
        None => Input::<String>::new()
            .with_prompt("User ID")
            .interact_text()?
            .trim()
            .parse()
            .context("User ID must be a UUID")?,
    };

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Laptop")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            println!("{}", "✨ Generated new token".green());
            generate_token()
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  User:  {}", user_id.to_string().cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(signing_secret, &token_value);

    repo.create_token(user_id, &token_name, &token_hash)
        .await
        .context("Failed to create token")?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/workspace/stats",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo.list_tokens().await.context("Failed to list tokens")?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<24} {:<36} {:<17} {:<17} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "User".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(110).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<24} {:<36} {:<17} {:<17} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.user_id.to_string(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or numeric ID after confirmation (default: No).
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .context("Database error")?
    .context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!("  User:  {}", token.user_id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .context("Failed to revoke token")?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            email,
            display_name,
            admin,
        } => {
            let role = if admin { UserRole::Admin } else { UserRole::User };
            let id = Uuid::new_v4();

            sqlx::query(
                "INSERT INTO profiles (id, email, display_name, role) VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(email.trim())
            .bind(display_name.as_deref())
            .bind(role.as_str())
            .execute(pool)
            .await
            .context("Failed to create user")?;

            println!("{}", "✅ User created".green().bold());
            println!("  ID:    {}", id.to_string().bright_yellow());
            println!("  Email: {}", email.trim().cyan());
            println!("  Role:  {}", role.to_string().cyan());
        }
        UserAction::Role { user_id, role } => {
            let repo = PgAdminRepository::new(Arc::new(pool.clone()));

            let profile = repo
                .set_role(user_id, role)
                .await
                .context("Failed to update role")?
                .context("User not found")?;

            println!(
                "{} {} is now {}",
                "✅".green(),
                profile.email.cyan(),
                profile.role.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = PgAdminRepository::new(Arc::new(pool.clone()))
        .system_stats()
        .await
        .context("Failed to load statistics")?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    let rows = [
        ("Users", stats.users),
        ("Ideas", stats.ideas),
        ("Documents", stats.documents),
        ("Teams", stats.teams),
        ("Active subscriptions", stats.active_subscriptions),
        ("Active tokens", tokens_count),
    ];

    for (label, value) in rows {
        println!(
            "  {:<22} {}",
            format!("{}:", label),
            value.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
