mod commands;
mod config;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use volhub_api::Session;
use volhub_core::store::Roster;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "volhub")]
#[command(about = "Browse, join and organize volunteering events on the Volhub platform")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register,
    /// Log in with email and password
    Login,
    /// Log out and forget the stored session
    Logout,
    /// List events
    Events {
        /// Only show this category (e.g. "education", "animal-welfare")
        #[arg(short, long)]
        category: Option<String>,

        /// Only show events whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Measure distances from a place name or "LAT,LON" instead of the
        /// configured location
        #[arg(long)]
        near: Option<String>,
    },
    /// Show one event in full
    Show { event_id: String },
    /// Mark yourself interested in an event
    Interested {
        event_id: String,

        /// Remove the mark instead
        #[arg(long)]
        remove: bool,
    },
    /// Mark yourself as going to an event
    Going {
        event_id: String,

        /// Remove the mark instead
        #[arg(long)]
        remove: bool,
    },
    /// Create a new event
    New,
    /// Edit an event you created
    Edit { event_id: String },
    /// Delete an event you created
    Delete {
        event_id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List the events you created, are interested in, or are going to
    Mine,
    /// Show your profile and upcoming events
    Profile,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config()?;

    match cli.command {
        Commands::Register => commands::register::run(&config).await,
        Commands::Login => commands::login::run(&config).await,
        Commands::Logout => commands::logout::run(),
        Commands::Events { category, search, near } => {
            commands::events::run(&config, category.as_deref(), search.as_deref(), near.as_deref())
                .await
        }
        Commands::Show { event_id } => commands::show::run(&config, &event_id).await,
        Commands::Interested { event_id, remove } => {
            let session = require_session(&config).await?;
            commands::rsvp::run(&config, &session, &event_id, Roster::Interested, !remove).await
        }
        Commands::Going { event_id, remove } => {
            let session = require_session(&config).await?;
            commands::rsvp::run(&config, &session, &event_id, Roster::Going, !remove).await
        }
        Commands::New => {
            let session = require_session(&config).await?;
            commands::new::run(&config, &session).await
        }
        Commands::Edit { event_id } => {
            let session = require_session(&config).await?;
            commands::edit::run(&config, &session, &event_id).await
        }
        Commands::Delete { event_id, yes } => {
            let session = require_session(&config).await?;
            commands::delete::run(&config, &session, &event_id, yes).await
        }
        Commands::Mine => {
            let session = require_session(&config).await?;
            commands::mine::run(&config, &session).await
        }
        Commands::Profile => {
            let session = require_session(&config).await?;
            commands::profile::run(&config, &session).await
        }
    }
}

async fn require_session(config: &Config) -> Result<Session> {
    if !Session::exists() {
        anyhow::bail!(
            "Not logged in.\n\n\
            Log in with:\n  \
            volhub login\n\n\
            Or create an account with:\n  \
            volhub register"
        );
    }

    Ok(Session::load_valid(&config.api_url).await?)
}
