mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use baton_domain::config::Config;

#[derive(Parser)]
#[command(name = "baton", about = "Session handoff for agent chat sessions")]
struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Agent whose state to operate on (defaults to the configured agent).
    #[arg(long, global = true)]
    agent: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a session's transcript and persist the handoff files
    Handoff {
        /// Session key (e.g. `agent:baton:main`)
        #[arg(long)]
        session_key: String,

        /// Session ID whose transcript to summarize
        #[arg(long)]
        session_id: String,

        /// Transcript store directory (defaults to the agent's sessions dir)
        #[arg(long)]
        store_path: Option<PathBuf>,

        /// Explicit transcript file, overriding store probing
        #[arg(long)]
        session_file: Option<PathBuf>,
    },

    /// Hand off the session's current transcript, then mint a new session ID
    Reset {
        /// Session key to reset
        #[arg(long)]
        session_key: String,

        /// Reason recorded with the reset
        #[arg(long, default_value = "manual")]
        reason: String,
    },

    /// Inspect persisted handoff summaries
    Summaries {
        #[command(subcommand)]
        action: SummariesAction,
    },
}

#[derive(Subcommand)]
enum SummariesAction {
    /// List summaries, newest first
    List,
    /// Print one summary by session ID
    Show { session_id: String },
    /// Print the newest summary
    Latest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("baton=info,baton_handoff=info,baton_sessions=info,baton_providers=info")
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    let agent = cli.agent.as_deref();

    match cli.command {
        Commands::Handoff {
            session_key,
            session_id,
            store_path,
            session_file,
        } => {
            commands::run_handoff(
                config,
                agent,
                &session_key,
                &session_id,
                store_path.as_deref(),
                session_file.as_deref(),
            )
            .await
        }
        Commands::Reset {
            session_key,
            reason,
        } => commands::run_reset(config, agent, &session_key, &reason).await,
        Commands::Summaries { action } => match action {
            SummariesAction::List => commands::run_summaries_list(&config, agent),
            SummariesAction::Show { session_id } => {
                commands::run_summaries_show(&config, agent, &session_id)
            }
            SummariesAction::Latest => commands::run_summaries_latest(&config, agent),
        },
    }
}
