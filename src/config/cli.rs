use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fundraise-board")]
#[command(about = "Intern fundraising leaderboard and dashboard stats")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the key-value store directory
    #[arg(long)]
    pub store_path: Option<String>,

    /// Skip the simulated network delays
    #[arg(long)]
    pub no_latency: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the ranked leaderboard
    Leaderboard {
        /// Also write the leaderboard as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show rank, percentile and referral estimate
    Stats {
        /// Participant id; defaults to the signed-in user
        #[arg(long)]
        user: Option<String>,
    },
    /// Show reward milestones
    Rewards {
        #[arg(long)]
        user: Option<String>,
    },
    /// Record a donation
    Donate {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        user: Option<String>,
    },
    /// Add a new participant
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Sign in by email
    Login {
        #[arg(long)]
        email: String,
    },
    /// Forget the signed-in user
    Logout,
    /// Show the signed-in user and referral link
    Whoami,
}
