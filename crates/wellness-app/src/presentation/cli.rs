use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "wellness")]
#[command(version, about = "Daily activity completions, streaks and wellness plans")]
pub struct Cli {
    /// Keep every document in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// SQLite database file (overrides WELLNESS_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Args)]
pub struct UserArg {
    /// Display name; the user is created on first use
    #[arg(short, long)]
    pub user: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Sign in (or register) with a display name
    SignIn {
        #[arg(short, long)]
        name: String,
    },

    /// Mark one slot of a day completed
    Complete {
        #[command(flatten)]
        user: UserArg,
        /// YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        /// Morning, Afternoon or Evening
        #[arg(short, long)]
        slot: String,
    },

    /// Mark several slots of one day completed, Morning first
    CompleteDay {
        #[command(flatten)]
        user: UserArg,
        #[arg(short, long)]
        date: String,
        /// Comma separated, e.g. Morning,Evening
        #[arg(short, long, value_delimiter = ',', required = true)]
        slots: Vec<String>,
    },

    /// Award the daily flame (defaults to today, UTC)
    Award {
        #[command(flatten)]
        user: UserArg,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Spend 5 completions to bridge a single missed day
    Repair {
        #[command(flatten)]
        user: UserArg,
        /// The day after the missed one
        #[arg(short, long)]
        date: String,
    },

    /// Show daily streak and completion total
    Streak {
        #[command(flatten)]
        user: UserArg,
    },

    /// Show whether one slot is completed
    SlotStatus {
        #[command(flatten)]
        user: UserArg,
        #[arg(short, long)]
        date: String,
        #[arg(short, long)]
        slot: String,
    },

    /// Show all three slots of one day
    DayStatus {
        #[command(flatten)]
        user: UserArg,
        #[arg(short, long)]
        date: String,
    },

    /// List completions between two dates (inclusive)
    RangeStatus {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },

    /// Generate a 7-day plan from DASS-21 scores (0-21 each)
    GeneratePlan {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        depression: Option<u8>,
        #[arg(long)]
        anxiety: Option<u8>,
        #[arg(long)]
        stress: Option<u8>,
    },

    /// Show the newest plan with completions filled in
    LatestPlan {
        #[command(flatten)]
        user: UserArg,
    },
}
