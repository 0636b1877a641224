use std::path::PathBuf;

use bingodash_core::model::chrono::NaiveDate;
use bingodash_core::model::{
    CategoryFilter, ChallengeStatus, EntityId, StatusFilter,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "bingodashctl",
    version,
    about = "Health Bingo admin console"
)]
pub struct Cli {
    /// Config file (TOML or JSON). Defaults to ./bingodash.toml or the
    /// user config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Env file loaded before reading BINGODASH_* variables
    #[arg(long, global = true, conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,
    /// Do not load a .env file
    #[arg(long, global = true)]
    pub no_env_file: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with an admin account and store the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "BINGODASH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami {
        /// Ask the backend whether the token is still accepted
        #[arg(long)]
        verify: bool,
    },
    /// Exchange the refresh token for a new session
    Refresh,
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Manage promo codes
    Promo {
        #[command(subcommand)]
        action: PromoAction,
    },
    /// Manage the bingo card catalog
    Cards {
        #[command(subcommand)]
        action: CardsAction,
    },
    /// Moderate challenges
    Challenges {
        #[command(subcommand)]
        action: ChallengesAction,
    },
    /// Revenue reports
    Revenue {
        #[command(subcommand)]
        action: RevenueAction,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Query flags shared by every list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Search term
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,
    /// Header clicks applied to --sort: 1 ascending, 2 descending, 3 off
    #[arg(long, default_value_t = 1)]
    pub sort_clicks: usize,
    /// Start from the last saved view of this list
    #[arg(long)]
    pub last: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List users (server-side search, sort and paging)
    List(ListArgs),
    /// Show one user
    Show { id: EntityId },
    /// Create an admin account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Update profile fields
    Update {
        id: EntityId,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        activated: Option<bool>,
    },
    /// Delete a user
    Delete { id: EntityId },
    /// Send a password reset to the user
    ResetPassword { id: EntityId },
}

#[derive(Debug, Subcommand)]
pub enum PromoAction {
    /// List promo codes (filtered and paged locally)
    List(ListArgs),
    /// Create a promo code
    Create {
        /// Days until the code expires
        #[arg(long)]
        days: u32,
        #[arg(long)]
        usage_limit: u32,
    },
    /// Update a promo code; omitted fields keep their current values
    Update {
        id: EntityId,
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        usage_limit: Option<u32>,
    },
    /// Delete a promo code
    Delete { id: EntityId },
    /// Enable or disable a promo code
    Toggle { id: EntityId },
    /// Active, total and expired-or-deleted counts
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum CardsAction {
    /// List bingo cards
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Category id, or `all` to clear the filter
        #[arg(long)]
        category: Option<CategoryFilter>,
    },
    /// Create a bingo card
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: String,
        /// Category id; repeat for several
        #[arg(long = "category", required = true)]
        categories: Vec<EntityId>,
        #[arg(long)]
        font_color: String,
        #[arg(long)]
        font_name: String,
    },
    /// Update a bingo card
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long = "category")]
        categories: Vec<EntityId>,
        #[arg(long)]
        font_color: Option<String>,
        #[arg(long)]
        font_name: Option<String>,
    },
    /// Delete a bingo card
    Delete { id: EntityId },
    /// List challenge categories
    Categories,
}

#[derive(Debug, Subcommand)]
pub enum ChallengesAction {
    /// List challenges
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Status, or `all` to clear the filter
        #[arg(long)]
        status: Option<StatusFilter>,
    },
    /// Move a challenge to another status
    Status { id: EntityId, status: ChallengeStatus },
    /// Roll a challenge over to its next week
    StartNextWeek { id: EntityId },
    /// Delete a challenge
    Delete { id: EntityId },
}

#[derive(Debug, Subcommand)]
pub enum RevenueAction {
    /// Lifetime revenue
    Total,
    Daily,
    Weekly,
    Monthly,
    /// Revenue and payment history between two dates (inclusive)
    Range {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}
