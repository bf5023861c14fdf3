// CLI - Command Line Interface for fee governance operators
// Principle: Simple, clear, composable commands

pub mod config;
pub mod keys;
pub mod runner;

use crate::types::AccountId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Whirlpool fee governance - authorized fee-rate changes over a record store
#[derive(Parser, Debug)]
#[command(name = "whirlpool-gov")]
#[command(author = "Whirlpool Governance Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sign and apply fee-rate changes to whirlpool pools")]
#[command(long_about = r#"
Applies fee-rate changes to pool and config records.

Every change must be signed by the fee authority of the pool's config and stay
below the protocol maximum. Rejected requests leave the records untouched.

Load records produced by the pool initializer:
  whirlpool-gov import --config config.json --pool pool.json

Change a pool's fee rate:
  whirlpool-gov set-fee-rate --config 0x... --pool 0x... --fee-rate 500 --key fee-authority.json
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", env = "WHIRLPOOL_GOV_LOG")]
    pub log_level: String,

    /// Base path for the record store
    #[arg(short = 'd', long, global = true, env = "WHIRLPOOL_GOV_BASE_PATH")]
    pub base_path: Option<PathBuf>,

    /// Maximum open files for the database (-1 = unlimited)
    #[arg(long, global = true, default_value = "256", allow_negative_numbers = true)]
    pub db_max_open_files: i32,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Key management
    Key(KeyCmd),

    /// Load JSON records into the store
    Import(ImportCmd),

    /// Print one record as JSON
    Show(ShowCmd),

    /// Print all records of a kind as JSON
    List(ListCmd),

    /// Change a pool's fee rate
    SetFeeRate(SetFeeRateCmd),

    /// Change a pool's protocol fee rate
    SetProtocolFeeRate(SetProtocolFeeRateCmd),

    /// Change the fee rate new pools of a config start with
    SetDefaultFeeRate(SetDefaultFeeRateCmd),

    /// Change the protocol fee rate new pools of a config start with
    SetDefaultProtocolFeeRate(SetDefaultProtocolFeeRateCmd),
}

/// Key management commands
#[derive(Parser, Debug)]
pub struct KeyCmd {
    #[command(subcommand)]
    pub subcommand: KeySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum KeySubcommand {
    /// Generate a new Ed25519 keypair
    Generate {
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the account id of a key file
    Inspect {
        /// Key file
        key: PathBuf,
    },
}

/// Import records
#[derive(Parser, Debug)]
pub struct ImportCmd {
    /// Config record files (can be specified multiple times)
    #[arg(long = "config", value_name = "FILE")]
    pub configs: Vec<PathBuf>,

    /// Pool record files (can be specified multiple times)
    #[arg(long = "pool", value_name = "FILE")]
    pub pools: Vec<PathBuf>,
}

/// Show a record
#[derive(Parser, Debug)]
pub struct ShowCmd {
    #[command(subcommand)]
    pub record: RecordArg,
}

#[derive(Subcommand, Debug)]
pub enum RecordArg {
    /// A config record
    Config { key: AccountId },
    /// A pool record
    Pool { key: AccountId },
}

/// List records
#[derive(Parser, Debug)]
pub struct ListCmd {
    #[command(subcommand)]
    pub kind: ListKind,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Configs,
    Pools,
}

/// Set a pool's fee rate
#[derive(Parser, Debug)]
pub struct SetFeeRateCmd {
    /// Config owning the pool
    #[arg(long)]
    pub config: AccountId,

    /// Pool to update
    #[arg(long)]
    pub pool: AccountId,

    /// New fee rate, in hundredths of a basis point
    #[arg(long)]
    pub fee_rate: u16,

    /// Fee authority key file
    #[arg(long)]
    pub key: PathBuf,
}

/// Set a pool's protocol fee rate
#[derive(Parser, Debug)]
pub struct SetProtocolFeeRateCmd {
    #[arg(long)]
    pub config: AccountId,

    #[arg(long)]
    pub pool: AccountId,

    /// New protocol fee rate, in basis points
    #[arg(long)]
    pub protocol_fee_rate: u16,

    #[arg(long)]
    pub key: PathBuf,
}

/// Set a config's default fee rate
#[derive(Parser, Debug)]
pub struct SetDefaultFeeRateCmd {
    #[arg(long)]
    pub config: AccountId,

    #[arg(long)]
    pub fee_rate: u16,

    #[arg(long)]
    pub key: PathBuf,
}

/// Set a config's default protocol fee rate
#[derive(Parser, Debug)]
pub struct SetDefaultProtocolFeeRateCmd {
    #[arg(long)]
    pub config: AccountId,

    #[arg(long)]
    pub protocol_fee_rate: u16,

    #[arg(long)]
    pub key: PathBuf,
}
