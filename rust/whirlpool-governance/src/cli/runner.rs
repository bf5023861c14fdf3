// Runner - Command execution
// Principle: Open the store, route the command through the governance service, print JSON

use crate::cli::config::{ConfigError, GovernorConfig};
use crate::cli::keys::{load_signing_key, KeyFile, KeyFileError};
use crate::cli::{Cli, Commands, ImportCmd, KeySubcommand, ListKind, RecordArg};
use crate::governance::bounds::{validate_fee_rate, validate_protocol_fee_rate};
use crate::governance::{GovernanceError, GovernanceService};
use crate::storage::{Database, Record, RecordStore, StoreError};
use crate::types::{
    AccountId, SetDefaultFeeRate, SetDefaultProtocolFeeRate, SetFeeRate, SetProtocolFeeRate,
    SignedRequest, Whirlpool, WhirlpoolsConfig,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Execute a parsed command, writing results to `out`
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), RunnerError> {
    // Key commands never touch the store
    if let Commands::Key(cmd) = &cli.command {
        return run_key(&cmd.subcommand, out);
    }

    let config = GovernorConfig::from_cli(cli)?;
    std::fs::create_dir_all(&config.base_path)
        .map_err(|e| RunnerError::Io(format!("Failed to create data dir: {}", e)))?;

    info!("Record store: {}", config.db_path().display());
    let db = Database::open(config.db_path(), config.database)?;

    run_with_store(&cli.command, GovernanceService::with_ed25519(db), out)
}

/// Execute a store command against an already opened service
pub fn run_with_store<S: RecordStore>(
    command: &Commands,
    service: GovernanceService<S>,
    out: &mut dyn Write,
) -> Result<(), RunnerError> {
    match command {
        Commands::Key(cmd) => run_key(&cmd.subcommand, out),

        Commands::Import(cmd) => import_records(cmd, service.store(), out),

        Commands::Show(cmd) => match &cmd.record {
            RecordArg::Config { key } => print_json(out, &service.get_config(key)?),
            RecordArg::Pool { key } => print_json(out, &service.get_pool(key)?),
        },

        Commands::List(cmd) => match cmd.kind {
            ListKind::Configs => print_json(out, &service.store().list::<WhirlpoolsConfig>()?),
            ListKind::Pools => print_json(out, &service.store().list::<Whirlpool>()?),
        },

        Commands::SetFeeRate(cmd) => {
            let key = load_signing_key(&cmd.key)?;
            let request = SignedRequest::sign(
                &key,
                SetFeeRate {
                    config: cmd.config,
                    pool: cmd.pool,
                    fee_rate: cmd.fee_rate,
                },
            );
            print_json(out, &service.set_fee_rate(&request)?)
        }

        Commands::SetProtocolFeeRate(cmd) => {
            let key = load_signing_key(&cmd.key)?;
            let request = SignedRequest::sign(
                &key,
                SetProtocolFeeRate {
                    config: cmd.config,
                    pool: cmd.pool,
                    protocol_fee_rate: cmd.protocol_fee_rate,
                },
            );
            print_json(out, &service.set_protocol_fee_rate(&request)?)
        }

        Commands::SetDefaultFeeRate(cmd) => {
            let key = load_signing_key(&cmd.key)?;
            let request = SignedRequest::sign(
                &key,
                SetDefaultFeeRate {
                    config: cmd.config,
                    default_fee_rate: cmd.fee_rate,
                },
            );
            print_json(out, &service.set_default_fee_rate(&request)?)
        }

        Commands::SetDefaultProtocolFeeRate(cmd) => {
            let key = load_signing_key(&cmd.key)?;
            let request = SignedRequest::sign(
                &key,
                SetDefaultProtocolFeeRate {
                    config: cmd.config,
                    default_protocol_fee_rate: cmd.protocol_fee_rate,
                },
            );
            print_json(out, &service.set_default_protocol_fee_rate(&request)?)
        }
    }
}

fn run_key(cmd: &KeySubcommand, out: &mut dyn Write) -> Result<(), RunnerError> {
    match cmd {
        KeySubcommand::Generate { output } => {
            let (key_file, _) = KeyFile::generate();
            info!("Generated ed25519 key {}", key_file.account_id);

            if let Some(path) = output {
                key_file.save(path)?;
                info!("Key saved to: {}", path.display());
                writeln!(out, "{}", key_file.account_id.to_hex())
                    .map_err(|e| RunnerError::Io(e.to_string()))
            } else {
                writeln!(out, "{}", key_file.to_json()?).map_err(|e| RunnerError::Io(e.to_string()))
            }
        }
        KeySubcommand::Inspect { key } => {
            let key_file = KeyFile::load(key)?;
            // Validates the secret against the stored account id
            key_file.signing_key()?;
            writeln!(out, "{}", key_file.account_id.to_hex())
                .map_err(|e| RunnerError::Io(e.to_string()))
        }
    }
}

/// Inserts externally produced records. Existing records are never overwritten,
/// so fee changes can only go through the signed operations.
///
/// Every file is read and validated before the first insert, so a bad file
/// leaves the store as it was.
fn import_records<S: RecordStore>(
    cmd: &ImportCmd,
    store: &S,
    out: &mut dyn Write,
) -> Result<(), RunnerError> {
    let configs = cmd
        .configs
        .iter()
        .map(|path| read_json::<WhirlpoolsConfig>(path))
        .collect::<Result<Vec<_>, _>>()?;
    let pools = cmd
        .pools
        .iter()
        .map(|path| read_json::<Whirlpool>(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut batch = BTreeSet::new();
    for config in &configs {
        validate_fee_rate(config.default_fee_rate)?;
        validate_protocol_fee_rate(config.default_protocol_fee_rate)?;
        ensure_new(store, &mut batch, config)?;
    }
    let imported_configs: BTreeSet<AccountId> = configs.iter().map(|config| config.key).collect();

    for pool in &pools {
        validate_pool(store, &imported_configs, pool)?;
        ensure_new(store, &mut batch, pool)?;
    }

    for config in &configs {
        insert_new(store, config)?;
        info!("Imported config {}", config.key);
        writeln!(out, "config {}", config.key.to_hex())
            .map_err(|e| RunnerError::Io(e.to_string()))?;
    }
    for pool in &pools {
        insert_new(store, pool)?;
        info!("Imported pool {}", pool.key);
        writeln!(out, "pool {}", pool.key.to_hex())
            .map_err(|e| RunnerError::Io(e.to_string()))?;
    }

    Ok(())
}

fn validate_pool<S: RecordStore>(
    store: &S,
    imported_configs: &BTreeSet<AccountId>,
    pool: &Whirlpool,
) -> Result<(), RunnerError> {
    let expected_key = Whirlpool::derive_key(
        &pool.whirlpools_config,
        &pool.token_mint_a,
        &pool.token_mint_b,
        pool.tick_spacing,
    );
    if pool.key != expected_key {
        return Err(RunnerError::InvalidRecord(format!(
            "pool key {} does not match derived key {}",
            pool.key.to_hex(),
            expected_key.to_hex()
        )));
    }
    validate_fee_rate(pool.fee_rate)?;
    validate_protocol_fee_rate(pool.protocol_fee_rate)?;

    let config_known = imported_configs.contains(&pool.whirlpools_config)
        || store.get::<WhirlpoolsConfig>(&pool.whirlpools_config)?.is_some();
    if !config_known {
        return Err(RunnerError::InvalidRecord(format!(
            "pool {} references unknown config {}",
            pool.key.to_hex(),
            pool.whirlpools_config.to_hex()
        )));
    }
    Ok(())
}

/// Fails if `record` is already stored or appears twice in the batch
fn ensure_new<S: RecordStore, R: Record>(
    store: &S,
    batch: &mut BTreeSet<Vec<u8>>,
    record: &R,
) -> Result<(), RunnerError> {
    let key = record.key();
    if !batch.insert(R::storage_key(&key)) || store.get::<R>(&key)?.is_some() {
        return Err(RunnerError::RecordExists(key.to_hex()));
    }
    Ok(())
}

fn insert_new<S: RecordStore, R: Record>(store: &S, record: &R) -> Result<(), RunnerError> {
    if !store.insert(record)? {
        return Err(RunnerError::RecordExists(record.key().to_hex()));
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RunnerError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RunnerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| RunnerError::InvalidRecord(format!("{}: {}", path.display(), e)))
}

fn print_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<(), RunnerError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| RunnerError::Io(e.to_string()))?;
    writeln!(out, "{}", json).map_err(|e| RunnerError::Io(e.to_string()))
}

/// Runner errors
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Key error: {0}")]
    Key(#[from] KeyFileError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Record already exists: {0}")]
    RecordExists(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<StoreError> for RunnerError {
    fn from(e: StoreError) -> Self {
        RunnerError::Governance(GovernanceError::Store(e))
    }
}
