use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use dompet_core::LedgerServices;
use dompet_storage_sqlite::SqliteStorage;

use crate::config::Config;

pub struct AppState {
    pub services: LedgerServices,
    pub config: Config,
}

pub fn init_tracing() {
    let log_format = std::env::var("DOMPET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let ledger_config = config.ledger_config();
    ledger_config.validate()?;

    let storage = SqliteStorage::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let services =
        LedgerServices::new(storage.repositories(), storage.unit_of_work(), &ledger_config)?;

    Ok(Arc::new(AppState { services, config }))
}
