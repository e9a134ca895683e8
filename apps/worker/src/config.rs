use std::time::Duration;

use dompet_core::LedgerConfig;

const DEFAULT_DB_PATH: &str = "./db/dompet.db";
const DEFAULT_OP_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub db_path: String,
    pub default_currency: String,
    /// Upper bound for one processing run.
    pub op_timeout: Duration,
    /// Run repeatedly on this interval; `None` runs once and exits.
    pub process_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("DOMPET_DB_PATH")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let default_currency = lookup("DOMPET_DEFAULT_CURRENCY")
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| LedgerConfig::default().default_currency);
        let timeout_ms: u64 = lookup("DOMPET_OP_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_OP_TIMEOUT_MS);
        let process_interval = lookup("DOMPET_PROCESS_INTERVAL_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Self {
            db_path,
            default_currency,
            op_timeout: Duration::from_millis(timeout_ms),
            process_interval,
        }
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(self.default_currency.clone())
    }
}
