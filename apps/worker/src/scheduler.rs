//! Processing runs: post due recurring items, then report budget status.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use dompet_core::utils::time_utils;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::main_lib::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub recurring_processed: usize,
    pub budgets_checked: usize,
    pub over_budget: usize,
}

/// Runs once, or on the configured interval until Ctrl-C.
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let Some(period) = state.config.process_interval else {
        run_once(&state, time_utils::today()).await?;
        return Ok(());
    };

    info!("Processing scheduler started ({}s interval)", period.as_secs());
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_once(&state, time_utils::today()).await {
                    error!("Processing run failed: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested, stopping scheduler");
                return Ok(());
            }
        }
    }
}

/// A single run as of the given date.
pub async fn run_once(state: &AppState, as_of: NaiveDate) -> anyhow::Result<RunSummary> {
    let services = &state.services;

    let recurring_processed = tokio::time::timeout(
        state.config.op_timeout,
        services.recurring_service.process_due_as_of(as_of),
    )
    .await
    .with_context(|| {
        format!(
            "recurring processing timed out after {}ms",
            state.config.op_timeout.as_millis()
        )
    })?
    .context("recurring processing failed")?;

    let statuses = services
        .budget_service
        .get_all_status()
        .context("failed to load budget status")?;

    let mut over_budget = 0;
    for status in &statuses {
        if status.is_over_budget {
            over_budget += 1;
            warn!(
                "Budget {} ({}) is over: spent {} of {} ({}%)",
                status.budget.id,
                status.category_name,
                status.spent,
                status.budget.amount,
                status.progress_percent
            );
        } else {
            info!(
                "Budget {} ({}): spent {} of {}, {} remaining",
                status.budget.id,
                status.category_name,
                status.spent,
                status.budget.amount,
                status.remaining
            );
        }
    }

    let summary = RunSummary {
        recurring_processed,
        budgets_checked: statuses.len(),
        over_budget,
    };
    info!(
        "Run for {} complete: {} recurring item(s) posted, {} budget(s) checked, {} over budget",
        as_of, summary.recurring_processed, summary.budgets_checked, summary.over_budget
    );
    Ok(summary)
}
