//! Background scheduler for the reconciliation sweep.
//!
//! The webhook fan-out is best-effort; this task periodically re-derives
//! anything a partial failure left behind.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Delay before the first sweep, letting the server finish starting up.
const INITIAL_DELAY_SECS: u64 = 30;

/// Starts the periodic reconciliation task. A zero interval disables it.
pub fn start_reconciliation_scheduler(state: Arc<AppState>, period: Duration) {
    if period.is_zero() {
        info!("Reconciliation scheduler disabled");
        return;
    }

    tokio::spawn(async move {
        info!("Reconciliation scheduler started (every {:?})", period);
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut tick = interval(period);
        loop {
            tick.tick().await;
            match state.reconciliation_service.run_sweep().await {
                Ok(summary) => {
                    if summary.allocations_created > 0 || summary.deactivations_applied > 0 {
                        info!(
                            "Scheduled sweep repaired state: {} allocations created, {} deactivations",
                            summary.allocations_created, summary.deactivations_applied
                        );
                    }
                }
                Err(e) => warn!("Scheduled reconciliation sweep failed: {}", e),
            }
        }
    });
}
