use courtfund_server::api::app_router;
use courtfund_server::config::Config;
use courtfund_server::main_lib::{build_state, init_tracing};
use courtfund_server::scheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Background repair of any side effects a failed webhook fan-out left
    // behind.
    scheduler::start_reconciliation_scheduler(state.clone(), config.reconcile_interval);

    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
