//! Worker process command: register with a coordinator and run the control
//! loop until interrupted or told to stop.

use std::sync::Arc;

use docrelay_worker::{HttpExtractor, WorkerConfig, WorkerRuntime};
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_WORKER;
use crate::config::WorkerCliConfig;

/// Runs a worker process: register (or resume), then loop until interrupted
/// or the coordinator issues a stop/shutdown command.
///
/// Exit codes: `0` on any clean stop (interrupt, coordinator stop or
/// shutdown); a non-zero code is only ever returned as an error by
/// registration failure, which the caller turns into a process exit.
pub async fn run(config: WorkerCliConfig) -> anyhow::Result<()> {
    let config: WorkerConfig = config.into();
    let runtime = WorkerRuntime::new(config, Arc::new(HttpExtractor::new()));

    let worker_id = runtime.register().await?;

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        wait_for_interrupt().await;
        watcher.cancel();
    });

    let reason = runtime.run(worker_id, cancel).await?;

    tracing::info!(
        target: TRACING_TARGET_WORKER,
        worker_id = %worker_id,
        reason = ?reason,
        "Worker stopped"
    );

    Ok(())
}

async fn wait_for_interrupt() {
    let sigint = async {
        let _ = ctrl_c().await;
    };

    #[cfg(unix)]
    let sigterm = async {
        if let Ok(mut signal) = unix::signal(unix::SignalKind::terminate()) {
            signal.recv().await;
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = sigint => {},
        () = sigterm => {},
    }

    tracing::info!(target: TRACING_TARGET_WORKER, "Received shutdown signal");
}
