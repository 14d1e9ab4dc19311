//! SIGINT/SIGTERM wiring for cooperative shutdown

use contacts_book_core::CancellationToken;
use tracing::{debug, info, warn};

/// Install process signal handlers and return the token they cancel
///
/// Handlers run on a dedicated thread with a single-threaded tokio runtime.
/// Commands only observe the token at their boundaries: while waiting for the
/// storage lock and before running their operation.
pub fn install_shutdown_handler() -> CancellationToken {
    let cancel = CancellationToken::new();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            warn!("signal handling disabled, failed to start runtime: {e}");
            return cancel;
        }
    };

    let cancel_for_signals = cancel.clone();
    let spawned = std::thread::Builder::new()
        .name("cb-signals".to_string())
        .spawn(move || {
            if runtime.block_on(wait_for_shutdown()) {
                cancel_for_signals.cancel();
            }
        });

    if let Err(e) = spawned {
        warn!("signal handling disabled, failed to spawn thread: {e}");
    }

    cancel
}

/// Resolve once a shutdown signal arrives; `false` if no handler could be installed
async fn wait_for_shutdown() -> bool {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                debug!("no SIGTERM handler: {e}");
                return wait_for_ctrl_c().await;
            }
        };

        tokio::select! {
            received = wait_for_ctrl_c() => received,
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
                true
            }
        }
    }

    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await
    }
}

async fn wait_for_ctrl_c() -> bool {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Received SIGINT (Ctrl+C)");
            true
        }
        Err(e) => {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
            false
        }
    }
}
