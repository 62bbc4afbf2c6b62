//! intellex-worker - worker process running the message dispatch loop.
//!
//! Collaborators are constructed once at startup and injected into the
//! worker. The durable Redis backend is selected when `REDIS_URL` is set;
//! otherwise jobs flow through an in-memory queue that only outlives this
//! process's own enqueues.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intellex_agent::AgentOrchestrator;
use intellex_client::ApiClient;
use intellex_core::{CallbackSender, ContentGenerator, QueueBackend};
use intellex_jobs::{EphemeralQueue, MessageWorker, RedisQueue, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let generator: Arc<dyn ContentGenerator> = Arc::new(AgentOrchestrator::from_env());
    let callbacks: Arc<dyn CallbackSender> = Arc::new(ApiClient::from_env());

    // Missing/invalid Redis configuration is fatal here; only a fully
    // absent REDIS_URL falls back to the in-memory queue.
    let backend: Arc<dyn QueueBackend> = if std::env::var("REDIS_URL").is_ok() {
        let queue = RedisQueue::from_env().await?;
        info!(queue_key = %queue.queue_key(), "Starting message worker (Redis queue)");
        Arc::new(queue)
    } else {
        info!("Starting message worker (in-memory queue)");
        Arc::new(EphemeralQueue::new())
    };

    let worker = MessageWorker::new(backend, generator, callbacks, WorkerConfig::from_env());
    let handle = worker.start();

    shutdown_signal().await?;
    info!("Termination signal received, shutting down");

    handle.shutdown().await;
    handle.join().await;

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }
    Ok(())
}
