//! Single-consumer dispatch loop for message jobs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

use intellex_core::{
    defaults, CallbackPayload, CallbackSender, ContentGenerator, MessageJob, QueueBackend,
};

/// Configuration for the message worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Blocking-pop timeout for queue fetches, in seconds. Finite so the
    /// shutdown flag is observed between waits.
    pub poll_timeout_secs: u64,
    /// Whether to enable job processing.
    pub enabled: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_timeout_secs: defaults::POLL_TIMEOUT_SECS,
            enabled: true,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `WORKER_ENABLED` | `true` | Enable/disable job processing |
    /// | `WORKER_POLL_TIMEOUT_SECS` | `1` | Queue fetch timeout |
    pub fn from_env() -> Self {
        let enabled = std::env::var("WORKER_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let poll_timeout_secs = std::env::var("WORKER_POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::POLL_TIMEOUT_SECS)
            .max(1);

        Self {
            poll_timeout_secs,
            enabled,
        }
    }

    /// Set the queue fetch timeout.
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Enable or disable job processing.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Event emitted by the message worker.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// A job was pulled from the queue and handed to the generator.
    JobStarted { job_id: String },
    /// A job completed (including callback delivery, when requested).
    JobCompleted { job_id: String },
    /// A job failed and was dropped; the loop continues.
    JobFailed { job_id: String, error: String },
    /// Worker started.
    WorkerStarted,
    /// Worker stopped.
    WorkerStopped,
}

/// Handle for controlling a running worker.
pub struct WorkerHandle {
    shutdown_tx: mpsc::Sender<()>,
    event_rx: broadcast::Receiver<WorkerEvent>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Signal the worker to stop after its current fetch/dispatch cycle.
    ///
    /// Idempotent: signalling an already-stopped (or stopping) worker is
    /// a no-op.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }

    /// Get a receiver for worker events.
    pub fn events(&self) -> broadcast::Receiver<WorkerEvent> {
        self.event_rx.resubscribe()
    }

    /// Wait for the worker loop to exit.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Message worker: pulls jobs from a queue backend one at a time, runs the
/// content generator, and forwards results to the callback sender.
///
/// A single logical consumer: at most one job is in flight, and the only
/// suspension points are the queue fetch, the generator, and the callback
/// round-trip. Per-job failures are logged and dropped — a bad job never
/// terminates the loop, and no retry or dead-letter path exists.
pub struct MessageWorker {
    backend: Arc<dyn QueueBackend>,
    generator: Arc<dyn ContentGenerator>,
    callbacks: Arc<dyn CallbackSender>,
    config: WorkerConfig,
    event_tx: broadcast::Sender<WorkerEvent>,
}

impl MessageWorker {
    /// Create a new worker over injected collaborators.
    pub fn new(
        backend: Arc<dyn QueueBackend>,
        generator: Arc<dyn ContentGenerator>,
        callbacks: Arc<dyn CallbackSender>,
        config: WorkerConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(defaults::EVENT_BUS_CAPACITY);
        Self {
            backend,
            generator,
            callbacks,
            config,
            event_tx,
        }
    }

    /// Get a receiver for worker events.
    pub fn events(&self) -> broadcast::Receiver<WorkerEvent> {
        self.event_tx.subscribe()
    }

    /// Start the worker loop and return a handle for control.
    pub fn start(self) -> WorkerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        let event_rx = self.event_tx.subscribe();

        let task = tokio::spawn(async move {
            self.run(&mut shutdown_rx).await;
        });

        WorkerHandle {
            shutdown_tx,
            event_rx,
            task,
        }
    }

    /// Run the dispatch loop until a shutdown signal arrives.
    ///
    /// Shutdown is cooperative: the flag is checked between cycles, so an
    /// in-flight dispatch always completes before the loop exits.
    async fn run(&self, shutdown_rx: &mut mpsc::Receiver<()>) {
        if !self.config.enabled {
            info!("Message worker is disabled, not starting");
            return;
        }

        info!(
            poll_timeout_secs = self.config.poll_timeout_secs,
            "Message worker started"
        );
        let _ = self.event_tx.send(WorkerEvent::WorkerStarted);

        let poll_timeout = Duration::from_secs(self.config.poll_timeout_secs);

        loop {
            if shutdown_rx.try_recv().is_ok() {
                info!("Message worker received shutdown signal");
                break;
            }

            match self.backend.get(poll_timeout).await {
                Ok(Some(job)) => self.dispatch(job).await,
                // Fetch timed out (or a malformed record was skipped):
                // nothing to do, re-poll.
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "Failed to fetch job");
                    tokio::select! {
                        _ = shutdown_rx.recv() => {
                            info!("Message worker received shutdown signal");
                            break;
                        }
                        _ = sleep(poll_timeout) => {}
                    }
                }
            }
        }

        let _ = self.event_tx.send(WorkerEvent::WorkerStopped);
        info!("Message worker stopped");
    }

    /// Dispatch a single job, isolating any failure to this job.
    async fn dispatch(&self, job: MessageJob) {
        let start = Instant::now();
        let job_id = job.job_id.clone();

        info!(job_id = %job_id, project_id = %job.project.id, "Processing message job");
        let _ = self.event_tx.send(WorkerEvent::JobStarted {
            job_id: job_id.clone(),
        });

        match self.handle(&job).await {
            Ok(()) => {
                info!(
                    job_id = %job_id,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Message job completed"
                );
                let _ = self.event_tx.send(WorkerEvent::JobCompleted { job_id });
            }
            Err(e) => {
                warn!(
                    job_id = %job_id,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Message job failed"
                );
                let _ = self.event_tx.send(WorkerEvent::JobFailed {
                    job_id,
                    error: e.to_string(),
                });
            }
        }
    }

    async fn handle(&self, job: &MessageJob) -> intellex_core::Result<()> {
        let (response, thoughts) = self
            .generator
            .process(&job.project, &job.user_content)
            .await?;

        if let Some(target) = &job.callback_path {
            let payload = CallbackPayload {
                job_id: job.job_id.clone(),
                project_id: job.project.id.clone(),
                response,
                thoughts,
            };
            self.callbacks.send(target, &payload).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_config_default() {
        let config = WorkerConfig::default();
        assert_eq!(config.poll_timeout_secs, 1);
        assert!(config.enabled);
    }

    #[test]
    fn test_worker_config_builder() {
        let config = WorkerConfig::default()
            .with_poll_timeout(5)
            .with_enabled(false);

        assert_eq!(config.poll_timeout_secs, 5);
        assert!(!config.enabled);
    }

    #[test]
    fn test_worker_config_builder_preserves_other_fields() {
        let config = WorkerConfig::default().with_poll_timeout(3);
        assert!(config.enabled);

        let config = WorkerConfig::default().with_enabled(false);
        assert_eq!(config.poll_timeout_secs, 1);
    }

    #[test]
    fn test_worker_event_clone_and_debug() {
        let event = WorkerEvent::JobFailed {
            job_id: "job-1".to_string(),
            error: "boom".to_string(),
        };
        let cloned = event.clone();
        let debug_str = format!("{:?}", cloned);
        assert!(debug_str.contains("JobFailed"));
        assert!(debug_str.contains("boom"));
    }
}
