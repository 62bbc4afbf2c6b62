//! # intellex-jobs
//!
//! Message job queueing and dispatch for the intellex worker.
//!
//! This crate provides:
//! - The enqueue operation assigning job ids and publishing to a backend
//! - Two interchangeable [`QueueBackend`] implementations: an in-process
//!   FIFO and a durable Redis list shared across worker processes
//! - A single-consumer dispatch loop with per-job failure isolation and
//!   cooperative shutdown
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use intellex_jobs::{enqueue_message, EphemeralQueue, MessageWorker, WorkerConfig};
//!
//! let backend = Arc::new(EphemeralQueue::new());
//! let worker = MessageWorker::new(backend.clone(), generator, callbacks, WorkerConfig::default());
//! let handle = worker.start();
//!
//! let job_id = enqueue_message(backend.as_ref(), project, "hello", None).await?;
//!
//! // Graceful shutdown: the current cycle finishes first.
//! handle.shutdown().await;
//! handle.join().await;
//! ```

pub mod jobs;
pub mod queue;
pub mod worker;

// Re-export core types
pub use intellex_core::{CallbackSender, ContentGenerator, MessageJob, QueueBackend};

pub use jobs::{enqueue_message, new_job_id};
pub use queue::{decode_record, EphemeralQueue, RedisQueue};
pub use worker::{MessageWorker, WorkerConfig, WorkerEvent, WorkerHandle};

/// Default blocking-pop timeout for queue fetches (seconds).
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = intellex_core::defaults::POLL_TIMEOUT_SECS;
