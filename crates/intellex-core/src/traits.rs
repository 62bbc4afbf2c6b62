//! Trait seams between the dispatch core and its collaborators.
//!
//! The worker depends only on these traits; concrete implementations
//! (in-process queue, Redis queue, agent orchestrator, API client) are
//! constructed once at process start and injected, so tests can substitute
//! doubles for any of them.

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{AgentThought, CallbackPayload, MessageJob, ResearchProject};
use crate::Result;

/// A FIFO queue of message jobs with a single logical consumer.
///
/// Both implementations preserve enqueue order for items placed by a single
/// producer and deliver each item to exactly one popper.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Publish a job to the tail of the queue.
    ///
    /// Must succeed before the enqueue operation returns to its caller; a
    /// failed publish propagates synchronously.
    async fn put(&self, job: MessageJob) -> Result<()>;

    /// Pop the head job, waiting up to `timeout` for one to appear.
    ///
    /// Returns `Ok(None)` on timeout so the dispatch loop can re-check its
    /// shutdown flag between waits. Durable implementations also return
    /// `Ok(None)` after skipping a malformed record.
    async fn get(&self, timeout: Duration) -> Result<Option<MessageJob>>;
}

/// Turns a user message into a response plus a reasoning trace.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Process one message in the context of its project.
    ///
    /// Expected degraded conditions (no LLM configured, transient model
    /// errors) resolve to explanatory response text rather than `Err`;
    /// only unexpected failures error, and those are isolated per job by
    /// the dispatch loop.
    async fn process(
        &self,
        project: &ResearchProject,
        user_content: &str,
    ) -> Result<(String, Vec<AgentThought>)>;
}

/// Delivers a job's result payload to the API.
#[async_trait]
pub trait CallbackSender: Send + Sync {
    /// Post `payload` to `target`.
    ///
    /// `target` may be an absolute URL or a path relative to the configured
    /// base. Non-success HTTP status must surface as an error so the
    /// dispatch loop can log the failed delivery.
    async fn send(&self, target: &str, payload: &CallbackPayload) -> Result<()>;
}
