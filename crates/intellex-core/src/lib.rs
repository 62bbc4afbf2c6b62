//! # intellex-core
//!
//! Core types, traits, and abstractions for the intellex message worker.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the queue, agent, and client crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{AgentThought, CallbackPayload, MessageJob, ResearchProject};
pub use traits::{CallbackSender, ContentGenerator, QueueBackend};

/// Current Unix timestamp in milliseconds.
///
/// Thought and message timestamps use millisecond precision to match the
/// API's chat message schema.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_recent() {
        let ts = now_ms();
        // Sanity: after 2020-01-01 and before 2100-01-01, in milliseconds.
        assert!(ts > 1_577_836_800_000);
        assert!(ts < 4_102_444_800_000);
    }
}
