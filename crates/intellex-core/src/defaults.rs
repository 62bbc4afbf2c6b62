//! Centralized default constants for the intellex worker.
//!
//! Single source of truth for shared default values. Crates reference these
//! constants instead of defining their own magic numbers.

// =============================================================================
// QUEUE
// =============================================================================

/// Redis list key for message jobs, shared by all producers and workers.
pub const QUEUE_KEY: &str = "intellex:message_jobs";

/// Blocking-pop timeout in seconds. Finite so the worker can re-check its
/// shutdown flag between waits.
pub const POLL_TIMEOUT_SECS: u64 = 1;

/// Prefix for generated job ids.
pub const JOB_ID_PREFIX: &str = "job-";

// =============================================================================
// API CALLBACKS
// =============================================================================

/// Default base URL of the API receiving result callbacks.
pub const API_BASE_URL: &str = "http://localhost:8000";

/// Default callback HTTP request timeout in seconds.
pub const API_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// LLM
// =============================================================================

/// Default OpenAI-compatible base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default generation model.
pub const OPENAI_MODEL: &str = "gpt-4-turbo-preview";

/// Default sampling temperature.
pub const OPENAI_TEMPERATURE: f64 = 0.7;

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// WORKER
// =============================================================================

/// Default worker event broadcast channel capacity.
pub const EVENT_BUS_CAPACITY: usize = 256;

/// Characters of user content echoed into the "Analyzing Request" thought.
pub const CONTENT_PREVIEW_CHARS: usize = 50;
