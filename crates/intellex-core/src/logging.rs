//! Structured logging field name constants.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, job dropped or fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), job completions |
//! | DEBUG | Decision points, config choices |

/// Job id being processed.
pub const JOB_ID: &str = "job_id";

/// Project id the job belongs to.
pub const PROJECT_ID: &str = "project_id";

/// Queue key a durable backend reads from.
pub const QUEUE_KEY: &str = "queue_key";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Model name used for generation.
pub const MODEL: &str = "model";

/// LLM provider resolved at startup ("openai", "anthropic", "disabled").
pub const PROVIDER: &str = "provider";
