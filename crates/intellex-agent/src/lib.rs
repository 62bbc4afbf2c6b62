//! # intellex-agent
//!
//! The content-generation collaborator for the intellex worker: an agent
//! orchestrator that turns a user message into a response plus a
//! step-by-step thought trace, backed by an OpenAI-compatible LLM.
//!
//! The orchestrator degrades gracefully: with no API key configured it
//! returns a fixed explanatory message instead of erroring, so the dispatch
//! loop treats "LLM not configured" as a normal outcome rather than a
//! failed job.

pub mod llm;
pub mod mock;
pub mod orchestrator;

pub use llm::{LlmClient, LlmConfig, Provider, LLM_DISABLED_MESSAGE, LLM_FALLBACK_MESSAGE};
pub use mock::MockGenerator;
pub use orchestrator::AgentOrchestrator;
