//! Shared data models for the intellex worker.
//!
//! All wire-facing types serialize with camelCase field names to stay
//! compatible with the API and with queue records written by other
//! producers. Unknown fields in incoming records are ignored.

use serde::{Deserialize, Serialize};

/// A research project a message belongs to.
///
/// Read-only from the worker's perspective: the API owns the project
/// lifecycle, the worker only carries the reference through to the
/// generator and the callback payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchProject {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub goal: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<i64>,
}

/// One step of the agent's reasoning trace, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentThought {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    /// Unix milliseconds.
    pub timestamp: i64,
}

/// One unit of work: a user message to process plus its result destination.
///
/// Immutable after construction; `job_id` is assigned exactly once at
/// enqueue time. The same type is the durable queue's wire record:
/// `{jobId, project, userContent, callbackPath}`, everything except
/// `userContent` optional on decode (a record without a `jobId` decodes
/// with an empty id rather than failing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageJob {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub project: ResearchProject,
    pub user_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_path: Option<String>,
}

impl MessageJob {
    /// Construct a job. Callers normally go through
    /// `intellex_jobs::enqueue_message`, which also assigns the id.
    pub fn new(
        job_id: impl Into<String>,
        project: ResearchProject,
        user_content: impl Into<String>,
        callback_path: Option<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            project,
            user_content: user_content.into(),
            callback_path,
        }
    }
}

/// Result payload posted back to the API after a job is processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub job_id: String,
    pub project_id: String,
    pub response: String,
    pub thoughts: Vec<AgentThought>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> ResearchProject {
        ResearchProject {
            id: "proj-1".to_string(),
            user_id: "user-1".to_string(),
            title: "Ocean Currents".to_string(),
            goal: "Map thermohaline circulation".to_string(),
            status: "active".to_string(),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_100_000,
            last_message_at: None,
        }
    }

    #[test]
    fn test_message_job_serializes_camel_case() {
        let job = MessageJob::new("job-abc123", sample_project(), "hello", None);
        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["jobId"], "job-abc123");
        assert_eq!(value["userContent"], "hello");
        assert_eq!(value["project"]["userId"], "user-1");
        // Absent callback is omitted, not null
        assert!(value.get("callbackPath").is_none());
    }

    #[test]
    fn test_message_job_round_trip() {
        let job = MessageJob::new(
            "job-abc123",
            sample_project(),
            "find recent papers",
            Some("/api/projects/proj-1/agent-callback".to_string()),
        );
        let raw = serde_json::to_string(&job).unwrap();
        let decoded: MessageJob = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, job);
    }

    #[test]
    fn test_message_job_missing_job_id_decodes_empty() {
        let raw = r#"{"userContent":"hi","project":{"id":"p","userId":"u","title":"t","goal":"g","status":"active","createdAt":0,"updatedAt":0}}"#;
        let decoded: MessageJob = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.job_id, "");
        assert_eq!(decoded.user_content, "hi");
        assert_eq!(decoded.project.id, "p");
        assert!(decoded.callback_path.is_none());
    }

    #[test]
    fn test_message_job_missing_project_decodes_default() {
        let raw = r#"{"jobId":"job-1","userContent":"hi"}"#;
        let decoded: MessageJob = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.project, ResearchProject::default());
    }

    #[test]
    fn test_message_job_unknown_fields_ignored() {
        let raw = r#"{"jobId":"job-1","userContent":"hi","agentMessageId":"am-9","extra":42}"#;
        let decoded: MessageJob = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.job_id, "job-1");
    }

    #[test]
    fn test_message_job_missing_user_content_is_error() {
        let raw = r#"{"jobId":"job-1"}"#;
        assert!(serde_json::from_str::<MessageJob>(raw).is_err());
    }

    #[test]
    fn test_message_job_empty_user_content_allowed() {
        let raw = r#"{"jobId":"job-1","userContent":""}"#;
        let decoded: MessageJob = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.user_content, "");
    }

    #[test]
    fn test_callback_payload_wire_names() {
        let payload = CallbackPayload {
            job_id: "job-1".to_string(),
            project_id: "proj-1".to_string(),
            response: "done".to_string(),
            thoughts: vec![AgentThought {
                id: "th-1".to_string(),
                title: "Analyzing Request".to_string(),
                content: "…".to_string(),
                status: "completed".to_string(),
                timestamp: 1_700_000_000_000,
            }],
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["jobId"], "job-1");
        assert_eq!(value["projectId"], "proj-1");
        assert_eq!(value["thoughts"][0]["title"], "Analyzing Request");
        assert_eq!(value["thoughts"][0]["status"], "completed");
    }
}
