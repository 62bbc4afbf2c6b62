//! Job construction and the enqueue operation.

use uuid::Uuid;

use intellex_core::{defaults, MessageJob, QueueBackend, ResearchProject, Result};

/// Generate a fresh job id: `job-` plus ten hex characters.
///
/// Unique within operational scope; the format matches the ids the API
/// already hands back to clients for out-of-band status tracking.
pub fn new_job_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", defaults::JOB_ID_PREFIX, &hex[..10])
}

/// Construct an immutable [`MessageJob`] and publish it to `backend`.
///
/// Returns the assigned job id as soon as the publish succeeds — enqueue
/// never waits on processing. A failed publish (for example a durable
/// backend losing its connection) propagates to the caller; enqueue is not
/// best-effort.
pub async fn enqueue_message(
    backend: &dyn QueueBackend,
    project: ResearchProject,
    user_content: impl Into<String>,
    callback_path: Option<String>,
) -> Result<String> {
    let job_id = new_job_id();
    let job = MessageJob::new(job_id.clone(), project, user_content, callback_path);
    backend.put(job).await?;
    Ok(job_id)
}
