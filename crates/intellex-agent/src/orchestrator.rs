//! Agent orchestrator: builds the reasoning trace and drives the LLM.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use intellex_core::{defaults, now_ms, AgentThought, ContentGenerator, ResearchProject, Result};

use crate::llm::{LlmClient, Provider, LLM_DISABLED_MESSAGE};

/// Produces a response and an ordered thought trace for one user message.
pub struct AgentOrchestrator {
    llm: LlmClient,
}

impl AgentOrchestrator {
    /// Create an orchestrator around an existing LLM client.
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Create an orchestrator configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(LlmClient::from_env())
    }

    fn build_thought(title: &str, content: String, base_ts: i64, offset_ms: i64) -> AgentThought {
        let hex = Uuid::new_v4().simple().to_string();
        AgentThought {
            id: format!("th-{}", &hex[..8]),
            title: title.to_string(),
            content,
            status: "completed".to_string(),
            timestamp: base_ts + offset_ms,
        }
    }

    /// First `CONTENT_PREVIEW_CHARS` characters of the message, with an
    /// ellipsis when truncated.
    fn preview(user_content: &str) -> String {
        let mut preview: String = user_content
            .chars()
            .take(defaults::CONTENT_PREVIEW_CHARS)
            .collect();
        if user_content.chars().count() > defaults::CONTENT_PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }

    fn system_prompt(project: &ResearchProject) -> String {
        format!(
            "You are an advanced AI Research Assistant working on a project titled '{}'.\n\
             Project Goal: {}\n\
             Your role is to help the user achieve this goal by providing detailed, accurate, and structured research.\n\
             Maintain a professional, academic, yet accessible tone.\n\
             If the user asks for a plan update, suggest specific steps.",
            project.title, project.goal
        )
    }
}

#[async_trait]
impl ContentGenerator for AgentOrchestrator {
    async fn process(
        &self,
        project: &ResearchProject,
        user_content: &str,
    ) -> Result<(String, Vec<AgentThought>)> {
        let base_ts = now_ms();
        let preview = Self::preview(user_content);

        debug!(project_id = %project.id, provider = %self.llm.provider(), "Processing message");

        let mut thoughts = vec![
            Self::build_thought(
                "Analyzing Request",
                format!(
                    "Analyzing user input: '{}' in context of project '{}'",
                    preview, project.title
                ),
                base_ts,
                0,
            ),
            Self::build_thought(
                "Formulating Strategy",
                "Determining best research path and sources.".to_string(),
                base_ts,
                500,
            ),
        ];

        let response = if self.llm.provider() == Provider::Disabled {
            LLM_DISABLED_MESSAGE.to_string()
        } else {
            self.llm
                .generate(&Self::system_prompt(project), user_content)
                .await
        };

        thoughts.push(Self::build_thought(
            "Generating Response",
            "Synthesizing findings and formatting output.".to_string(),
            base_ts,
            1000,
        ));

        Ok((response, thoughts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmConfig;

    fn disabled_orchestrator() -> AgentOrchestrator {
        AgentOrchestrator::new(LlmClient::new(LlmConfig::default()))
    }

    fn sample_project() -> ResearchProject {
        ResearchProject {
            id: "proj-1".to_string(),
            user_id: "user-1".to_string(),
            title: "Coral Bleaching".to_string(),
            goal: "Track reef recovery rates".to_string(),
            status: "active".to_string(),
            created_at: 0,
            updated_at: 0,
            last_message_at: None,
        }
    }

    #[tokio::test]
    async fn test_process_builds_three_ordered_thoughts() {
        let orchestrator = disabled_orchestrator();
        let (_, thoughts) = orchestrator
            .process(&sample_project(), "what changed this year?")
            .await
            .unwrap();

        assert_eq!(thoughts.len(), 3);
        assert_eq!(thoughts[0].title, "Analyzing Request");
        assert_eq!(thoughts[1].title, "Formulating Strategy");
        assert_eq!(thoughts[2].title, "Generating Response");
        assert!(thoughts[0].timestamp <= thoughts[1].timestamp);
        assert!(thoughts[1].timestamp <= thoughts[2].timestamp);
        assert_eq!(thoughts[1].timestamp - thoughts[0].timestamp, 500);
        assert_eq!(thoughts[2].timestamp - thoughts[0].timestamp, 1000);
        assert!(thoughts.iter().all(|t| t.status == "completed"));
        assert!(thoughts.iter().all(|t| t.id.starts_with("th-")));
    }

    #[tokio::test]
    async fn test_process_without_llm_returns_sentinel() {
        let orchestrator = disabled_orchestrator();
        let (response, _) = orchestrator
            .process(&sample_project(), "hello")
            .await
            .unwrap();
        assert_eq!(response, LLM_DISABLED_MESSAGE);
    }

    #[tokio::test]
    async fn test_first_thought_mentions_preview_and_title() {
        let orchestrator = disabled_orchestrator();
        let (_, thoughts) = orchestrator
            .process(&sample_project(), "short question")
            .await
            .unwrap();
        assert!(thoughts[0].content.contains("short question"));
        assert!(thoughts[0].content.contains("Coral Bleaching"));
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "x".repeat(80);
        let preview = AgentOrchestrator::preview(&long);
        assert_eq!(preview, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_preview_keeps_short_content() {
        assert_eq!(AgentOrchestrator::preview("hello"), "hello");
    }

    #[test]
    fn test_preview_is_char_boundary_safe() {
        let long = "é".repeat(60);
        let preview = AgentOrchestrator::preview(&long);
        assert_eq!(preview, format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn test_system_prompt_includes_title_and_goal() {
        let prompt = AgentOrchestrator::system_prompt(&sample_project());
        assert!(prompt.contains("Coral Bleaching"));
        assert!(prompt.contains("Track reef recovery rates"));
    }
}
