//! HR assistant: knowledge ranking, per-user sessions and the language model.
//!
//! A failed or unconfigured model never fails the request. The answer then
//! degrades to the best-ranked knowledge entry, or a fixed apology when
//! nothing matched.

pub mod history;
pub mod intent;
pub mod llm;
pub mod prompt;
pub mod ranker;

pub use history::{ConversationHistory, SessionStore, Turn};
pub use intent::{detect_intents, primary_intent, Intent};
pub use llm::{ChatCompletionClient, ChatMessage, ChatModel, Role};
pub use prompt::{build_messages, EmployeeContext};
pub use ranker::{expand_query, rank_knowledge, ScoredEntry};

use std::sync::Arc;

use crate::config::assistant::PROMPT_TOP_K;
use crate::core::error::{AppError, AppResult};
use crate::core::types::KnowledgeEntry;

/// Reply when neither the model nor the knowledge base can answer.
pub const APOLOGY: &str = "Sorry, I can't answer that right now. Please use the menu.";

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    /// Text to send, including the menu tip when there is one.
    pub text: String,
    /// Raw model answer or fallback text, without the tip.
    pub answer: String,
    /// Titles of the knowledge entries the reply is based on.
    pub sources: Vec<String>,
    pub intent: Option<Intent>,
    /// True when the model was skipped or failed.
    pub fallback: bool,
}

pub struct Assistant {
    model: Option<Arc<dyn ChatModel>>,
    sessions: SessionStore,
}

impl Assistant {
    pub fn new(model: Option<Arc<dyn ChatModel>>, sessions: SessionStore) -> Self {
        Self { model, sessions }
    }

    /// Assistant backed by `ChatCompletionClient::from_env()`.
    pub fn from_env(sessions: SessionStore) -> AppResult<Self> {
        let model = ChatCompletionClient::from_env()?.map(|client| Arc::new(client) as Arc<dyn ChatModel>);
        Ok(Self::new(model, sessions))
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Answers `query` for a user.
    ///
    /// `user_id` selects the session whose recent turns go into the prompt;
    /// `None` asks without history (CLI).
    pub async fn answer(
        &self,
        user_id: Option<i64>,
        query: &str,
        knowledge: &[KnowledgeEntry],
        employee: Option<&EmployeeContext>,
    ) -> AssistantReply {
        let intent = primary_intent(query);
        let ranked = rank_knowledge(query, knowledge, PROMPT_TOP_K);
        let turns = user_id.map(|id| self.sessions.prompt_turns(id)).unwrap_or_default();
        let messages = build_messages(query, &ranked, employee, &turns);

        match self.complete(&messages).await {
            Ok(answer) => {
                if let Some(id) = user_id {
                    self.sessions.record_turn(id, query, &answer);
                }
                let text = match intent {
                    Some(intent) => format!("{}\n\n[TIP] {}", answer, intent.tip()),
                    None => answer.clone(),
                };
                AssistantReply {
                    text,
                    answer,
                    sources: ranked.iter().map(|s| s.entry.title.clone()).collect(),
                    intent,
                    fallback: false,
                }
            }
            Err(e) => {
                log::error!("Assistant falling back to knowledge base: {}", e);
                Self::fallback(&ranked)
            }
        }
    }

    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        match &self.model {
            Some(model) => model.complete(messages).await,
            None => Err(AppError::LanguageModel("no model configured".to_string())),
        }
    }

    fn fallback(ranked: &[ScoredEntry]) -> AssistantReply {
        let (answer, sources) = match ranked.first() {
            Some(best) => (
                format!("{}: {}", best.entry.title, best.entry.body),
                vec![best.entry.title.clone()],
            ),
            None => (APOLOGY.to_string(), Vec::new()),
        };
        AssistantReply {
            text: answer.clone(),
            answer,
            sources,
            intent: None,
            fallback: true,
        }
    }
}
