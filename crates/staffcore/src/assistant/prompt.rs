//! Prompt assembly for the HR assistant.

use indoc::formatdoc;

use super::history::Turn;
use super::llm::ChatMessage;
use super::ranker::ScoredEntry;
use crate::core::utils::format_rupiah;

const NO_KNOWLEDGE: &str = "No matching entry in the knowledge base.";

/// Facts about the asking employee placed into the system prompt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeContext {
    pub name: String,
    pub position: Option<String>,
    pub department: Option<String>,
    /// Total pay of the current period, if a slip exists.
    pub current_salary: Option<f64>,
}

impl EmployeeContext {
    pub fn describe(&self) -> String {
        let mut line = format!("Employee: {}", self.name);
        if let Some(position) = &self.position {
            line.push_str(&format!(", Position: {}", position));
        }
        if let Some(department) = &self.department {
            line.push_str(&format!(", Department: {}", department));
        }
        if let Some(salary) = self.current_salary {
            line.push_str(&format!(", Salary: {}", format_rupiah(salary)));
        }
        line
    }
}

pub fn system_prompt(knowledge: &[ScoredEntry], employee: Option<&EmployeeContext>) -> String {
    let knowledge = if knowledge.is_empty() {
        NO_KNOWLEDGE.to_string()
    } else {
        knowledge
            .iter()
            .map(|s| format!("{}: {}", s.entry.title, s.entry.body))
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    let employee = employee.map(EmployeeContext::describe).unwrap_or_default();

    formatdoc!(
        "
        HR assistant for the company self-service bot.

        Knowledge base:
        {knowledge}

        {employee}

        RULES:
        - Answer briefly (at most 3 sentences)
        - Stay professional, answer in the language of the question
        - Suggest a menu when the user needs to take an action
        - Never invent information",
        knowledge = knowledge,
        employee = employee,
    )
}

/// System prompt, then the recent turns as user/assistant pairs, then the query.
pub fn build_messages(
    query: &str,
    knowledge: &[ScoredEntry],
    employee: Option<&EmployeeContext>,
    turns: &[Turn],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2 + turns.len() * 2);
    messages.push(ChatMessage::system(system_prompt(knowledge, employee)));
    for turn in turns {
        messages.push(ChatMessage::user(turn.query.as_str()));
        messages.push(ChatMessage::assistant(turn.response.as_str()));
    }
    messages.push(ChatMessage::user(query));
    messages
}
