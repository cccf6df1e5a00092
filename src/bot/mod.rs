//! One conversational turn: knowledge base in, reply out.

use crate::llm::prompt::build_prompt;
use crate::llm::LlmProvider;
use crate::shared::state::AppState;

/// Answers a single user message. The knowledge base is read fresh for every
/// turn and any completion failure has already been absorbed into the
/// fallback reply, so this never errors.
pub async fn respond(state: &AppState, user_message: &str) -> String {
    let knowledge_base = state.kb.load();
    let prompt = build_prompt(&knowledge_base, user_message);
    state.llm.generate_reply(&prompt).await
}
