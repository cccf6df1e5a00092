//! Prompt assembly for the customer-facing assistant.

/// Builds the full prompt for one turn: the assistant persona and ground
/// rules, the knowledge base, and the customer's message. Pure function; no
/// length limit is enforced here, the provider rejects or truncates oversized
/// prompts on its side.
pub fn build_prompt(knowledge_base: &str, user_message: &str) -> String {
    format!(
        "You are a sales and customer-service assistant named Adrian.\n\
         Your main role is to strictly follow the rules and information in the Knowledge Base below.\n\
         Do not invent information and do not deviate from the defined strategies. \
         Be direct, professional, and follow the stipulated conversation flow.\n\
         If the customer asks about something that is not in the Knowledge Base, \
         answer that you do not have that information and that you will check.\n\
         \n\
         ---\n\
         Knowledge Base:\n\
         {knowledge_base}\n\
         ---\n\
         \n\
         Customer question: \"{user_message}\"\n\
         \n\
         Your answer:\n"
    )
}
