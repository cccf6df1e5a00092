use crate::channels::whatsapp::WhatsAppSender;
use crate::config::AppConfig;
use crate::kb::KnowledgeBase;
use crate::llm::gemini::GeminiClient;
use crate::llm::LlmProvider;
use std::sync::Arc;

pub struct AppState {
    pub config: AppConfig,
    pub kb: KnowledgeBase,
    pub llm: Arc<dyn LlmProvider>,
    pub whatsapp: WhatsAppSender,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(
            config.gemini.api_key.clone(),
            config.gemini.model.clone(),
            Some(config.gemini.api_base.clone()),
        ));
        let whatsapp = WhatsAppSender::new(
            config.whatsapp.access_token.clone(),
            config.whatsapp.phone_number_id.clone(),
            Some(config.whatsapp.graph_base.clone()),
        );
        let kb = KnowledgeBase::new(config.knowledge_base_path.clone());
        Self {
            config,
            kb,
            llm,
            whatsapp,
        }
    }
}
