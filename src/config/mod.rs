use log::warn;
use std::path::PathBuf;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com";

#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub whatsapp: WhatsAppConfig,
    pub knowledge_base_path: PathBuf,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

#[derive(Clone)]
pub struct WhatsAppConfig {
    pub access_token: String,
    pub phone_number_id: String,
    pub verify_token: String,
    pub graph_base: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let gemini = GeminiConfig {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
        };
        if gemini.api_key.is_empty() {
            warn!("GEMINI_API_KEY is not set; replies will degrade to the fallback message");
        }

        let whatsapp = WhatsAppConfig {
            access_token: std::env::var("WHATSAPP_ACCESS_TOKEN").unwrap_or_default(),
            phone_number_id: std::env::var("WHATSAPP_PHONE_ID").unwrap_or_default(),
            verify_token: std::env::var("WHATSAPP_VERIFY_TOKEN")
                .unwrap_or_else(|_| "webhook_verify".to_string()),
            graph_base: std::env::var("GRAPH_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GRAPH_API_BASE.to_string()),
        };
        if whatsapp.access_token.is_empty() || whatsapp.phone_number_id.is_empty() {
            warn!("WHATSAPP_ACCESS_TOKEN or WHATSAPP_PHONE_ID is not set; outbound WhatsApp delivery will fail");
        }

        Ok(AppConfig {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            gemini,
            whatsapp,
            knowledge_base_path: std::env::var("KNOWLEDGE_BASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("knowledge_base.txt")),
        })
    }
}
