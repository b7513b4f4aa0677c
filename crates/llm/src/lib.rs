pub mod config;
pub mod gemini;

pub use config::{ModelSettings, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SECRETS_PATH};
pub use gemini::GeminiClient;
