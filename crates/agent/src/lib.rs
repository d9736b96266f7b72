pub mod client;
pub mod config;
pub mod fallback;
pub mod llm;
pub mod personas;
pub mod prompt;
pub mod relevance;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod types;

pub use client::{AssistantClient, AssistantClientBuilder};
pub use config::{AssistantSettings, PromptConfig};
pub use llm::{GeminiBackend, ModelBackend};
pub use session::{ChatMessage, ChatSession};
pub use store::{LocalFileStore, SessionStore};
pub use types::*;

pub use medicare_core::{AiError, DeviceClass, Role, Speaker};
