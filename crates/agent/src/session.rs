use crate::client::AssistantClient;
use crate::types::{AiResult, PromptRequest};
use chrono::{DateTime, Utc};
use medicare_core::{DeviceClass, Role, Speaker};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 对话中的一条消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// 兜底回答或失败提示，UI 需要明显区分
    #[serde(default)]
    pub offline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatMessage {
    fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            content: content.into(),
            timestamp: Utc::now(),
            offline: false,
            error: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, content)
    }

    /// 把一次请求结果转成助手消息：成功、降级、失败三种情况都有可显示的内容
    pub fn from_result(result: AiResult) -> Self {
        if !result.success {
            let reason = result.error.unwrap_or_else(|| "unknown error".to_string());
            let mut message = Self::assistant(format!("Unable to reach the AI service: {reason}"));
            message.offline = true;
            message.error = Some(reason);
            return message;
        }

        let offline = result.is_degraded();
        let mut message = Self::assistant(result.text);
        message.offline = offline;
        message.error = result.error;
        message
    }
}

/// 会话状态 (ChatSession)
///
/// 由调用方持有，核心库在两次调用之间不保存任何状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub role: Role,
    pub device_class: DeviceClass,
    /// 从文档中提取的文本，每次提问都会带上
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(role: Role, device_class: DeviceClass) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            device_class,
            context: String::new(),
            documents: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// 文档处理完成后开启会话，并写入欢迎消息
    pub fn with_documents(
        role: Role,
        device_class: DeviceClass,
        documents: Vec<String>,
        context: impl Into<String>,
    ) -> Self {
        let mut session = Self::new(role, device_class);
        session.context = context.into();
        session.documents = documents;
        session
            .messages
            .push(ChatMessage::assistant(welcome_message(&session.documents)));
        session
    }

    pub fn is_group(&self) -> bool {
        self.documents.len() > 1
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// 提问并追加一问一答两条消息；空白问题被忽略
    pub async fn ask(&mut self, client: &AssistantClient, question: &str) -> Option<&ChatMessage> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(question));

        let request = PromptRequest::new(question, self.context.as_str(), self.role, self.device_class);
        let result = client.get_response(&request).await;
        if !result.success {
            tracing::warn!(session = %self.id, "Assistant reply failed");
        }

        self.messages.push(ChatMessage::from_result(result));
        self.messages.last()
    }
}

fn welcome_message(documents: &[String]) -> String {
    match documents {
        [] => "🏥 **Welcome to MediCare-ICU Assistant!**\n\n\
               I'm ready to answer your medical questions. What would you like to know?"
            .to_string(),
        [single] => format!(
            "🏥 **Welcome to MediCare-ICU Assistant!**\n\n\
             I've successfully analyzed your medical document: **{single}**\n\n\
             I'm ready to answer questions about the medical content. What specific information would you like to know?\n\n\
             *Available analysis: Medical terminology, diagnostic insights, treatment recommendations, and clinical interpretations.*"
        ),
        _ => {
            let listing = documents
                .iter()
                .enumerate()
                .map(|(i, name)| format!("{}. {}", i + 1, name))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "🏥 **Welcome to MediCare-ICU Assistant!**\n\n\
                 I've successfully analyzed **{} medical documents**:\n{listing}\n\n\
                 I'm ready to provide comprehensive medical insights across all your documents. What would you like to know?\n\n\
                 *Available analysis: Drug interactions, diagnostic insights, treatment recommendations, and clinical correlations.*",
                documents.len()
            )
        }
    }
}
