use thiserror::Error;

/// 缺失 API Key 时返回给调用方的固定提示
pub const MISSING_API_KEY_MESSAGE: &str =
    "Missing Google API key. Please configure GOOGLE_API_KEY in your environment.";

/// AI 请求链路的统一错误定义
/// 使用 `thiserror` 宏自动生成 Display 和 Error trait
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    // =================================================================
    // 1. 配置类 (Config) - 致命错误，不重试，也不降级
    // =================================================================
    #[error("Missing Google API key. Please configure GOOGLE_API_KEY in your environment.")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    // =================================================================
    // 2. 远端错误 (Remote)
    // =================================================================
    /// 429 / 5xx，可以重试；`message` 已包含状态码前缀
    #[error("{message}")]
    Transient { status: u16, message: String },

    /// 其余 4xx，重试无意义
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("No response content returned by the AI service")]
    EmptyResponse,

    // =================================================================
    // 3. 基础设施类 (Infrastructure)
    // 注意：Core 不直接依赖 reqwest，用 String 包装错误信息
    // =================================================================
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode AI response: {0}")]
    Decode(String),

    #[error("AI request timed out after {0} ms")]
    Timeout(u64),
}

impl AiError {
    /// 根据 HTTP 状态码归类：429 与 5xx 为瞬时错误，其余为不可重试错误
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 429 || (500..600).contains(&status) {
            AiError::Transient { status, message }
        } else {
            AiError::Remote { status, message }
        }
    }

    /// 是否值得重试
    pub fn is_transient(&self) -> bool {
        matches!(self, AiError::Transient { .. } | AiError::Network(_))
    }

    /// 配置错误直接暴露给调用方，不走降级回答
    pub fn is_configuration(&self) -> bool {
        matches!(self, AiError::MissingApiKey | AiError::Config(_))
    }

    /// 远端返回的 HTTP 状态码 (如果有)
    pub fn status(&self) -> Option<u16> {
        match self {
            AiError::Transient { status, .. } | AiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
