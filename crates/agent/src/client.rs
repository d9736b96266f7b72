use crate::config::{AssistantSettings, PromptConfig};
use crate::fallback::fallback_response;
use crate::llm::{GeminiBackend, ModelBackend};
use crate::prompt::{build_prompt, build_quick_prompt};
use crate::types::{AiResult, PromptRequest};
use medicare_core::{AiError, DeviceClass, Role};
use std::sync::Arc;
use std::time::Duration;

// --- Builder 实现 ---

/// `AssistantClient` 的构建器。
/// 允许替换模型后端、Prompt 模板以及整体时限。
pub struct AssistantClientBuilder {
    backend: Arc<dyn ModelBackend>,
    prompts: PromptConfig,
    request_timeout: Duration,
}

impl AssistantClientBuilder {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            prompts: PromptConfig::default(),
            request_timeout: AssistantSettings::default().request_timeout(),
        }
    }

    /// 替换默认的 Prompt 配置
    pub fn with_prompts(mut self, prompts: PromptConfig) -> Self {
        self.prompts = prompts;
        self
    }

    /// 整个请求 (含所有重试) 的总时限
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn build(self) -> AssistantClient {
        AssistantClient {
            backend: self.backend,
            prompts: self.prompts,
            request_timeout: self.request_timeout,
        }
    }
}

/// **Assistant Client**：调用方唯一需要面对的入口。
///
/// 核心职责：
/// 1. 按终端类型和角色组装 Prompt。
/// 2. 在总时限内调用模型后端 (后端自带退避重试)。
/// 3. 失败时生成本地兜底回答，保证用户总能看到内容。
///
/// 除缺少 API Key 等配置错误外，所有失败都降级为兜底回答。
/// 所有结果都以 `AiResult` 返回，不会 panic，也不会向外抛错。
#[derive(Clone)]
pub struct AssistantClient {
    backend: Arc<dyn ModelBackend>,
    prompts: PromptConfig,
    request_timeout: Duration,
}

impl AssistantClient {
    /// 快捷构造函数：默认 Prompt 与默认时限
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        AssistantClientBuilder::new(backend).build()
    }

    pub fn builder(backend: Arc<dyn ModelBackend>) -> AssistantClientBuilder {
        AssistantClientBuilder::new(backend)
    }

    /// 使用 Gemini 后端，按运行时配置组装
    pub fn from_settings(settings: &AssistantSettings) -> Result<Self, AiError> {
        let backend = GeminiBackend::new(settings)?;
        Ok(Self::builder(Arc::new(backend))
            .with_request_timeout(settings.request_timeout())
            .build())
    }

    /// 主入口：一次完整的问答
    pub async fn get_response(&self, request: &PromptRequest) -> AiResult {
        tracing::info!(
            role = %request.role,
            device = %request.device_class,
            context_chars = request.context.chars().count(),
            "AI request started"
        );

        let prompt = build_prompt(&self.prompts, request);
        let outcome = self.call_backend(&prompt).await;

        self.finish(outcome, || fallback_response(&request.question, &request.context, request.role))
    }

    /// 与原有调用顺序一致的便捷形式
    pub async fn ask(&self, question: &str, context: &str, role: impl Into<Role>, is_mobile: bool) -> AiResult {
        let request = PromptRequest::new(
            question,
            context,
            role.into(),
            DeviceClass::from_mobile_hint(is_mobile),
        );
        self.get_response(&request).await
    }

    /// 快速问答：只带问题，不带文档上下文
    pub async fn quick_answer(&self, question: &str) -> AiResult {
        tracing::info!("Quick answer request started");
        let prompt = build_quick_prompt(&self.prompts, question);
        let outcome = self.call_backend(&prompt).await;

        self.finish(outcome, || fallback_response(question, "", Role::Unknown))
    }

    /// 空白文本与其它失败一样走兜底流程
    async fn call_backend(&self, prompt: &str) -> Result<String, AiError> {
        match tokio::time::timeout(self.request_timeout, self.backend.generate(prompt)).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(AiError::EmptyResponse),
            Ok(result) => result,
            Err(_) => Err(AiError::Timeout(self.request_timeout.as_millis() as u64)),
        }
    }

    fn finish(&self, outcome: Result<String, AiError>, fallback: impl FnOnce() -> String) -> AiResult {
        match outcome {
            Ok(text) => {
                tracing::info!("AI request succeeded");
                AiResult::answered(text)
            }
            Err(e) if e.is_configuration() => {
                tracing::error!("AI request rejected: {}", e);
                AiResult::failed(e.to_string())
            }
            Err(e) => {
                tracing::warn!(status = ?e.status(), "AI request failed, using offline fallback: {}", e);
                AiResult::degraded(fallback(), e.to_string())
            }
        }
    }
}
