use crate::config::{AssistantSettings, GenerationSettings};
use crate::llm::{ModelBackend, RetryPolicy};
use async_trait::async_trait;
use medicare_core::AiError;
use serde::{Deserialize, Serialize};

// ==========================================
// 1. 请求 / 响应结构
// ==========================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<GenerationSettings> for GenerationConfig {
    fn from(g: GenerationSettings) -> Self {
        Self {
            temperature: g.temperature,
            top_k: g.top_k,
            top_p: g.top_p,
            max_output_tokens: g.max_output_tokens,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    // 被安全策略拦截时可能没有 candidates
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl GenerateResponse {
    /// 路径: candidates[0] -> content -> parts[0] -> text
    fn first_text(&self) -> Option<&str> {
        let candidate = self.candidates.first()?;
        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!("Gemini finish reason: {}", reason);
        }
        candidate
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// 错误体优先取 `error.message`，其次顶层 `message`，都没有时只保留状态码
fn error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.and_then(|e| e.message).or(b.message))
        .filter(|m| !m.trim().is_empty());

    match detail {
        Some(detail) => format!("Gemini API error ({status}): {detail}"),
        None => format!("Gemini API error ({status})"),
    }
}

/// reqwest 的错误信息里带有完整 URL (含 `key=`)，必须先剥掉
fn transport_error(e: reqwest::Error) -> AiError {
    AiError::Network(e.without_url().to_string())
}

// ==========================================
// 2. 实现 Gemini Backend
// ==========================================

pub struct GeminiBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    generation: Option<GenerationSettings>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("endpoint", &self.endpoint)
            .field("has_api_key", &self.api_key.is_some())
            .field("retry", &self.retry)
            .finish()
    }
}

impl GeminiBackend {
    /// 根据运行时配置创建 Gemini 实例
    ///
    /// 没有 API Key 也能创建成功，首次调用时才返回 `AiError::MissingApiKey`。
    pub fn new(settings: &AssistantSettings) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(settings.http_timeout())
            .build()
            .map_err(|e| AiError::Config(format!("Failed to build HTTP client: {}", e.without_url())))?;

        Ok(Self::with_client(settings, client))
    }

    /// 使用外部构建好的 HTTP Client (例如共享连接池，或测试时关闭代理)
    pub fn with_client(settings: &AssistantSettings, client: reqwest::Client) -> Self {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );

        Self {
            client,
            endpoint,
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            generation: settings.generation,
            retry: RetryPolicy::from(settings.retry),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    async fn attempt(&self, api_key: &str, body: &GenerateRequest<'_>, attempt: u32) -> Result<String, AiError> {
        tracing::debug!("Gemini request attempt {}/{}", attempt, self.retry.max_attempts);

        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = res.status();
        let text = res.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(AiError::from_status(status.as_u16(), error_message(status.as_u16(), &text)));
        }

        let data: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| AiError::Decode(e.to_string()))?;

        data.first_text()
            .map(str::to_string)
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.generation.map(GenerationConfig::from),
        };

        self.retry
            .run("gemini", |attempt| self.attempt(api_key, &body, attempt))
            .await
    }
}

// ==========================================
// 3. 单元测试
// ==========================================
