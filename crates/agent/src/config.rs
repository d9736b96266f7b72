use anyhow::{Context, Result};
use medicare_core::{ensure_not_blank, ensure_range, ensure_that};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// --- Prompt 配置中心 ---
/// 编译时加载 crates/agent/prompts/ 下的 Markdown 文件
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// 移动端精简模板 (目标 150 词以内)
    pub mobile_prompt: String,
    /// 桌面端完整模板
    pub full_prompt: String,
    /// 快速问答模板，只有 `{question}` 一个占位符
    pub quick_answer_prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            mobile_prompt: include_str!("../prompts/mobile_prompt_template.md").trim().to_string(),
            full_prompt: include_str!("../prompts/full_prompt_template.md").trim().to_string(),
            quick_answer_prompt: include_str!("../prompts/quick_answer_prompt_template.md")
                .trim()
                .to_string(),
        }
    }
}

/// API Key 唯一的环境变量来源
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// 可选的配置文件名 (medicare.toml / medicare.json / medicare.yaml ...)
pub const SETTINGS_FILE: &str = "medicare";

/// --- 运行时配置 ---
/// 分层加载：内置默认值 -> 可选配置文件 -> GOOGLE_API_KEY 环境变量
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// 缺失不算加载错误，调用时才报 MissingApiKey
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// 单次 HTTP 尝试的超时
    pub http_timeout_ms: u64,
    /// 整个请求 (含所有重试) 的总时限
    pub request_timeout_ms: u64,
    pub retry: RetrySettings,
    pub generation: Option<GenerationSettings>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            http_timeout_ms: 30_000,
            request_timeout_ms: 60_000,
            retry: RetrySettings::default(),
            generation: Some(GenerationSettings::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// 总尝试次数 (含第一次)
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    /// 单次退避的上限
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 600,
            max_delay_ms: 5_000,
        }
    }
}

/// 对应请求体里的 `generationConfig`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        // 低温度让医疗回答更稳定
        Self {
            temperature: 0.1,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

impl AssistantSettings {
    /// 从工作目录加载配置 (会先读取 .env)
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(SETTINGS_FILE, std::env::var(API_KEY_ENV).ok())
    }

    /// 指定配置文件与 API Key 加载，文件不存在时使用默认值
    pub fn load_from(file: &str, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        let settings: AssistantSettings = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .set_override_option("api_key", api_key)
            .context("Failed to apply API key override")?
            .build()
            .context("Failed to read assistant settings")?
            .try_deserialize()
            .context("Failed to deserialize assistant settings")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_not_blank!(self.model, "model must not be blank");
        ensure_that!(
            url::Url::parse(&self.base_url).is_ok(),
            "base_url is not a valid URL: {}",
            self.base_url
        );
        ensure_range!(self.retry.max_attempts, 1, 10, "retry.max_attempts must be within 1..=10");
        ensure_that!(
            self.retry.base_delay_ms <= self.retry.max_delay_ms,
            "retry.base_delay_ms ({}) must not exceed retry.max_delay_ms ({})",
            self.retry.base_delay_ms,
            self.retry.max_delay_ms
        );
        ensure_that!(self.http_timeout_ms > 0, "http_timeout_ms must be positive");
        ensure_that!(self.request_timeout_ms > 0, "request_timeout_ms must be positive");
        if let Some(generation) = &self.generation {
            ensure_range!(generation.temperature, 0.0, 2.0, "generation.temperature must be within 0..=2");
            ensure_range!(generation.top_p, 0.0, 1.0, "generation.top_p must be within 0..=1");
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_policy() {
        let settings = AssistantSettings::load_from("definitely-not-a-settings-file", None).unwrap();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.model, "gemini-2.0-flash");
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.retry.base_delay_ms, 600);
        assert_eq!(settings.retry.max_delay_ms, 5_000);
        assert_eq!(settings.generation, Some(GenerationSettings::default()));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let settings = AssistantSettings::load_from("definitely-not-a-settings-file", Some("  ".into())).unwrap();
        assert!(settings.api_key.is_none());

        let settings = AssistantSettings::load_from("definitely-not-a-settings-file", Some("abc".into())).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medicare.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "model = \"gemini-2.5-pro\"").unwrap();
        writeln!(file, "[retry]").unwrap();
        writeln!(file, "max_attempts = 2").unwrap();

        let settings = AssistantSettings::load_from(path.to_str().unwrap(), None).unwrap();
        assert_eq!(settings.model, "gemini-2.5-pro");
        assert_eq!(settings.retry.max_attempts, 2);
        // 未覆盖的字段保留默认值
        assert_eq!(settings.retry.base_delay_ms, 600);
        assert_eq!(settings.request_timeout_ms, 60_000);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut settings = AssistantSettings::default();
        settings.retry.max_attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings = AssistantSettings::default();
        settings.base_url = "not a url".into();
        assert!(settings.validate().is_err());

        let mut settings = AssistantSettings::default();
        settings.retry.base_delay_ms = 10_000;
        assert!(settings.validate().is_err());
    }
}
