use async_trait::async_trait;
use medicare_core::AiError;

pub mod gemini;
pub mod retry;

pub use gemini::GeminiBackend;
pub use retry::RetryPolicy;

/// 模型后端抽象接口 (ModelBackend)
///
/// 该 Trait 定义了与大语言模型 (LLM) 进行交互的通用行为。
///
/// # 线程安全
/// 该 Trait 继承了 `Send + Sync`，实现者可以通过 `Arc<dyn ModelBackend>` 在多个并发请求间共享。
/// 实现者不得在两次调用之间保留可变状态，每次调用都是独立的工作单元。
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// 发送一段已经组装好的 Prompt，等待完整的文本回复
    ///
    /// # 返回值 (Returns)
    ///
    /// * `Ok(String)` - 模型生成的非空文本。
    /// * `Err(AiError)` - 已分类的错误：配置错误、瞬时错误 (已重试耗尽)、不可重试的远端错误等。
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}
