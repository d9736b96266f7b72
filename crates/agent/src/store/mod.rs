pub mod local;

pub use local::LocalFileStore;

use crate::session::ChatSession;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// 会话存储接口
///
/// 该接口定义了如何持久化调用方持有的 `ChatSession`。
/// 线上由托管数据库实现，`LocalFileStore` 用于开发与测试。
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 保存/覆盖会话
    async fn save(&self, session: &ChatSession) -> Result<()>;

    /// 读取会话
    ///
    /// # 返回
    /// * `Ok(Some(session))` - 找到记录
    /// * `Ok(None)` - 未找到记录 (不是错误)
    /// * `Err(e)` - 读取过程出错 (如文件权限、内容损坏)
    async fn load(&self, id: &Uuid) -> Result<Option<ChatSession>>;
}
