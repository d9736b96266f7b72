use super::SessionStore;
use crate::session::ChatSession;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// 以 `<id>.json` 的形式把会话写到本地目录
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root_dir: PathBuf,
}

impl LocalFileStore {
    /// 初始化存储，如果目录不存在则创建
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let root_dir = path.into();
        // 只在启动时执行一次，同步创建可以接受
        std::fs::create_dir_all(&root_dir)
            .with_context(|| format!("Failed to create session store directory {}", root_dir.display()))?;
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.root_dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl SessionStore for LocalFileStore {
    async fn save(&self, session: &ChatSession) -> Result<()> {
        let file_path = self.path_for(&session.id);

        // Pretty Print 方便人工排查
        let content = serde_json::to_string_pretty(session)?;

        fs::write(&file_path, content)
            .await
            .with_context(|| format!("Failed to write session {}", session.id))?;
        tracing::debug!(session = %session.id, "Session saved");
        Ok(())
    }

    async fn load(&self, id: &Uuid) -> Result<Option<ChatSession>> {
        let file_path = self.path_for(id);

        if !fs::try_exists(&file_path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&file_path)
            .await
            .with_context(|| format!("Failed to read session {id}"))?;
        let session: ChatSession =
            serde_json::from_str(&content).with_context(|| format!("Session file {id}.json is corrupt"))?;

        Ok(Some(session))
    }
}
