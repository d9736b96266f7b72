use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// 日志文件前缀，按天滚动 (medicare.log.2025-xx-xx)
pub const LOG_FILE_PREFIX: &str = "medicare.log";

/// 初始化全局日志：控制台 + 按天滚动的文件
///
/// 默认级别 INFO，可用 `RUST_LOG` 覆盖。
/// 调用方必须持有返回的 guard，否则后台写日志线程会立即退出。
/// 重复初始化返回错误而不是 panic。
pub fn init_logging(dir: impl AsRef<Path>) -> Result<WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    // 1. 文件输出器
    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 2. 控制台层
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .compact();

    // 3. 文件层
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Global tracing subscriber already installed")?;

    Ok(guard)
}
