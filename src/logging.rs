//! 日志初始化
//!
//! TUI 占用终端，日志只写入 {data_dir}/logs/ 下按天滚动的文件。

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// 持有后台写线程，drop 时刷新剩余日志
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// 初始化全局 tracing subscriber
///
/// `RUST_LOG` 优先，未设置时使用配置中的 `default_level`。
/// 日志目录无法创建或 subscriber 已存在时返回 `None`，程序照常运行。
pub fn init_logging(data_dir: &Path, default_level: &str) -> Option<LoggingGuard> {
    let log_dir = data_dir.join("logs");
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: cannot create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "taskpad.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return None;
    }

    tracing::info!("Logging initialized at {:?}", log_dir);

    Some(LoggingGuard { _guard: guard })
}
