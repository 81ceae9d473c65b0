use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;
use crate::errors::CacheError;

/// 初始化日志系统
///
/// 配置了 `file` 时额外写入文件，返回的 guard 必须持有到进程退出。
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, CacheError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let stdout_layer = match config.format.as_str() {
        "json" => fmt::layer().json().boxed(),
        // pretty format (default)
        _ => fmt::layer().pretty().boxed(),
    };

    let (file_layer, guard) = match &config.file {
        Some(file) => {
            let appender = file_appender(file, config)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CacheError::Config(format!("Failed to install logger: {}", e)))?;

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

fn file_appender(file: &str, config: &LogConfig) -> Result<RollingFileAppender, CacheError> {
    let path = Path::new(file);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("ferrusgate-cache.log");

    let mut builder = RollingFileAppender::builder().filename_prefix(prefix);
    builder = if config.enable_rotation {
        builder
            .rotation(Rotation::DAILY)
            .max_log_files(config.max_backups.max(1) as usize)
    } else {
        builder.rotation(Rotation::NEVER)
    };

    builder
        .build(directory)
        .map_err(|e| CacheError::Config(format!("Failed to open log file {}: {}", file, e)))
}
