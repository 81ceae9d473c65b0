use thiserror::Error;

/// 缓存驱动错误
///
/// 远端命令失败不会出现在这里，而是以 `false` 或未命中返回给调用方。
#[derive(Debug, Error)]
pub enum CacheError {
    // 构造阶段：客户端能力不可用
    #[error("Unsupported backend: {0}")]
    UnsupportedBackend(String),

    // 首次连接失败
    #[error("Connection error: {0}")]
    Connection(String),

    // Redis 命令错误
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Invalid cache key: key must not be empty")]
    InvalidKey,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CacheError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::UnsupportedBackend(_) => "E101",
            CacheError::Connection(_) => "E102",
            CacheError::Redis(_) => "E103",
            CacheError::InvalidKey => "E104",
            CacheError::Config(_) => "E105",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CacheError::UnsupportedBackend(_) => "Unsupported Backend",
            CacheError::Connection(_) => "Connection Error",
            CacheError::Redis(_) => "Redis Error",
            CacheError::InvalidKey => "Invalid Key",
            CacheError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple() {
        let err = CacheError::Connection("refused".into());
        assert_eq!(
            err.format_simple(),
            "[E102] Connection Error: Connection error: refused"
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            CacheError::UnsupportedBackend(String::new()),
            CacheError::Connection(String::new()),
            CacheError::InvalidKey,
            CacheError::Config(String::new()),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
