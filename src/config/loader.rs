use std::env;
use std::fs;
use std::path::Path;

use super::AppConfig;
use crate::errors::CacheError;

impl AppConfig {
    /// 从文件加载配置,支持环境变量覆盖
    ///
    /// # 参数
    /// * `config_path` - 可选的配置文件路径
    ///   - `Some(path)`: 使用指定文件（不存在则创建）
    ///   - `None`: 使用默认 "config.toml"（不存在则警告）
    pub fn load(config_path: Option<&str>) -> Self {
        let mut config = Self::load_from_file(config_path);
        config.override_with_env();
        config
    }

    /// 解析 TOML 字符串
    pub fn from_toml(content: &str) -> Result<Self, CacheError> {
        toml::from_str(content)
            .map_err(|e| CacheError::Config(format!("Failed to parse config: {}", e)))
    }

    /// 从 TOML 文件加载配置
    ///
    /// 日志系统此时尚未初始化，因此直接输出到 stderr。
    fn load_from_file(config_path: Option<&str>) -> Self {
        let path = config_path.unwrap_or("config.toml");
        let is_custom_path = config_path.is_some();

        if !Path::new(path).exists() {
            if is_custom_path {
                eprintln!("[WARN] 配置文件不存在: {}", path);
                eprintln!("[WARN] 正在创建默认配置文件...");
                if let Err(e) = Self::default().save_to_file(path) {
                    eprintln!("[ERROR] 创建配置文件失败 {}: {}", path, e);
                    eprintln!("[WARN] 使用内存默认配置");
                    return Self::default();
                }
                eprintln!("[INFO] 配置文件已创建: {}", path);
            } else {
                eprintln!("[WARN] 未找到配置文件: {}", path);
                eprintln!("[WARN] 使用内存默认配置");
                eprintln!("[HINT] 使用 -c/--config 指定自定义配置文件");
                return Self::default();
            }
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    eprintln!("[INFO] 配置已从文件加载: {}", path);
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] 解析配置文件失败 {}: {}", path, e);
                    eprintln!("[WARN] 使用内存默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] 读取配置文件失败 {}: {}", path, e);
                eprintln!("[WARN] 使用内存默认配置");
                Self::default()
            }
        }
    }

    /// 用环境变量覆盖配置
    fn override_with_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Redis 配置
        if let Some(host) = lookup("REDIS_HOST") {
            self.redis.host = host;
        }
        if let Some(port) = lookup("REDIS_PORT") {
            if let Ok(port) = port.parse() {
                self.redis.port = port;
            } else {
                eprintln!("[ERROR] 无效的 REDIS_PORT: {}", port);
            }
        }

        // 日志配置
        if let Some(level) = lookup("RUST_LOG") {
            self.log.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.log.format = format;
        }
        if let Some(file) = lookup("LOG_FILE") {
            self.log.file = Some(file);
        }
        if let Some(enable) = lookup("LOG_ENABLE_ROTATION") {
            self.log.enable_rotation = enable == "true" || enable == "1";
        }
        if let Some(backups) = lookup("LOG_MAX_BACKUPS") {
            if let Ok(n) = backups.parse() {
                self.log.max_backups = n;
            } else {
                eprintln!("[ERROR] 无效的 LOG_MAX_BACKUPS: {}", backups);
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&AppConfig::default())
            .unwrap_or_else(|e| format!("生成配置示例出错: {}", e))
    }

    /// 保存当前配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CacheError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CacheError::Config(format!("Failed to serialize config: {}", e)))?;

        // 如果需要,创建父目录
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| CacheError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| CacheError::Config(format!("Failed to write config file: {}", e)))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), CacheError> {
        if self.redis.host.trim().is_empty() {
            return Err(CacheError::Config("redis.host must not be empty".into()));
        }

        if self.redis.port == 0 {
            return Err(CacheError::Config("redis.port must be positive".into()));
        }

        Ok(())
    }
}
