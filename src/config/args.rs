//! 命令行参数解析
//!
//! 探测程序只接受一个参数：配置文件路径。

/// 从命令行参数解析配置文件路径
///
/// 支持 `-c path`、`--config path`、`-c=path`、`--config=path`，
/// 索引 0 的程序名会被跳过。
pub fn parse_config_path(args: &[String]) -> Option<String> {
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        if arg == "-c" || arg == "--config" {
            return rest.next().cloned();
        }

        if let Some(path) = arg
            .strip_prefix("-c=")
            .or_else(|| arg.strip_prefix("--config="))
        {
            return Some(path.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_config_path_flags() {
        for args in [
            argv(&["probe", "-c", "cache.toml"]),
            argv(&["probe", "--config", "cache.toml"]),
            argv(&["probe", "-c=cache.toml"]),
            argv(&["probe", "--config=cache.toml"]),
        ] {
            assert_eq!(parse_config_path(&args), Some("cache.toml".to_string()));
        }
    }

    #[test]
    fn test_parse_config_path_missing_value() {
        assert_eq!(parse_config_path(&argv(&["probe", "-c"])), None);
    }

    #[test]
    fn test_parse_config_path_none() {
        assert_eq!(parse_config_path(&argv(&["probe", "--verbose"])), None);
        assert_eq!(parse_config_path(&argv(&["-c"])), None);
    }
}
