use colored::Colorize;
use ferrusgate_cache::config::args;
use ferrusgate_cache::system::init_logging;
use ferrusgate_cache::{AppConfig, Cache, CacheError, RedisCache};
use std::env;
use std::process::ExitCode;

const PROBE_KEY: &str = "ferrusgate-cache:probe";
const PROBE_TTL: u64 = 30;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CacheError> {
    // 解析命令行参数获取配置文件路径
    let cli_args: Vec<String> = env::args().collect();
    let config_path = args::parse_config_path(&cli_args);

    let config = AppConfig::load(config_path.as_deref());
    let _log_guard = init_logging(&config.log)?;
    config.validate()?;

    tracing::info!(
        "Probing cache server {}:{}",
        config.redis.host,
        config.redis.port
    );

    let cache = RedisCache::new(config.redis.clone())?;
    cache.connect().await?;

    let payload = format!("probe-{}", std::process::id());
    report("SET", cache.set(PROBE_KEY, payload.as_bytes(), Some(PROBE_TTL)).await?);

    let item = cache.get(PROBE_KEY).await?;
    report("GET", item.value() == Some(payload.as_bytes()));
    report("EXISTS", cache.exists(PROBE_KEY).await?);
    report("DEL", cache.remove(PROBE_KEY).await?);

    tracing::info!("Cache probe finished");
    Ok(())
}

fn report(command: &str, ok: bool) {
    if ok {
        println!("{} {}", "[OK]".green().bold(), command);
    } else {
        println!("{} {}", "[FAILED]".red().bold(), command);
        tracing::warn!("Cache probe step {} failed", command);
    }
}
