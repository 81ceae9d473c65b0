use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::RedisOptions;

/// 目标地址类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// `localhost` 或合法的 IPv4/IPv6 地址
    Network,
    /// 其余一律视为本地 socket 路径
    LocalSocket,
}

/// 判断 host 是网络地址还是本地 socket 路径
///
/// 只有字面量 `localhost` 和合法 IP 才算网络地址，主机名同样按 socket 路径处理。
pub fn classify(host: &str) -> AddressKind {
    if host == "localhost" || host.parse::<IpAddr>().is_ok() {
        AddressKind::Network
    } else {
        AddressKind::LocalSocket
    }
}

/// 解析后的连接目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    Network { host: String, port: u16 },
    LocalSocket { path: PathBuf },
}

impl ConnectionTarget {
    /// 根据配置解析连接目标，本地 socket 忽略端口
    pub fn resolve(options: &RedisOptions) -> Self {
        match classify(&options.host) {
            AddressKind::Network => ConnectionTarget::Network {
                host: options.host.clone(),
                port: options.port,
            },
            AddressKind::LocalSocket => ConnectionTarget::LocalSocket {
                path: PathBuf::from(&options.host),
            },
        }
    }

    pub fn kind(&self) -> AddressKind {
        match self {
            ConnectionTarget::Network { .. } => AddressKind::Network,
            ConnectionTarget::LocalSocket { .. } => AddressKind::LocalSocket,
        }
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::Network { host, port } if host.contains(':') => {
                write!(f, "tcp://[{}]:{}", host, port)
            }
            ConnectionTarget::Network { host, port } => write!(f, "tcp://{}:{}", host, port),
            ConnectionTarget::LocalSocket { path } => write!(f, "unix://{}", path.display()),
        }
    }
}
