//! Gateway 配置：全部来自环境变量。

use std::path::PathBuf;

use serde::Serialize;

/// 默认监听地址。
const DEFAULT_ADDR: &str = "0.0.0.0:8080";
/// 关闭 token 落盘的取值。
const MEMORY_ONLY: &str = "memory";

/// 运行配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GatewayConfig {
    /// 监听地址（`SG_ADDR`）。
    pub(crate) addr: String,
    /// 凭证种子文件（`SG_CREDENTIALS_PATH`）。
    pub(crate) credentials_path: Option<PathBuf>,
    /// 用户种子文件（`SG_USERS_PATH`）。
    pub(crate) users_path: Option<PathBuf>,
    /// token 落盘文件（`SG_TOKEN_STORE_PATH`）；`None` 表示仅内存。
    pub(crate) token_store_path: Option<PathBuf>,
}

impl GatewayConfig {
    /// 读取进程环境。
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 按给定查找函数解析配置。
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token_store_path = match lookup("SG_TOKEN_STORE_PATH") {
            None => Some(default_token_store_path(lookup("HOME"))),
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed == MEMORY_ONLY {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                }
            }
        };

        Self {
            addr: non_blank("SG_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            credentials_path: non_blank("SG_CREDENTIALS_PATH").map(PathBuf::from),
            users_path: non_blank("SG_USERS_PATH").map(PathBuf::from),
            token_store_path,
        }
    }
}

/// 默认 token 文件：`$HOME/.config/sessiongate/tokens.json`。
fn default_token_store_path(home: Option<String>) -> PathBuf {
    let home = home.unwrap_or_else(|| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("sessiongate")
        .join("tokens.json")
}
