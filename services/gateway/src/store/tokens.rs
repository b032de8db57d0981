//! 会话 token 存储：内存表，可选整表落盘。
//!
//! token id 是 bearer 凭据，内存与文件均以其 sha256 摘要为键，记录本身不含 id。

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sg_protocol::SessionToken;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    StoreError, TokenStore,
    digest::sha256_hex,
    file::{load_json, persist_json},
};

/// 已存储的 token（不含 token id）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredToken {
    user_name: String,
    access_rights: Vec<i32>,
    valid: bool,
    expiration_time: DateTime<Utc>,
}

impl StoredToken {
    fn from_token(token: &SessionToken) -> Self {
        Self {
            user_name: token.user_name.clone(),
            access_rights: token.access_rights.clone(),
            valid: token.valid,
            expiration_time: token.expiration_time,
        }
    }

    fn into_token(self, token_id: &str) -> SessionToken {
        SessionToken {
            token_id: token_id.to_string(),
            user_name: self.user_name,
            access_rights: self.access_rights,
            valid: self.valid,
            expiration_time: self.expiration_time,
        }
    }
}

/// 内存 token 存储。
///
/// 没有过期清理，表只增不减；落盘模式下每次签发都在写锁内整表重写文件，
/// 成本随 token 数线性增长，期间的校验读也会被阻塞。
#[derive(Debug, Default)]
pub(crate) struct MemoryTokenStore {
    /// 键为 token id 的 sha256 hex。
    tokens: RwLock<BTreeMap<String, StoredToken>>,
    /// 落盘路径；为空时仅驻留内存。
    path: Option<PathBuf>,
}

impl MemoryTokenStore {
    /// 仅内存。
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 从文件恢复；文件不存在视为空表，后续写入会创建文件。
    pub(crate) fn open(path: &Path) -> Result<Self, StoreError> {
        let tokens: BTreeMap<String, StoredToken> = load_json(path)?.unwrap_or_default();
        debug!("token store loaded {} entries from {}", tokens.len(), path.display());
        Ok(Self {
            tokens: RwLock::new(tokens),
            path: Some(path.to_path_buf()),
        })
    }

    pub(crate) async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn store_token(&self, token: &SessionToken) -> Result<(), StoreError> {
        let key = sha256_hex(&token.token_id);
        let mut guard = self.tokens.write().await;
        let previous = guard.insert(key.clone(), StoredToken::from_token(token));
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Err(err) = persist_json(path, &*guard) {
            // 落盘失败时回滚，保持内存与文件一致。
            match previous {
                Some(old) => guard.insert(key, old),
                None => guard.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }

    async fn get_token(&self, token_id: &str) -> Result<Option<SessionToken>, StoreError> {
        let key = sha256_hex(token_id);
        Ok(self
            .tokens
            .read()
            .await
            .get(&key)
            .cloned()
            .map(|stored| stored.into_token(token_id)))
    }
}
