//! 存储层：凭证、会话 token 与用户查询。

mod credentials;
mod digest;
mod file;
mod tokens;
mod users;

use async_trait::async_trait;
use sg_protocol::{Credential, SessionToken, User};
use thiserror::Error;

#[cfg(test)]
pub(crate) use credentials::CredentialSeed;
pub(crate) use credentials::MemoryCredentialStore;
pub(crate) use tokens::MemoryTokenStore;
pub(crate) use users::MemoryUserDirectory;

/// 存储层故障；上层原样透传，不做翻译。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum StoreError {
    #[error("store io failed: {0}")]
    Io(String),
    #[error("store decode failed: {0}")]
    Decode(String),
    #[error("store encode failed: {0}")]
    Encode(String),
}

/// 凭证存储：按用户名查找，并负责校验密码。
#[async_trait]
pub(crate) trait CredentialStore: Send + Sync {
    /// 用户名与密码均匹配时返回凭证，否则返回 `None`。
    async fn get_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Credential>, StoreError>;
}

/// 会话 token 存储。
#[async_trait]
pub(crate) trait TokenStore: Send + Sync {
    async fn store_token(&self, token: &SessionToken) -> Result<(), StoreError>;

    async fn get_token(&self, token_id: &str) -> Result<Option<SessionToken>, StoreError>;
}

/// 用户查询。
#[async_trait]
pub(crate) trait UserDirectory: Send + Sync {
    async fn users_by_name(&self, name: &str) -> Result<Vec<User>, StoreError>;
}
