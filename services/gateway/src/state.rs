//! Gateway 共享状态：按配置装配存储、Authorizer 与 handler。

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::{
    auth::Authorizer,
    config::GatewayConfig,
    handlers::{DataHandler, JsonAccountReader, LoginHandler, UrlQueryParser},
    store::{MemoryCredentialStore, MemoryTokenStore, MemoryUserDirectory},
};

/// 路由共享状态。
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) login: Arc<LoginHandler>,
    pub(crate) data: Arc<DataHandler>,
}

impl AppState {
    /// 由已构造的 handler 组装。
    pub(crate) fn new(login: LoginHandler, data: DataHandler) -> Self {
        Self {
            login: Arc::new(login),
            data: Arc::new(data),
        }
    }

    /// 按配置加载存储并装配完整依赖。
    pub(crate) async fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let credentials = match config.credentials_path.as_deref() {
            Some(path) => MemoryCredentialStore::load_seed_file(path)
                .with_context(|| format!("load credentials: {}", path.display()))?,
            None => MemoryCredentialStore::default(),
        };
        let users = match config.users_path.as_deref() {
            Some(path) => MemoryUserDirectory::load_seed_file(path)
                .with_context(|| format!("load users: {}", path.display()))?,
            None => MemoryUserDirectory::default(),
        };
        let tokens = match config.token_store_path.as_deref() {
            Some(path) => MemoryTokenStore::open(path)
                .with_context(|| format!("open token store: {}", path.display()))?,
            None => MemoryTokenStore::new(),
        };
        info!(
            "stores ready: credentials={} users={} tokens={}",
            credentials.len().await,
            users.len().await,
            tokens.len().await
        );

        let authorizer = Arc::new(Authorizer::new(Arc::new(credentials), Arc::new(tokens)));
        Ok(Self::new(
            LoginHandler::new(authorizer.clone(), Arc::new(JsonAccountReader)),
            DataHandler::new(authorizer, Arc::new(UrlQueryParser), Arc::new(users)),
        ))
    }
}
