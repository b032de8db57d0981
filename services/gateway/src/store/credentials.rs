//! 内存凭证存储：密码仅保存 sha256 摘要，不存明文。

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use serde::Deserialize;
use sg_protocol::Credential;
use tokio::sync::RwLock;

use super::{CredentialStore, StoreError, digest::sha256_hex, file::load_json};

/// 凭证种子文件中的单条记录（明文密码，加载时即转摘要）。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialSeed {
    pub(crate) username: String,
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) access_rights: Vec<i32>,
}

/// 已存储的凭证记录。
#[derive(Debug, Clone)]
struct CredentialRecord {
    password_hash: String,
    access_rights: Vec<i32>,
}

/// 基于内存表的凭证存储。
#[derive(Debug, Default)]
pub(crate) struct MemoryCredentialStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
}

impl MemoryCredentialStore {
    /// 从种子记录构造；同名用户以后者为准。
    pub(crate) fn from_seeds(seeds: impl IntoIterator<Item = CredentialSeed>) -> Self {
        let records = seeds
            .into_iter()
            .map(|seed| {
                (
                    seed.username,
                    CredentialRecord {
                        password_hash: sha256_hex(&seed.password),
                        access_rights: seed.access_rights,
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        Self {
            records: RwLock::new(records),
        }
    }

    /// 从 JSON 种子文件加载；文件不存在时得到空存储。
    pub(crate) fn load_seed_file(path: &Path) -> Result<Self, StoreError> {
        let seeds: Vec<CredentialSeed> = load_json(path)?.unwrap_or_default();
        Ok(Self::from_seeds(seeds))
    }

    pub(crate) async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Credential>, StoreError> {
        let guard = self.records.read().await;
        let Some(record) = guard.get(username) else {
            return Ok(None);
        };
        if record.password_hash != sha256_hex(password) {
            return Ok(None);
        }
        Ok(Some(Credential {
            username: username.to_string(),
            access_rights: record.access_rights.clone(),
        }))
    }
}
