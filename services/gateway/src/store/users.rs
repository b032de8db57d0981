//! 内存用户目录。

use std::path::Path;

use async_trait::async_trait;
use sg_protocol::User;
use tokio::sync::RwLock;

use super::{StoreError, UserDirectory, file::load_json};

/// 按插入顺序保存用户记录。
#[derive(Debug, Default)]
pub(crate) struct MemoryUserDirectory {
    users: RwLock<Vec<User>>,
}

impl MemoryUserDirectory {
    pub(crate) fn from_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// 从 JSON 种子文件加载；文件不存在时得到空目录。
    pub(crate) fn load_seed_file(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::from_users(load_json(path)?.unwrap_or_default()))
    }

    pub(crate) async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    /// 名字包含查询串即命中（区分大小写）。
    async fn users_by_name(&self, name: &str) -> Result<Vec<User>, StoreError> {
        let guard = self.users.read().await;
        Ok(guard
            .iter()
            .filter(|user| user.name.contains(name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use sg_protocol::{User, WorkingPosition};

    use super::MemoryUserDirectory;
    use crate::store::UserDirectory;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            age: 30,
            email: format!("{id}@email.com"),
            working_position: WorkingPosition::Programmer,
        }
    }

    #[tokio::test]
    async fn lookup_matches_substring_in_insertion_order() {
        let directory = MemoryUserDirectory::from_users(vec![
            user("1", "someName1"),
            user("2", "other"),
            user("3", "someName2"),
        ]);

        let found = directory.users_by_name("someName").await.unwrap();
        let ids = found.iter().map(|u| u.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(directory.users_by_name("somename").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seed_file_loads_users() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("users.json");
        std::fs::write(
            &path,
            r#"[{"age":21,"email":"some@email.com","id":"someId1","name":"someName1","workingPosition":2}]"#,
        )
        .unwrap();

        let directory = MemoryUserDirectory::load_seed_file(&path).expect("seed should load");
        assert_eq!(directory.len().await, 1);
    }
}
