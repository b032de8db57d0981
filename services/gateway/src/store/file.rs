//! JSON 文件读写。

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use super::StoreError;

/// 落盘文件权限：仅属主可读写。
#[cfg(unix)]
const PRIVATE_FILE_MODE: u32 = 0o600;

/// 读取 JSON 文件；文件不存在时返回 `None`。
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read(path)
        .map_err(|err| StoreError::Io(format!("read {} failed: {err}", path.display())))?;
    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|err| StoreError::Decode(format!("decode {} failed: {err}", path.display())))
}

/// 整体覆盖写入 JSON 文件（按需创建父目录，文件权限 0600）。
pub(crate) fn persist_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| StoreError::Io(format!("create {} failed: {err}", parent.display())))?;
    }
    let encoded = serde_json::to_vec_pretty(value)
        .map_err(|err| StoreError::Encode(format!("encode {} failed: {err}", path.display())))?;
    write_private(path, &encoded)
        .map_err(|err| StoreError::Io(format!("write {} failed: {err}", path.display())))
}

/// 以 0600 创建/截断并写入；已存在的文件同样收紧权限。
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(PRIVATE_FILE_MODE);
        let mut file = options.open(path)?;
        file.set_permissions(fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
        file.write_all(bytes)?;
        file.sync_all()
    }
    #[cfg(not(unix))]
    {
        let mut file = options.open(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }
}
