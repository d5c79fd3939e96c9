// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 本地文件存储
///
/// 截图JPEG写入配置的本地目录，文件名由调用方给定
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// 创建新的本地存储实例
    ///
    /// # 参数
    ///
    /// * `base_path` - 存储根目录
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 保存文件
    ///
    /// # 参数
    ///
    /// * `key` - 相对文件名
    /// * `data` - 文件内容
    ///
    /// # 返回值
    ///
    /// * `Ok(PathBuf)` - 写入的完整路径
    /// * `Err(StorageError)` - IO失败
    pub async fn save(&self, key: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.base_path.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, data).await?;
        Ok(path)
    }

    /// 存储根目录
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let path = storage.save("tools/runway.jpg", b"jpegdata").await.unwrap();
        assert!(path.exists());
        assert_eq!(fs::read(&path).await.unwrap(), b"jpegdata");
    }
}
