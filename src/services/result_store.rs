//! 结果存储
//!
//! 单键覆盖写的键值存储，最后写入者胜出。
//! `ResultPresenter` 通过注入的 `ResultStore` 写入，测试中可替换为内存实现。

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;

/// 最近一次成功结果的存储键
pub const RESULT_STORAGE_KEY: &str = "chronologic_result";

/// 键值存储接口
pub trait ResultStore: Send + Sync {
    /// 读取键对应的值，不存在时返回 `None`
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// 整体覆盖写入
    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// 文件存储：每个键一个 JSON 文件
///
/// 先写临时文件再 rename，读者只会看到某一次完整写入的内容。
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    seq: AtomicU64,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl ResultStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .dir
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), seq));
        let content = serde_json::to_vec(value).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;

        if let Err(source) = fs::write(&tmp, content)
            .and_then(|_| fs::rename(&tmp, self.path_for(key)))
        {
            // 失败时不留下临时文件
            let _ = fs::remove_file(&tmp);
            return Err(io_err(source));
        }

        debug!("已写入存储: {}", self.path_for(key).display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        assert_eq!(store.get(RESULT_STORAGE_KEY).unwrap(), None);

        store.set(RESULT_STORAGE_KEY, &json!({"x": 1})).unwrap();
        store.set(RESULT_STORAGE_KEY, &json!({"x": 2})).unwrap();

        assert_eq!(store.get(RESULT_STORAGE_KEY).unwrap(), Some(json!({"x": 2})));
    }

    #[test]
    fn test_file_store_roundtrip_and_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("missing").unwrap(), None);

        store.set(RESULT_STORAGE_KEY, &json!([{"Робітник": 1}])).unwrap();
        assert_eq!(
            store.get(RESULT_STORAGE_KEY).unwrap(),
            Some(json!([{"Робітник": 1}]))
        );
    }

    #[test]
    fn test_file_store_corrupt_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();

        assert!(matches!(
            store.get("bad"),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_file_store_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        // 目标位置是非空目录，rename 会失败
        let target = dir.path().join(format!("{}.json", RESULT_STORAGE_KEY));
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = store.set(RESULT_STORAGE_KEY, &json!({"x": 1})).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_file_store_concurrent_writers_leave_one_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .set(RESULT_STORAGE_KEY, &json!({ "writer": i, "pad": "x".repeat(4096) }))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let value = store.get(RESULT_STORAGE_KEY).unwrap().unwrap();
        let writer = value["writer"].as_u64().unwrap();
        assert!(writer < 8);
        assert_eq!(value["pad"].as_str().unwrap().len(), 4096);
    }
}
