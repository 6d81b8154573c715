//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口。
//! 会话与配置只通过 [`KeyValueStore`] 访问存储，测试时替换为内存实现。

/// 键值存储抽象
pub trait KeyValueStore {
    /// 获取存储的字符串值
    ///
    /// 键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    /// 设置存储值，返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除存储的键值对，返回操作是否成功
    fn delete(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 内存存储（测试用）
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>);

#[cfg(test)]
impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.lock().unwrap().contains_key(key)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.0
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.0.lock().unwrap().remove(key);
        true
    }
}
