//! 应用配置
//!
//! API 地址优先级：LocalStorage 覆盖值 > 构建时 `RXLENS_API_BASE` > 默认值。
//! 无效的覆盖值会被记录并忽略。

use std::time::Duration;

use leptos::prelude::*;
use rxlens_shared::listing::DEFAULT_PAGE_SIZE;

use crate::error::ConfigError;
use crate::web::KeyValueStore;

/// 运行时覆盖 API 地址的存储键
pub const STORAGE_API_BASE_KEY: &str = "rxlens_api_base";
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 不含末尾斜杠
    pub api_base_url: String,
    /// 通知自动消失的时间
    pub toast_duration: Duration,
    pub default_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            toast_duration: DEFAULT_TOAST_DURATION,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// 从存储与构建环境加载
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self::resolve(
            store.get(STORAGE_API_BASE_KEY).as_deref(),
            option_env!("RXLENS_API_BASE"),
        )
    }

    fn resolve(runtime: Option<&str>, build_time: Option<&str>) -> Self {
        let candidates = [("storage", runtime), ("build", build_time)];
        let api_base_url = candidates
            .into_iter()
            .filter_map(|(source, value)| value.map(|v| (source, v)))
            .find_map(|(source, value)| match normalize_base_url(value) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("[Config] Ignoring {} API base: {}", source, e);
                    None
                }
            })
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        log::debug!("[Config] API base: {}", api_base_url);
        Self {
            api_base_url,
            ..Self::default()
        }
    }
}

/// 校验并规范化 API 地址
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyUrl);
    }
    let lower = trimmed.to_ascii_lowercase();
    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len());
    if !has_host {
        return Err(ConfigError::UnsupportedScheme(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// 从 Context 获取配置
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStore;

    #[test]
    fn test_runtime_override_wins() {
        let config = AppConfig::resolve(Some("https://api.example.org/"), Some("http://build:1"));
        assert_eq!(config.api_base_url, "https://api.example.org");
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let config = AppConfig::resolve(Some("ftp://nope"), Some("http://build:8080"));
        assert_eq!(config.api_base_url, "http://build:8080");

        let config = AppConfig::resolve(Some("   "), None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.toast_duration, Duration::from_secs(3));
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn test_load_reads_storage_key() {
        let store = MemoryStore::with(&[(STORAGE_API_BASE_KEY, "https://rx.example.org")]);
        assert_eq!(AppConfig::load(&store).api_base_url, "https://rx.example.org");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://localhost:5000//"), Ok("http://localhost:5000".to_string()));
        assert_eq!(normalize_base_url(""), Err(ConfigError::EmptyUrl));
        assert!(matches!(normalize_base_url("http://"), Err(ConfigError::UnsupportedScheme(_))));
        assert!(normalize_base_url("localhost:5000").is_err());
    }
}
