//! 错误类型
//!
//! - `HttpError`: 传输层错误（请求未得到任何 HTTP 响应）
//! - `ApiError`: API 客户端返回给视图的错误
//! - `ConfigError`: 配置项无效

use thiserror::Error;

/// HTTP 传输错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("failed to build request: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    NetworkError(String),
    /// 响应读取失败
    #[error("failed to read response: {0}")]
    ResponseReadFailed(String),
}

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 本地没有令牌，未发出请求
    #[error("You are not signed in")]
    MissingSession,
    /// 传输失败
    #[error("Unable to reach the server: {0}")]
    Network(String),
    /// 非 2xx 响应
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 密码校验端点拒绝了提交的密码，会话仍然有效
    #[error("{0}")]
    Rejected(String),
    /// 响应体不是预期的 JSON
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// 需要让会话失效的错误
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::MissingSession | ApiError::Status { status: 401 | 403, .. }
        )
    }

    /// 从非 2xx 响应体中提取错误消息
    ///
    /// 依次尝试 `error` 与 `message` 字段，都没有时给出通用消息。
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["error", "message"].iter().find_map(|key| {
                    value
                        .get(key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.trim().is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| format!("Request failed (status {})", status));
        ApiError::Status { status, message }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    EmptyUrl,
    #[error("API base URL must start with http:// or https://, got `{0}`")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures() {
        assert!(ApiError::MissingSession.is_auth_failure());
        assert!(ApiError::from_status(401, b"").is_auth_failure());
        assert!(ApiError::from_status(403, b"{}").is_auth_failure());
        assert!(!ApiError::from_status(500, b"").is_auth_failure());
        assert!(!ApiError::Network("offline".into()).is_auth_failure());
        assert!(!ApiError::Rejected("Current password is incorrect".into()).is_auth_failure());
    }

    #[test]
    fn test_status_message_from_body() {
        let err = ApiError::from_status(400, br#"{"error": "Invalid credentials"}"#);
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = ApiError::from_status(404, br#"{"message": "User not found"}"#);
        assert_eq!(err.to_string(), "User not found");

        let err = ApiError::from_status(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Request failed (status 502)");
    }
}
