use crate::{
    AdminDashboardStats, AdminProfile, ManagedUser, MessageResponse, PrescriptionLog,
    PrescriptionScan, ReportData, ReportPeriod, Role, SessionUser, UserDashboardStats, UserStatus,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the request carries a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Multipart uploads and file downloads do not fit a JSON request/response pair,
/// so they are handled by dedicated client methods instead.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request needs a bearer token.
    const AUTHENTICATED: bool = true;
    /// 请求体携带密码。此类端点返回 401 表示提交的密码不对，而不是令牌过期。
    const CHECKS_PASSWORD: bool = false;

    /// The URL path including any query string.
    fn path(&self) -> String;
}

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Returned by both login and register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: SessionUser,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    const CHECKS_PASSWORD: bool = true;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }
}

// =========================================================
// User area
// =========================================================

/// Dashboard statistics for the signed-in user
#[derive(Debug, Serialize)]
pub struct UserDashboardRequest;

impl ApiRequest for UserDashboardRequest {
    type Response = UserDashboardStats;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/dashboard/stats".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<PrescriptionScan>,
}

impl ApiRequest for HistoryRequest {
    type Response = HistoryResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/history".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPasswordRequest {
    pub user_id: String,
    pub current_password: String,
    pub new_password: String,
}

impl ApiRequest for UpdateUserPasswordRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const CHECKS_PASSWORD: bool = true;

    fn path(&self) -> String {
        "/api/user/update-password".to_string()
    }
}

// =========================================================
// Admin area
// =========================================================

#[derive(Debug, Serialize)]
pub struct AdminDashboardRequest;

impl ApiRequest for AdminDashboardRequest {
    type Response = AdminDashboardStats;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/admin/dashboard/stats".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct AdminLogsRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<PrescriptionLog>,
}

impl ApiRequest for AdminLogsRequest {
    type Response = LogsResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/admin/logs".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct GetAdminProfileRequest;

impl ApiRequest for GetAdminProfileRequest {
    type Response = AdminProfile;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/admin/profile".to_string()
    }
}

/// The backend echoes the stored profile.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAdminProfileRequest(pub AdminProfile);

impl ApiRequest for UpdateAdminProfileRequest {
    type Response = AdminProfile;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/api/admin/profile".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeAdminPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ApiRequest for ChangeAdminPasswordRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;
    const CHECKS_PASSWORD: bool = true;

    fn path(&self) -> String {
        "/api/admin/profile/password".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportsRequest {
    #[serde(skip)]
    pub period: ReportPeriod,
}

impl ApiRequest for ReportsRequest {
    type Response = ReportData;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/admin/reports?period={}", self.period.as_str())
    }
}

/// Body of `POST /api/admin/reports/export`; the response is a file.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReportRequest {
    pub period: ReportPeriod,
}

impl ExportReportRequest {
    pub const PATH: &'static str = "/api/admin/reports/export";

    pub fn fallback_filename(&self) -> String {
        format!("report-{}.pdf", self.period.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct ListUsersRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<ManagedUser>,
}

impl ApiRequest for ListUsersRequest {
    type Response = UsersResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/users".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserStatusRequest {
    #[serde(skip)]
    pub user_id: String,
    pub status: UserStatus,
}

impl ApiRequest for UpdateUserStatusRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/users/{}/status", urlencoding::encode(&self.user_id))
    }
}

/// `POST /api/predict` path; the body is multipart.
pub const PREDICT_PATH: &str = "/api/predict";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_with_parameters() {
        let req = ReportsRequest {
            period: ReportPeriod::Week,
        };
        assert_eq!(req.path(), "/api/admin/reports?period=week");

        let req = UpdateUserStatusRequest {
            user_id: "65f0 a".to_string(),
            status: UserStatus::Inactive,
        };
        assert_eq!(req.path(), "/api/users/65f0%20a/status");
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"status":"inactive"}"#);
    }

    #[test]
    fn test_password_checking_endpoints() {
        assert!(LoginRequest::CHECKS_PASSWORD);
        assert!(UpdateUserPasswordRequest::CHECKS_PASSWORD);
        assert!(ChangeAdminPasswordRequest::CHECKS_PASSWORD);
        assert!(!RegisterRequest::CHECKS_PASSWORD);
        assert!(!HistoryRequest::CHECKS_PASSWORD);
        assert!(!AdminLogsRequest::CHECKS_PASSWORD);
    }

    #[test]
    fn test_user_password_body_is_camel_case() {
        let req = UpdateUserPasswordRequest {
            user_id: "u1".to_string(),
            current_password: "old".to_string(),
            new_password: "new-secret".to_string(),
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["userId"], "u1");
        assert_eq!(body["currentPassword"], "old");
        assert_eq!(body["newPassword"], "new-secret");
    }

    #[test]
    fn test_auth_response_parses_backend_shape() {
        let json = r#"{
            "message": "Login successful",
            "token": "jwt",
            "user": {"id": "1", "name": "Ana", "email": "ana@x.org", "role": "admin"}
        }"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.user.role, Role::Admin);
        assert_eq!(resp.token, "jwt");
    }

    #[test]
    fn test_only_write_methods_have_bodies() {
        assert!(!HttpMethod::Get.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(LoginRequest::METHOD.has_body());
        assert!(!HistoryRequest::METHOD.has_body());
    }
}
