//! RxLens API 客户端
//!
//! 所有请求都经过 [`RxLensApi::call`]：附加令牌、发送、检查状态码、解码 JSON。
//! 需要令牌的请求在本地没有令牌时直接返回 `MissingSession`，不发出任何请求。

use leptos::prelude::*;
use rxlens_shared::protocol::*;
use rxlens_shared::{
    AdminDashboardStats, AdminProfile, HEADER_AUTHORIZATION, ManagedUser, MessageResponse,
    PredictionResult, PrescriptionLog, PrescriptionScan, ReportData, ReportPeriod, Role,
    UPLOAD_FIELD_NAME, UserDashboardStats, UserStatus, download::filename_from_disposition,
};
use serde::de::DeserializeOwned;

use crate::config::use_config;
use crate::error::ApiError;
use crate::session::{SessionContext, use_session};
use crate::web::{FetchTransport, HttpRequest, HttpResponse, HttpTransport, SelectedFile};

/// 下载得到的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct RxLensApi<T = FetchTransport> {
    base_url: String,
    token: Option<String>,
    transport: T,
}

impl<T: HttpTransport> RxLensApi<T> {
    pub fn new(base_url: &str, token: Option<String>, transport: T) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            transport,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 构建请求并附加认证头
    fn request(&self, method: HttpMethod, path: &str, authenticated: bool) -> Result<HttpRequest, ApiError> {
        let request = HttpRequest::new(method, self.url(path));
        if !authenticated {
            return Ok(request);
        }
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingSession)?;
        Ok(request.header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)))
    }

    /// 发送请求，非 2xx 转为 `ApiError::Status`
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("[Api] {} {} failed: {}", method.as_str(), url, e);
            ApiError::from(e)
        })?;

        if !response.ok() {
            let err = ApiError::from_status(response.status, &response.body);
            log::warn!("[Api] {} {} -> {}: {}", method.as_str(), url, response.status, err);
            return Err(err);
        }
        Ok(response)
    }

    fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
        serde_json::from_slice(&response.body).map_err(|e| {
            log::warn!("[Api] Could not decode response: {}", e);
            ApiError::from(e)
        })
    }

    /// 发送一个 JSON 请求
    pub async fn call<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let mut request = self.request(R::METHOD, &req.path(), R::AUTHENTICATED)?;
        if R::METHOD.has_body() {
            request = request.json(serde_json::to_string(req)?);
        }
        let response = self.send(request).await.map_err(|err| match err {
            ApiError::Status { status: 401, message } if R::CHECKS_PASSWORD => {
                ApiError::Rejected(message)
            }
            other => other,
        })?;
        Self::decode(&response)
    }

    // =========================================================
    // 认证
    // =========================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.call(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthResponse, ApiError> {
        self.call(&RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            role,
        })
        .await
    }

    // =========================================================
    // 用户
    // =========================================================

    pub async fn user_dashboard(&self) -> Result<UserDashboardStats, ApiError> {
        self.call(&UserDashboardRequest).await
    }

    pub async fn history(&self) -> Result<Vec<PrescriptionScan>, ApiError> {
        Ok(self.call(&HistoryRequest).await?.history)
    }

    /// 上传处方图片进行识别
    pub async fn predict(&self, file: SelectedFile) -> Result<PredictionResult, ApiError> {
        let request = self
            .request(HttpMethod::Post, PREDICT_PATH, true)?
            .multipart(UPLOAD_FIELD_NAME, file);
        let response = self.send(request).await?;
        Self::decode(&response)
    }

    pub async fn update_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        self.call(&UpdateUserPasswordRequest {
            user_id: user_id.to_string(),
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })
        .await
    }

    // =========================================================
    // 管理员
    // =========================================================

    pub async fn admin_dashboard(&self) -> Result<AdminDashboardStats, ApiError> {
        self.call(&AdminDashboardRequest).await
    }

    pub async fn logs(&self) -> Result<Vec<PrescriptionLog>, ApiError> {
        Ok(self.call(&AdminLogsRequest).await?.logs)
    }

    pub async fn admin_profile(&self) -> Result<AdminProfile, ApiError> {
        self.call(&GetAdminProfileRequest).await
    }

    pub async fn update_admin_profile(&self, profile: AdminProfile) -> Result<AdminProfile, ApiError> {
        self.call(&UpdateAdminProfileRequest(profile)).await
    }

    pub async fn change_admin_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        self.call(&ChangeAdminPasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })
        .await
    }

    pub async fn reports(&self, period: ReportPeriod) -> Result<ReportData, ApiError> {
        self.call(&ReportsRequest { period }).await
    }

    /// 导出报表文件
    ///
    /// 文件名取自 `Content-Disposition`，缺失时为 `report-{period}.pdf`。
    pub async fn export_report(&self, period: ReportPeriod) -> Result<DownloadedFile, ApiError> {
        let req = ExportReportRequest { period };
        let request = self
            .request(HttpMethod::Post, ExportReportRequest::PATH, true)?
            .json(serde_json::to_string(&req)?);
        let response = self.send(request).await?;

        let filename = response
            .content_disposition
            .as_deref()
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| req.fallback_filename());
        let content_type = response
            .content_type
            .clone()
            .unwrap_or_else(|| "application/pdf".to_string());

        Ok(DownloadedFile {
            filename,
            content_type,
            bytes: response.body,
        })
    }

    pub async fn users(&self) -> Result<Vec<ManagedUser>, ApiError> {
        Ok(self.call(&ListUsersRequest).await?.users)
    }

    pub async fn update_user_status(
        &self,
        user_id: &str,
        status: UserStatus,
    ) -> Result<MessageResponse, ApiError> {
        self.call(&UpdateUserStatusRequest {
            user_id: user_id.to_string(),
            status,
        })
        .await
    }
}

/// 按需创建 API 客户端
///
/// 令牌在创建客户端时读取，登录前后拿到的都是当前值。
#[derive(Clone, Copy)]
pub struct ApiFactory {
    base_url: StoredValue<String>,
    session: SessionContext,
}

impl ApiFactory {
    pub fn client(&self) -> RxLensApi {
        RxLensApi::new(
            &self.base_url.get_value(),
            self.session.token_untracked(),
            FetchTransport,
        )
    }
}

pub fn use_api() -> ApiFactory {
    ApiFactory {
        base_url: StoredValue::new(use_config().api_base_url),
        session: use_session(),
    }
}

#[cfg(test)]
mod tests;
