//! RxLens 前后端共享的领域模型
//!
//! 这里只放纯数据与纯规则，不依赖浏览器 API，
//! 因此可以在原生目标上直接测试。

use serde::{Deserialize, Serialize};

pub mod access;
pub mod chart;
pub mod confidence;
pub mod date;
pub mod download;
pub mod listing;
pub mod protocol;
pub mod text;
pub mod upload;
pub mod validation;

pub use access::{AccessDecision, DenyReason, Role, check_access};
pub use confidence::ConfidenceTier;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 会话令牌的存储键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// 会话用户信息的存储键
pub const STORAGE_USER_KEY: &str = "user";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// 上传表单中文件字段的名称
pub const UPLOAD_FIELD_NAME: &str = "image";

// =========================================================
// 会话 (Session)
// =========================================================

/// 登录接口返回的用户信息，也是持久化到 `user` 键的形状
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// 已认证会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

impl Session {
    pub fn new(user: SessionUser, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

// =========================================================
// 识别结果 (Recognition)
// =========================================================

/// `POST /api/predict` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub ocr_text: String,
    #[serde(default)]
    pub found_drugs: Vec<String>,
    pub ocr_confidence: f64,
    pub drug_confidence: f64,
}

/// 一次处方扫描记录（历史、仪表盘最近扫描）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionScan {
    #[serde(rename = "_id")]
    pub id: String,
    pub ocr_text: String,
    #[serde(default)]
    pub found_drugs: Vec<String>,
    pub created_at: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ocr_confidence: Option<f64>,
    #[serde(default)]
    pub drug_confidence: Option<f64>,
}

/// 日志条目中的用户摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}

/// 管理员日志条目：扫描记录 + 所属用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionLog {
    #[serde(rename = "_id")]
    pub id: String,
    pub ocr_text: String,
    #[serde(default)]
    pub found_drugs: Vec<String>,
    pub created_at: String,
    pub user: UserSummary,
}

// =========================================================
// 统计数据 (Dashboard / Reports)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastUpload {
    pub created_at: String,
    #[serde(default)]
    pub ocr_text: String,
    #[serde(default)]
    pub found_drugs: Vec<String>,
}

/// 用户仪表盘统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDashboardStats {
    pub total_uploads: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub last_upload: Option<LastUpload>,
    #[serde(default)]
    pub recent_scans: Vec<PrescriptionScan>,
}

/// 管理员仪表盘中的一条近期活动
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub model: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyScans {
    pub date: String,
    pub scans: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyPoint {
    pub date: String,
    pub accuracy: f64,
}

/// 管理员仪表盘统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboardStats {
    pub total_users: u64,
    pub total_scans: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub scans_per_day: Vec<DailyScans>,
    #[serde(default)]
    pub accuracy_trends: Vec<AccuracyPoint>,
}

/// 报表统计周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Today,
    Week,
    #[default]
    Month,
    Year,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::Today,
        ReportPeriod::Week,
        ReportPeriod::Month,
        ReportPeriod::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Today => "today",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Today => "Today",
            ReportPeriod::Week => "This Week",
            ReportPeriod::Month => "This Month",
            ReportPeriod::Year => "This Year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub name: String,
    pub recognitions: u64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: f64,
}

/// 报表数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default)]
    pub period: ReportPeriod,
    pub total_patients: u64,
    pub active_prescriptions: u64,
    pub recognition_accuracy: f64,
    #[serde(default)]
    pub system_uptime: f64,
    #[serde(default)]
    pub recognition_activity: Vec<ActivityPoint>,
    #[serde(default)]
    pub prescription_distribution: Vec<DistributionSlice>,
}

// =========================================================
// 用户与资料 (Users / Profile)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

/// 管理员用户列表中的用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// 仅携带提示消息的通用响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_result_defaults_missing_drugs() {
        let json = r#"{"ocr_text":"Amoxicillin 500mg","ocr_confidence":91.2,"drug_confidence":40}"#;
        let result: PredictionResult = serde_json::from_str(json).unwrap();
        assert!(result.found_drugs.is_empty());
        assert_eq!(result.drug_confidence, 40.0);
    }

    #[test]
    fn test_prediction_result_requires_confidence() {
        let json = r#"{"ocr_text":"x","found_drugs":[]}"#;
        assert!(serde_json::from_str::<PredictionResult>(json).is_err());
    }

    #[test]
    fn test_log_uses_mongo_id_field() {
        let json = r#"{
            "_id": "65f0",
            "ocr_text": "Paracetamol",
            "found_drugs": ["paracetamol"],
            "created_at": "2024-03-01T10:00:00Z",
            "user": {"name": "Ana", "email": "ana@example.com"}
        }"#;
        let log: PrescriptionLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.id, "65f0");
        assert_eq!(log.user.name, "Ana");
    }

    #[test]
    fn test_report_period_round_trip_str() {
        for period in ReportPeriod::ALL {
            assert_eq!(ReportPeriod::parse(period.as_str()), Some(period));
        }
        assert_eq!(ReportPeriod::parse("decade"), None);
        assert_eq!(ReportPeriod::default(), ReportPeriod::Month);
    }

    #[test]
    fn test_user_status_toggle() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Inactive);
        assert_eq!(UserStatus::Inactive.toggled(), UserStatus::Active);
    }
}
