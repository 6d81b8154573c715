//! 上传 / 识别工作流状态机
//!
//! `Idle → FileSelected → Uploading → { Succeeded | Failed }`
//!
//! 状态机不关心文件的具体表示（浏览器 `File` 或测试替身），
//! 只要求实现 [`UploadSource`]。

use crate::PredictionResult;
use std::fmt;

/// 允许上传的 MIME 类型
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// 文件的最小描述
pub trait UploadSource: Clone {
    fn file_name(&self) -> &str;
    /// 浏览器声明的类型 (`File.type`)
    fn mime_type(&self) -> &str;
}

/// 文件被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// 声明的类型不在 JPEG / PNG / PDF 之内
    UnsupportedType { mime_type: String },
    /// 请求进行中，不允许更换文件
    Busy,
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::UnsupportedType { .. } => {
                write!(f, "Please upload a JPG, PNG, or PDF file.")
            }
            UploadRejection::Busy => write!(f, "A prescription is already being processed."),
        }
    }
}

/// 无法提交的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    NoFile,
    InFlight,
}

/// 检查声明类型是否可接受
pub fn is_accepted_mime(mime_type: &str) -> bool {
    let normalized = mime_type.trim().to_ascii_lowercase();
    ACCEPTED_MIME_TYPES.contains(&normalized.as_str())
}

/// 是否可以生成图片预览（PDF 不预览）
pub fn is_previewable(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// 工作流阶段
#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Uploading,
    Succeeded(PredictionResult),
    /// 失败后保留文件，可直接重试
    Failed(String),
}

/// 上传状态机
#[derive(Debug, Clone)]
pub struct UploadMachine<F> {
    file: Option<F>,
    phase: UploadPhase,
}

impl<F: UploadSource> Default for UploadMachine<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: UploadSource> UploadMachine<F> {
    pub fn new() -> Self {
        Self {
            file: None,
            phase: UploadPhase::Idle,
        }
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading)
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_uploading()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            UploadPhase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 选择文件（拖放或文件选择器）
    ///
    /// 类型不合法时状态保持不变。
    pub fn select(&mut self, file: F) -> Result<(), UploadRejection> {
        if self.is_uploading() {
            return Err(UploadRejection::Busy);
        }
        if !is_accepted_mime(file.mime_type()) {
            return Err(UploadRejection::UnsupportedType {
                mime_type: file.mime_type().to_string(),
            });
        }
        self.file = Some(file);
        self.phase = UploadPhase::FileSelected;
        Ok(())
    }

    /// 进入 `Uploading`，返回需要发送的文件
    pub fn begin_submit(&mut self) -> Result<F, SubmitBlocked> {
        if self.is_uploading() {
            return Err(SubmitBlocked::InFlight);
        }
        let file = self.file.clone().ok_or(SubmitBlocked::NoFile)?;
        self.phase = UploadPhase::Uploading;
        Ok(file)
    }

    /// 请求结束
    ///
    /// 仅在 `Uploading` 时生效，返回是否发生了状态转换。
    pub fn complete(&mut self, outcome: Result<PredictionResult, String>) -> bool {
        if !self.is_uploading() {
            return false;
        }
        self.phase = match outcome {
            Ok(result) => UploadPhase::Succeeded(result),
            Err(message) => UploadPhase::Failed(message),
        };
        true
    }

    /// 清除文件与结果，回到 `Idle`
    pub fn reset(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.file = None;
        self.phase = UploadPhase::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile {
        name: String,
        mime: String,
    }

    impl FakeFile {
        fn new(name: &str, mime: &str) -> Self {
            Self {
                name: name.to_string(),
                mime: mime.to_string(),
            }
        }
    }

    impl UploadSource for FakeFile {
        fn file_name(&self) -> &str {
            &self.name
        }
        fn mime_type(&self) -> &str {
            &self.mime
        }
    }

    fn sample_result() -> PredictionResult {
        PredictionResult {
            ocr_text: "Amoxicillin 500mg".to_string(),
            found_drugs: vec!["amoxicillin".to_string()],
            ocr_confidence: 85.0,
            drug_confidence: 55.0,
        }
    }

    #[test]
    fn test_rejects_unsupported_types_and_stays_idle() {
        let mut machine = UploadMachine::new();
        for mime in ["image/gif", "text/plain", "", "application/zip", "image/webp"] {
            let err = machine.select(FakeFile::new("x", mime)).unwrap_err();
            assert!(matches!(err, UploadRejection::UnsupportedType { .. }));
            assert_eq!(machine.phase(), &UploadPhase::Idle);
            assert!(!machine.can_submit());
        }
        assert_eq!(machine.begin_submit().unwrap_err(), SubmitBlocked::NoFile);
    }

    #[test]
    fn test_accepts_jpeg_png_pdf() {
        for mime in ["image/jpeg", "image/png", "application/pdf", "IMAGE/PNG"] {
            let mut machine = UploadMachine::new();
            machine.select(FakeFile::new("rx", mime)).unwrap();
            assert_eq!(machine.phase(), &UploadPhase::FileSelected);
            assert!(machine.can_submit());
        }
    }

    #[test]
    fn test_invalid_drop_keeps_previous_selection() {
        let mut machine = UploadMachine::new();
        machine.select(FakeFile::new("a.png", "image/png")).unwrap();
        assert!(machine.select(FakeFile::new("b.gif", "image/gif")).is_err());
        assert_eq!(machine.file().unwrap().file_name(), "a.png");
        assert_eq!(machine.phase(), &UploadPhase::FileSelected);
    }

    #[test]
    fn test_single_in_flight_request() {
        let mut machine = UploadMachine::new();
        machine.select(FakeFile::new("a.png", "image/png")).unwrap();
        let file = machine.begin_submit().unwrap();
        assert_eq!(file.file_name(), "a.png");
        assert!(machine.is_uploading());
        assert!(!machine.can_submit());
        assert_eq!(machine.begin_submit().unwrap_err(), SubmitBlocked::InFlight);
        assert_eq!(
            machine.select(FakeFile::new("b.png", "image/png")),
            Err(UploadRejection::Busy)
        );
        assert!(!machine.reset());
    }

    #[test]
    fn test_success_stores_result() {
        let mut machine = UploadMachine::new();
        machine.select(FakeFile::new("a.jpg", "image/jpeg")).unwrap();
        machine.begin_submit().unwrap();
        assert!(machine.complete(Ok(sample_result())));
        assert_eq!(machine.result(), Some(&sample_result()));
        assert!(machine.can_submit());
    }

    #[test]
    fn test_failure_retains_file_for_retry() {
        let mut machine = UploadMachine::new();
        machine.select(FakeFile::new("a.pdf", "application/pdf")).unwrap();
        machine.begin_submit().unwrap();
        assert!(machine.complete(Err("Failed to process image".to_string())));
        assert_eq!(machine.error(), Some("Failed to process image"));
        assert!(machine.can_submit());
        let retry = machine.begin_submit().unwrap();
        assert_eq!(retry.file_name(), "a.pdf");
    }

    #[test]
    fn test_complete_ignored_outside_uploading() {
        let mut machine: UploadMachine<FakeFile> = UploadMachine::new();
        assert!(!machine.complete(Ok(sample_result())));
        assert_eq!(machine.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn test_new_selection_clears_previous_result() {
        let mut machine = UploadMachine::new();
        machine.select(FakeFile::new("a.png", "image/png")).unwrap();
        machine.begin_submit().unwrap();
        machine.complete(Ok(sample_result()));
        machine.select(FakeFile::new("b.png", "image/png")).unwrap();
        assert!(machine.result().is_none());
        assert_eq!(machine.phase(), &UploadPhase::FileSelected);
    }

    #[test]
    fn test_previewable_only_images() {
        assert!(is_previewable("image/png"));
        assert!(!is_previewable("application/pdf"));
    }
}
