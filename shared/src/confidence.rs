//! 置信度分级
//!
//! 只负责渲染分类，从不修改后端给出的分数。

/// 三档置信度分级：≥80 良好，≥60 警告，<60 较差
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    Good,
    Warning,
    Poor,
}

pub const GOOD_THRESHOLD: f64 = 80.0;
pub const WARNING_THRESHOLD: f64 = 60.0;

impl ConfidenceTier {
    /// NaN 归为 `Poor`
    pub fn classify(score: f64) -> Self {
        if score >= GOOD_THRESHOLD {
            ConfidenceTier::Good
        } else if score >= WARNING_THRESHOLD {
            ConfidenceTier::Warning
        } else {
            ConfidenceTier::Poor
        }
    }

    /// 进度条填充色
    pub fn bar_class(&self) -> &'static str {
        match self {
            ConfidenceTier::Good => "bg-success",
            ConfidenceTier::Warning => "bg-warning",
            ConfidenceTier::Poor => "bg-error",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            ConfidenceTier::Good => "text-success",
            ConfidenceTier::Warning => "text-warning",
            ConfidenceTier::Poor => "text-error",
        }
    }
}

/// 进度条宽度（百分比），限制在 [0, 100]
pub fn bar_width(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// 显示标签，保留一位小数，与原始分数一致
pub fn label(score: f64) -> String {
    format!("{:.1}%", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(ConfidenceTier::classify(85.0), ConfidenceTier::Good);
        assert_eq!(ConfidenceTier::classify(80.0), ConfidenceTier::Good);
        assert_eq!(ConfidenceTier::classify(79.9), ConfidenceTier::Warning);
        assert_eq!(ConfidenceTier::classify(60.0), ConfidenceTier::Warning);
        assert_eq!(ConfidenceTier::classify(55.0), ConfidenceTier::Poor);
        assert_eq!(ConfidenceTier::classify(f64::NAN), ConfidenceTier::Poor);
    }

    #[test]
    fn test_bar_width_clamps_but_label_keeps_raw() {
        assert_eq!(bar_width(130.0), 100.0);
        assert_eq!(bar_width(-4.0), 0.0);
        assert_eq!(bar_width(f64::NAN), 0.0);
        assert_eq!(label(130.0), "130.0%");
        assert_eq!(label(85.26), "85.3%");
    }
}
