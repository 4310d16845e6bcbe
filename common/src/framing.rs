//! 予測結果の表示区分
//!
//! ラベル文字列に陰性マーカーが含まれるかどうかだけで判定する。
//! 腫瘍の種類は区別しない。

use crate::types::{Notification, NotificationVariant, PredictionResult};

/// 陰性（腫瘍なし）を表すマーカー
pub const NEGATIVE_MARKER: &str = "No tumor";

/// 表示区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// 腫瘍なし
    Benign,
    /// 腫瘍あり（マーカーを含まないラベルはすべてこちら）
    Adverse,
}

impl Framing {
    pub fn of_label(label: &str) -> Self {
        if label.contains(NEGATIVE_MARKER) {
            Framing::Benign
        } else {
            Framing::Adverse
        }
    }

    pub fn of(result: &PredictionResult) -> Self {
        Self::of_label(&result.prediction_label)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Framing::Benign => "No Tumor Detected",
            Framing::Adverse => "Tumor Detected",
        }
    }

    pub fn variant(&self) -> NotificationVariant {
        match self {
            Framing::Benign => NotificationVariant::Default,
            Framing::Adverse => NotificationVariant::Destructive,
        }
    }

    /// 予測成功時の通知
    pub fn notification(&self, message: &str) -> Notification {
        Notification {
            title: self.title().to_string(),
            description: message.to_string(),
            variant: self.variant(),
        }
    }
}

/// 信頼度ラベル（1のみHigh、それ以外の値は検証せずLow）
pub fn confidence_label(confidence_class: i64) -> &'static str {
    if confidence_class == 1 {
        "High"
    } else {
        "Low"
    }
}
