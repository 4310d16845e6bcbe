//! セッション状態と予測APIの型定義
//!
//! - UploadState: アップロードの進行状態（フェーズ + 進捗）
//! - PredictionResponse / ErrorResponse: 予測APIのレスポンスボディ
//! - PredictionResult: 画面に表示する予測結果
//! - Notification: 通知コラボレータへ渡すメッセージ

use serde::{Deserialize, Serialize};

/// 進捗の上限（レスポンス到着前に到達できる最大値）
pub const PROGRESS_CEILING: u8 = 90;

/// 完了時の進捗
pub const PROGRESS_COMPLETE: u8 = 100;

/// アップロードのフェーズ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Submitting => "submitting",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }

    /// 成功/失敗のどちらか
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Succeeded | Phase::Failed)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// アップロード状態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadState {
    pub phase: Phase,
    pub progress: u8,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl UploadState {
    /// 送信開始時の状態
    pub fn submitting() -> Self {
        Self {
            phase: Phase::Submitting,
            progress: 0,
            error_message: None,
        }
    }

    /// 擬似進捗を1ステップ進める（上限でクランプ）
    ///
    /// 送信中以外は何もしない。戻り値は進めた後の進捗。
    pub fn tick(&mut self, increment: u8, ceiling: u8) -> u8 {
        if self.phase == Phase::Submitting {
            self.progress = self.progress.saturating_add(increment).min(ceiling);
        }
        self.progress
    }
}

/// 予測APIの成功レスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    pub success: bool,
    pub prediction: String,
    pub confidence_class: i64,
    pub message: String,
}

/// 予測APIのエラーレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// 予測結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub success: bool,
    pub prediction_label: String,
    pub confidence_class: i64,
    pub message: String,
}

impl From<PredictionResponse> for PredictionResult {
    fn from(r: PredictionResponse) -> Self {
        Self {
            success: r.success,
            prediction_label: r.prediction,
            confidence_class: r.confidence_class,
            message: r.message,
        }
    }
}

/// 通知の種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// 通知メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}
