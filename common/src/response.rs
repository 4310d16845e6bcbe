//! 予測APIレスポンスの解釈
//!
//! HTTPステータスとボディから、成功（PredictionResult）か
//! 失敗（表示用メッセージ）かを決める。

use crate::types::{ErrorResponse, PredictionResponse, PredictionResult};

/// メッセージがない失敗時の既定メッセージ
pub const DEFAULT_FAILURE_MESSAGE: &str = "Prediction failed";

/// 通信1回分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Success(PredictionResult),
    Failure(String),
}

/// レスポンスを解釈する
///
/// - 2xx以外: エラーボディの`message`（なければ既定メッセージ）
/// - 2xxでボディが不正: パースエラーのメッセージ
/// - `success: false`: ボディの`message`（空なら既定メッセージ）
pub fn interpret_response(status: u16, body: &str) -> ExchangeOutcome {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        return ExchangeOutcome::Failure(message);
    }

    let response: PredictionResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return ExchangeOutcome::Failure(format!("Invalid response from server: {}", e)),
    };

    if !response.success {
        let message = if response.message.trim().is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            response.message
        };
        return ExchangeOutcome::Failure(message);
    }

    ExchangeOutcome::Success(response.into())
}
