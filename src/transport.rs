//! 予測APIへの送信
//!
//! multipartで1ファイルを`image`フィールドに載せてPOSTする。
//! レスポンスの解釈は`mri_classify_common::interpret_response`に任せ、
//! ここではステータスとボディをそのまま返す。

use crate::config::Config;
use crate::error::{ClassifyError, Result};
use crate::selection::SelectedFile;
use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::time::Duration;

/// ファイルを載せるフィールド名
pub const IMAGE_FIELD: &str = "image";

/// 送信結果（HTTPステータスとボディ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// 予測APIとのやり取り
///
/// `Err`は通信レベルの失敗（接続できない、タイムアウトなど）。
/// HTTPのエラーステータスは`Ok`で返す。
pub trait PredictionTransport {
    fn submit(&self, file: &SelectedFile) -> impl Future<Output = Result<TransportResponse>>;
}

/// reqwestによる送信
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.resolved_endpoint(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionTransport for HttpTransport {
    async fn submit(&self, file: &SelectedFile) -> Result<TransportResponse> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.media_type)
            .map_err(|_| ClassifyError::InvalidMediaType(file.media_type.clone()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        tracing::debug!(endpoint = %self.endpoint, size = file.size(), "sending prediction request");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, body_len = body.len(), "prediction response received");

        Ok(TransportResponse { status, body })
    }
}
