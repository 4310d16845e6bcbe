use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("メディアタイプが不正: {0}")]
    InvalidMediaType(String),

    #[error("ファイルが受け付けられません: {0}")]
    Rejected(mri_classify_common::RejectReason),

    #[error("予測に失敗しました: {0}")]
    PredictionFailed(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] mri_classify_common::Error),
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
