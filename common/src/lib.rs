//! MRI Classify Common Library
//!
//! CLIとアップロードセッションで共有される型と純粋関数

pub mod error;
pub mod framing;
pub mod response;
pub mod types;
pub mod validator;

pub use error::{Error, Result};
pub use framing::{confidence_label, Framing, NEGATIVE_MARKER};
pub use response::{interpret_response, ExchangeOutcome, DEFAULT_FAILURE_MESSAGE};
pub use types::{
    ErrorResponse, Notification, NotificationVariant, Phase, PredictionResponse,
    PredictionResult, UploadState,
};
pub use validator::{
    validate, FileDescriptor, RejectReason, ValidationOutcome, ALLOWED_MEDIA_TYPES, MAX_FILE_SIZE,
};
