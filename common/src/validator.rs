//! 選択ファイルの検証
//!
//! 申告されたメディアタイプとサイズだけで判定する（バイト列の検査はしない）。

use serde::Serialize;

/// 受け付けるメディアタイプ
pub const ALLOWED_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// 最大ファイルサイズ（5 MiB、ちょうどの値は許可）
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// 検証対象のファイル情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDescriptor<'a> {
    pub media_type: &'a str,
    pub size: u64,
}

impl<'a> FileDescriptor<'a> {
    pub fn new(media_type: &'a str, size: u64) -> Self {
        Self { media_type, size }
    }
}

/// 拒否理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NoFile,
    UnsupportedType,
    TooLarge,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NoFile => "no file",
            RejectReason::UnsupportedType => "unsupported type",
            RejectReason::TooLarge => "too large",
        }
    }

    /// 利用者向けの説明
    pub fn description(&self) -> &'static str {
        match self {
            RejectReason::NoFile => "Please select an image file.",
            RejectReason::UnsupportedType => "Please upload a JPEG, PNG or GIF image.",
            RejectReason::TooLarge => "Please upload an image smaller than 5MB.",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub reason: Option<RejectReason>,
}

impl ValidationOutcome {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
        }
    }
}

/// ファイルを検証する
///
/// 判定順: 未選択 → メディアタイプ → サイズ
///
/// # Examples
/// ```
/// use mri_classify_common::{validate, FileDescriptor, RejectReason};
///
/// let outcome = validate(Some(&FileDescriptor::new("image/webp", 10)));
/// assert_eq!(outcome.reason, Some(RejectReason::UnsupportedType));
/// ```
pub fn validate(file: Option<&FileDescriptor<'_>>) -> ValidationOutcome {
    let Some(file) = file else {
        return ValidationOutcome::rejected(RejectReason::NoFile);
    };

    if !ALLOWED_MEDIA_TYPES.contains(&file.media_type) {
        return ValidationOutcome::rejected(RejectReason::UnsupportedType);
    }

    if file.size > MAX_FILE_SIZE {
        return ValidationOutcome::rejected(RejectReason::TooLarge);
    }

    ValidationOutcome::accepted()
}
