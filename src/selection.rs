use crate::error::{ClassifyError, Result};
use mri_classify_common::FileDescriptor;
use std::path::Path;
use std::sync::Arc;

/// 選択中のファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    /// 申告メディアタイプ（拡張子から決まる。中身は見ない）
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

/// 拡張子 → メディアタイプ
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
];

const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// ファイルを読み込む
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ClassifyError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self::new(file_name, media_type_for_path(path), bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn descriptor(&self) -> FileDescriptor<'_> {
        FileDescriptor::new(&self.media_type, self.size())
    }
}

/// 拡張子からメディアタイプを決める（大文字小文字は区別しない）
pub fn media_type_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension() else {
        return UNKNOWN_MEDIA_TYPE;
    };
    let ext = ext.to_string_lossy().to_lowercase();

    MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, media_type)| *media_type)
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}
