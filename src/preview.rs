//! プレビューハンドル管理
//!
//! 選択ファイルを再読み込みせずに表示するための参照（blob URL）を扱う。
//! 生きているハンドルは常に高々1つ。新しいハンドルは古いものを解放してから作り、
//! 所有者が破棄されたときにも必ず解放する。

use crate::selection::SelectedFile;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// プレビュー参照
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    pub url: String,
}

/// プレビュー参照の発行元
pub trait PreviewBackend {
    fn create(&self, file: &SelectedFile) -> PreviewHandle;

    /// 解放済み・未知のハンドルを渡されても失敗しないこと
    fn release(&self, handle: &PreviewHandle);
}

impl<T: PreviewBackend + ?Sized> PreviewBackend for Arc<T> {
    fn create(&self, file: &SelectedFile) -> PreviewHandle {
        (**self).create(file)
    }

    fn release(&self, handle: &PreviewHandle) {
        (**self).release(handle)
    }
}

/// プロセス内のblob URLレジストリ
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    next_id: AtomicU64,
    entries: Mutex<HashMap<String, PreviewEntry>>,
}

#[derive(Debug, Clone)]
pub struct PreviewEntry {
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLから中身を取り出す（解放済みならNone）
    pub fn resolve(&self, url: &str) -> Option<PreviewEntry> {
        self.lock().get(url).cloned()
    }

    /// 生きているURLの数
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PreviewEntry>> {
        // 中身はただのマップなので、poisonでも続行する
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreviewBackend for ObjectUrlRegistry {
    fn create(&self, file: &SelectedFile) -> PreviewHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("blob:mri-classify/{}", id);
        self.lock().insert(
            url.clone(),
            PreviewEntry {
                media_type: file.media_type.clone(),
                bytes: Arc::clone(&file.bytes),
            },
        );
        tracing::debug!(%url, file = %file.file_name, "preview created");
        PreviewHandle { url }
    }

    fn release(&self, handle: &PreviewHandle) {
        if self.lock().remove(&handle.url).is_some() {
            tracing::debug!(url = %handle.url, "preview released");
        }
    }
}

/// 1つのプレビューハンドルの寿命を管理する
pub struct PreviewManager<B: PreviewBackend> {
    backend: B,
    current: Option<PreviewHandle>,
}

impl<B: PreviewBackend> PreviewManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    /// 古いハンドルを解放してから新しいハンドルを作る
    pub fn set_preview(&mut self, file: &SelectedFile) -> PreviewHandle {
        self.clear_preview();
        let handle = self.backend.create(file);
        self.current = Some(handle.clone());
        handle
    }

    /// 生きているハンドルを解放する（なければ何もしない）
    pub fn clear_preview(&mut self) {
        if let Some(handle) = self.current.take() {
            self.backend.release(&handle);
        }
    }

    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: PreviewBackend> Drop for PreviewManager<B> {
    fn drop(&mut self) {
        self.clear_preview();
    }
}
