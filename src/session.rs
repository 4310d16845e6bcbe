//! アップロードセッション
//!
//! 状態遷移: idle → submitting → {succeeded | failed} → idle
//!
//! - 送信中は一定間隔で擬似進捗を進める（上限90）
//! - 通信が終わった時点で進捗タイマーを止め、100にする
//! - 一定時間後に進捗だけ0へ戻す（選択・プレビュー・結果は残す）
//! - 手動リセットはすべてを即座に初期状態へ戻す
//!
//! 状態は`tokio::sync::watch`で配信するので、表示側は`subscribe()`で追従できる。

use crate::notify::Notifier;
use crate::preview::{PreviewBackend, PreviewHandle, PreviewManager};
use crate::selection::SelectedFile;
use crate::transport::PredictionTransport;
use mri_classify_common::{
    interpret_response, types::PROGRESS_CEILING, types::PROGRESS_COMPLETE, validate,
    ExchangeOutcome, Framing, Notification, Phase, PredictionResult, UploadState,
    ValidationOutcome,
};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::time::{Instant, MissedTickBehavior};

/// 通知タイトル（検証エラー）
pub const INVALID_FILE_TITLE: &str = "Invalid File";

/// 通知タイトル（予測失敗）
pub const PREDICTION_FAILED_TITLE: &str = "Prediction Failed";

/// 進捗表示のタイミング
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub tick_interval: Duration,
    pub tick_increment: u8,
    pub progress_ceiling: u8,
    pub reset_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(300),
            tick_increment: 5,
            progress_ceiling: PROGRESS_CEILING,
            reset_delay: Duration::from_millis(1000),
        }
    }
}

/// 表示側に渡すスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub state: UploadState,
    pub preview: Option<PreviewHandle>,
    pub result: Option<PredictionResult>,
}

struct SessionInner<B: PreviewBackend> {
    selected: Option<SelectedFile>,
    preview: PreviewManager<B>,
    result: Option<PredictionResult>,
    /// 送信・リセット・送信中の選び直しのたびに進む。古い送信の進捗や結果、遅延リセットを捨てるのに使う
    generation: u64,
}

struct Shared<B: PreviewBackend> {
    inner: Mutex<SessionInner<B>>,
    state_tx: watch::Sender<UploadState>,
    /// 送信中のやり取りを打ち切る合図（リセット・選び直し）
    superseded: Notify,
}

impl<B: PreviewBackend> Shared<B> {
    // ロック順は inner → state_tx
    fn lock(&self) -> MutexGuard<'_, SessionInner<B>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }
}

pub struct UploadSession<T, N, B: PreviewBackend> {
    shared: Arc<Shared<B>>,
    transport: T,
    notifier: N,
    timing: SessionTiming,
}

impl<T, N, B> UploadSession<T, N, B>
where
    T: PredictionTransport,
    N: Notifier,
    B: PreviewBackend + Send + 'static,
{
    pub fn new(transport: T, notifier: N, previews: B) -> Self {
        let (state_tx, _) = watch::channel(UploadState::default());
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(SessionInner {
                    selected: None,
                    preview: PreviewManager::new(previews),
                    result: None,
                    generation: 0,
                }),
                state_tx,
                superseded: Notify::new(),
            }),
            transport,
            notifier,
            timing: SessionTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: SessionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// ファイルを選択する
    ///
    /// 拒否された場合は通知だけ行い、現在の選択はそのまま残す。
    /// 受け付けた場合はプレビューを差し替え、前回の結果を消す。
    /// 送信中に受け付けた場合、その送信は打ち切って状態を初期値に戻す。
    pub fn select(&self, file: Option<SelectedFile>) -> ValidationOutcome {
        let previous = self.enter_validating();

        let descriptor = file.as_ref().map(SelectedFile::descriptor);
        let outcome = validate(descriptor.as_ref());

        match (outcome.reason, file) {
            (None, Some(file)) => {
                let mut inner = self.shared.lock();
                let handle = inner.preview.set_preview(&file);
                tracing::info!(file = %file.file_name, size = file.size(), preview = %handle.url, "file selected");
                inner.selected = Some(file);
                inner.result = None;
                if previous.is_none() {
                    inner.generation += 1;
                    tracing::info!("in-flight submission superseded by new selection");
                }
                self.leave_validating(previous, true);
                drop(inner);
                if previous.is_none() {
                    self.shared.superseded.notify_waiters();
                }
            }
            (reason, _) => {
                let reason = reason.unwrap_or(mri_classify_common::RejectReason::NoFile);
                tracing::warn!(%reason, "file rejected");
                self.leave_validating(previous, false);
                self.notifier
                    .notify(&Notification::destructive(INVALID_FILE_TITLE, reason.description()));
            }
        }

        outcome
    }

    /// 送信する
    ///
    /// 未選択または送信中なら何もせず`None`を返す。
    /// 終了時のフェーズ（succeeded/failed）を返す。途中でリセット・選び直しされた場合は`None`。
    pub async fn submit(&self) -> Option<Phase> {
        let (file, generation) = {
            let mut inner = self.shared.lock();
            let Some(file) = inner.selected.clone() else {
                tracing::debug!("submit ignored: no file selected");
                return None;
            };

            let mut started = false;
            self.shared.state_tx.send_if_modified(|state| {
                if state.phase == Phase::Submitting {
                    return false;
                }
                *state = UploadState::submitting();
                started = true;
                true
            });
            if !started {
                tracing::debug!("submit ignored: submission already in flight");
                return None;
            }

            inner.result = None;
            inner.generation += 1;
            (file, inner.generation)
        };

        tracing::info!(file = %file.file_name, "submission started");

        let outcome = self.run_exchange(&file, generation).await?;
        let phase = self.finish(generation, outcome)?;
        self.schedule_progress_reset(generation);
        Some(phase)
    }

    /// すべてを初期状態に戻す
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        inner.preview.clear_preview();
        inner.selected = None;
        inner.result = None;
        inner.generation += 1;
        self.shared.state_tx.send_replace(UploadState::default());
        drop(inner);
        self.shared.superseded.notify_waiters();
        tracing::info!("session reset");
    }

    pub fn state(&self) -> UploadState {
        self.shared.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.shared.state_tx.subscribe()
    }

    pub fn result(&self) -> Option<PredictionResult> {
        self.shared.lock().result.clone()
    }

    pub fn selected(&self) -> Option<SelectedFile> {
        self.shared.lock().selected.clone()
    }

    pub fn preview(&self) -> Option<PreviewHandle> {
        self.shared.lock().preview.current().cloned()
    }

    pub fn view(&self) -> SessionView {
        let inner = self.shared.lock();
        SessionView {
            state: self.shared.state_tx.borrow().clone(),
            preview: inner.preview.current().cloned(),
            result: inner.result.clone(),
        }
    }

    /// 通信と擬似進捗を競わせる。通信が先に評価されるので、
    /// 通信完了後に進捗が進むことはない
    ///
    /// リセットや選び直しで世代が変わったら、やり取りを破棄して`None`を返す。
    async fn run_exchange(&self, file: &SelectedFile, generation: u64) -> Option<ExchangeOutcome> {
        let superseded = self.shared.superseded.notified();
        tokio::pin!(superseded);
        superseded.as_mut().enable();
        if !self.shared.is_current(generation) {
            return None;
        }

        let exchange = self.transport.submit(file);
        tokio::pin!(exchange);

        let period = self.timing.tick_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let response = loop {
            tokio::select! {
                biased;
                response = &mut exchange => break response,
                _ = &mut superseded => {
                    tracing::debug!("in-flight exchange abandoned");
                    return None;
                }
                _ = ticker.tick() => {
                    if !self.advance_progress(generation) {
                        tracing::debug!("in-flight exchange abandoned");
                        return None;
                    }
                }
            }
        };

        Some(match response {
            Ok(response) => interpret_response(response.status, &response.body),
            Err(e) => {
                tracing::warn!(error = %e, "prediction request failed");
                ExchangeOutcome::Failure(e.to_string())
            }
        })
    }

    /// 現在の送信なら進捗を進めて`true`、古い送信なら何もせず`false`
    fn advance_progress(&self, generation: u64) -> bool {
        let inner = self.shared.lock();
        if inner.generation != generation {
            return false;
        }
        let increment = self.timing.tick_increment;
        let ceiling = self.timing.progress_ceiling;
        self.shared.state_tx.send_if_modified(|state| {
            let before = state.progress;
            state.tick(increment, ceiling) != before
        });
        true
    }

    fn finish(&self, generation: u64, outcome: ExchangeOutcome) -> Option<Phase> {
        let (phase, notification) = {
            let mut inner = self.shared.lock();
            if inner.generation != generation {
                tracing::debug!("prediction outcome discarded after reset");
                return None;
            }

            match outcome {
                ExchangeOutcome::Success(result) => {
                    let framing = Framing::of(&result);
                    tracing::info!(
                        prediction = %result.prediction_label,
                        confidence_class = result.confidence_class,
                        ?framing,
                        "prediction succeeded"
                    );
                    let notification = framing.notification(&result.message);
                    inner.result = Some(result);
                    self.shared.state_tx.send_modify(|state| {
                        state.phase = Phase::Succeeded;
                        state.progress = PROGRESS_COMPLETE;
                        state.error_message = None;
                    });
                    (Phase::Succeeded, notification)
                }
                ExchangeOutcome::Failure(message) => {
                    tracing::warn!(%message, "prediction failed");
                    inner.result = None;
                    let notification =
                        Notification::destructive(PREDICTION_FAILED_TITLE, message.clone());
                    self.shared.state_tx.send_modify(|state| {
                        state.phase = Phase::Failed;
                        state.progress = PROGRESS_COMPLETE;
                        state.error_message = Some(message);
                    });
                    (Phase::Failed, notification)
                }
            }
        };

        self.notifier.notify(&notification);
        Some(phase)
    }

    /// 一定時間後に進捗だけ0へ戻す
    fn schedule_progress_reset(&self, generation: u64) {
        let shared = Arc::downgrade(&self.shared);
        let delay = self.timing.reset_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(shared) = shared.upgrade() else {
                return;
            };
            let inner = shared.lock();
            if inner.generation != generation {
                return;
            }
            shared.state_tx.send_if_modified(|state| {
                if !state.phase.is_terminal() {
                    return false;
                }
                state.phase = Phase::Idle;
                state.progress = 0;
                true
            });
        });
    }

    fn enter_validating(&self) -> Option<Phase> {
        let mut previous = None;
        self.shared.state_tx.send_if_modified(|state| {
            if state.phase == Phase::Submitting {
                return false;
            }
            previous = Some(state.phase);
            state.phase = Phase::Validating;
            true
        });
        previous
    }

    fn leave_validating(&self, previous: Option<Phase>, accepted: bool) {
        let Some(previous) = previous else {
            if accepted {
                // 送信中に選び直した場合は打ち切った送信の進捗を消す
                self.shared.state_tx.send_replace(UploadState::default());
            }
            return;
        };

        self.shared.state_tx.send_modify(|state| {
            if state.phase == Phase::Validating {
                state.phase = previous;
            }
            if accepted {
                state.error_message = None;
            }
        });
    }
}
