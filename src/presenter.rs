//! 端末への表示
//!
//! セッションの状態を読むだけで、状態は変更しない。

use crate::session::SessionView;
use indicatif::{ProgressBar, ProgressStyle};
use mri_classify_common::{confidence_label, Framing, Phase, PredictionResult, UploadState};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// 予測結果の表示
pub fn render_result(result: &PredictionResult) -> String {
    let framing = Framing::of(result);
    let mark = match framing {
        Framing::Benign => "🟢",
        Framing::Adverse => "🔴",
    };

    format!(
        "{} {}\n  予測: {}\n  信頼度: {}\n  メッセージ: {}",
        mark,
        framing.title(),
        result.prediction_label,
        confidence_label(result.confidence_class),
        result.message
    )
}

/// セッション全体の表示
pub fn render_view(view: &SessionView) -> String {
    let mut lines = vec![format!(
        "状態: {} ({}%)",
        view.state.phase, view.state.progress
    )];

    if let Some(preview) = &view.preview {
        lines.push(format!("プレビュー: {}", preview.url));
    }

    match (&view.result, &view.state.error_message) {
        (Some(result), _) => lines.push(render_result(result)),
        (None, Some(message)) => lines.push(format!("✖ エラー: {}", message)),
        (None, None) => {}
    }

    lines.join("\n")
}

/// 進捗バーでセッションに追従する
///
/// succeeded/failed に達するか、セッションが破棄されると終了する。
pub fn follow_progress(mut rx: watch::Receiver<UploadState>) -> JoinHandle<()> {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{spinner} [{bar:40}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    bar.set_style(style);
    bar.set_message("送信中...");

    tokio::spawn(async move {
        loop {
            let state = rx.borrow_and_update().clone();
            bar.set_position(u64::from(state.progress));
            match state.phase {
                Phase::Succeeded => {
                    bar.finish_with_message("完了");
                    break;
                }
                Phase::Failed => {
                    bar.abandon_with_message("失敗");
                    break;
                }
                _ => {}
            }

            if rx.changed().await.is_err() {
                bar.abandon();
                break;
            }
        }
    })
}

/// 進捗バーの終了を待つ。タスクが異常終了していたら警告して`false`
pub async fn finish_progress(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "progress display task failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewHandle;

    fn result(label: &str, confidence_class: i64) -> PredictionResult {
        PredictionResult {
            success: true,
            prediction_label: label.to_string(),
            confidence_class,
            message: "ok".to_string(),
        }
    }

    #[test]
    fn test_render_benign_result() {
        let text = render_result(&result("No tumor detected", 1));
        assert!(text.contains("No Tumor Detected"));
        assert!(text.contains("No tumor detected"));
        assert!(text.contains("High"));
    }

    #[test]
    fn test_render_adverse_result() {
        let text = render_result(&result("Glioma detected", 0));
        assert!(text.starts_with("🔴 Tumor Detected"));
        assert!(text.contains("Low"));
    }

    #[test]
    fn test_render_view_with_error() {
        let view = SessionView {
            state: UploadState {
                phase: Phase::Failed,
                progress: 100,
                error_message: Some("server overloaded".into()),
            },
            preview: Some(PreviewHandle {
                url: "blob:mri-classify/1".into(),
            }),
            result: None,
        };
        let text = render_view(&view);
        assert!(text.contains("failed (100%)"));
        assert!(text.contains("blob:mri-classify/1"));
        assert!(text.contains("server overloaded"));
    }

    #[test]
    fn test_render_idle_view() {
        let text = render_view(&SessionView::default());
        assert_eq!(text, "状態: idle (0%)");
    }

    #[tokio::test]
    async fn test_finish_progress_reports_cancelled_task() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        assert!(!finish_progress(handle).await);
    }

    #[tokio::test]
    async fn test_finish_progress_after_terminal_state() {
        let (tx, rx) = watch::channel(UploadState::submitting());
        let handle = follow_progress(rx);
        tx.send_replace(UploadState {
            phase: Phase::Succeeded,
            progress: 100,
            error_message: None,
        });
        assert!(finish_progress(handle).await);
    }
}
