use anyhow::{Context, Result};
use clap::Parser;
use mri_classify::{cli, config, error, notify, presenter, preview, selection, session, transport};
use mri_classify_common::{validate, Phase};
use cli::{Cli, Commands};
use config::Config;
use error::ClassifyError;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Predict { file, output, endpoint } => {
            println!("🧠 mri-classify - 腫瘍判定\n");

            let endpoint = endpoint.unwrap_or_else(|| config.resolved_endpoint());
            let transport = transport::HttpTransport::new(
                endpoint.clone(),
                Duration::from_secs(config.timeout_seconds),
            )?;
            let registry = Arc::new(preview::ObjectUrlRegistry::new());
            let session = session::UploadSession::new(
                transport,
                notify::ConsoleNotifier,
                Arc::clone(&registry),
            );

            // 1. 検証
            println!("[1/2] ファイルを検証中...");
            let selected = selection::SelectedFile::from_path(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let outcome = session.select(Some(selected));
            if let Some(reason) = outcome.reason {
                return Err(ClassifyError::Rejected(reason).into());
            }
            println!("✔ {}\n", file.display());

            // 2. 送信
            println!("[2/2] 送信中... ({})", endpoint);
            let progress = presenter::follow_progress(session.subscribe());
            let phase = session.submit().await;
            presenter::finish_progress(progress).await;

            let view = session.view();
            println!("\n{}", presenter::render_view(&view));

            if phase != Some(Phase::Succeeded) {
                let message = view
                    .state
                    .error_message
                    .unwrap_or_else(|| mri_classify_common::DEFAULT_FAILURE_MESSAGE.to_string());
                return Err(ClassifyError::PredictionFailed(message).into());
            }

            if let (Some(output), Some(result)) = (output, view.result) {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&output, json)
                    .with_context(|| format!("write {}", output.display()))?;
                println!("✔ 結果を保存: {}", output.display());
            }

            session.reset();
            println!("\n✅ 判定完了");
        }

        Commands::Validate { file } => {
            let selected = selection::SelectedFile::from_path(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let outcome = validate(Some(&selected.descriptor()));

            println!("ファイル: {}", selected.file_name);
            println!("  メディアタイプ: {}", selected.media_type);
            println!("  サイズ: {} bytes", selected.size());

            match outcome.reason {
                None => println!("✔ 送信できます"),
                Some(reason) => {
                    println!("✖ {}: {}", reason, reason.description());
                    return Err(ClassifyError::Rejected(reason).into());
                }
            }
        }

        Commands::Config { set_endpoint, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  使用中のエンドポイント: {}", config.resolved_endpoint());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
