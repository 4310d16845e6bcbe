use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mri-classify")]
#[command(about = "MRI画像の腫瘍判定クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して判定結果を表示
    Predict {
        /// 画像ファイル（JPEG/PNG/GIF、5MBまで）
        #[arg(required = true)]
        file: PathBuf,

        /// 判定結果をJSONで保存
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 送信先エンドポイント（設定より優先）
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// 送信せずにファイルの検証だけ行う
    Validate {
        /// 画像ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 送信先エンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
