use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cml-reconcile")]
#[command(about = "圧力容器検査のCML照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 既存CMLと新しい測定値を照合
    Reconcile {
        /// 既存位置JSONファイル
        #[arg(required = true)]
        existing: PathBuf,

        /// 測定値JSONファイル
        #[arg(required = true)]
        readings: PathBuf,

        /// 照合結果JSONの出力先（未指定時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Excelレポートの出力先（ファイルまたはディレクトリ）
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// 最低信頼度（0.0-1.0、設定ファイルより優先）
        #[arg(long)]
        min_confidence: Option<f64>,

        /// 類似度による照合を無効化
        #[arg(long)]
        no_fuzzy: bool,
    },

    /// 部位テキストを区分に分類
    Categorize {
        /// 部位テキスト
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// 測定値を部位ごとにグループ表示
    Group {
        /// 測定値JSONファイル
        #[arg(required = true)]
        readings: PathBuf,
    },

    /// 設定管理
    Config {
        /// 最低信頼度を設定
        #[arg(long)]
        set_min_confidence: Option<f64>,

        /// 類似度照合の有効/無効を設定
        #[arg(long)]
        set_allow_fuzzy: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
