//! 圧力容器検査のCML照合ツール
//!
//! 照合ロジック本体は `cml-reconcile-common` にあり、
//! このクレートはCLI・設定・ファイル入出力を担当する。

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod export;
