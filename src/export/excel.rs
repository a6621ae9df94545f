//! Excelレポート出力（CLI版）
//!
//! 共通ライブラリで生成したバッファをファイルに書き込む

use crate::error::{ReconcileError, Result};
use cml_reconcile_common::export::excel_core::generate_report_buffer;
use cml_reconcile_common::MatchResult;
use std::path::Path;

pub fn write_excel(result: &MatchResult, output_path: &Path, title: &str) -> Result<()> {
    let buffer = generate_report_buffer(result, title).map_err(ReconcileError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)?;
    log::info!("Excel出力: {}", output_path.display());

    Ok(())
}
