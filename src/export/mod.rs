pub mod excel;

use crate::error::Result;
use cml_reconcile_common::MatchResult;
use std::path::Path;

/// 照合結果をJSONで出力（パス未指定時は標準出力）
pub fn write_json(result: &MatchResult, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
            log::info!("JSON出力: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// レポートの出力先（ディレクトリ指定時は `<title>.xlsx`）
pub fn report_path(output: &Path, title: &str) -> std::path::PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.xlsx", title))
    } else {
        output.to_path_buf()
    }
}
