//! 照合入力の読み込み
//!
//! 既存位置・測定値をJSON配列ファイルから読み込む。
//! 角度や部位区分の不正値はエラーにせず、角度なし・Other として扱う。

use crate::error::{ReconcileError, Result};
use cml_reconcile_common::types::{parse_existing, parse_readings};
use cml_reconcile_common::{Error as CommonError, ExistingLocation, NewReading};
use std::path::Path;

/// 既存位置を読み込む
pub fn load_existing(path: &Path) -> Result<Vec<ExistingLocation>> {
    let locations = parse_existing(&read_input(path)?).map_err(|e| invalid_input(path, e))?;
    log::debug!("既存位置 {}件: {}", locations.len(), path.display());
    Ok(locations)
}

/// 測定値を読み込む
pub fn load_readings(path: &Path) -> Result<Vec<NewReading>> {
    let readings = parse_readings(&read_input(path)?).map_err(|e| invalid_input(path, e))?;
    log::debug!("測定値 {}件: {}", readings.len(), path.display());
    Ok(readings)
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ReconcileError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn invalid_input(path: &Path, error: CommonError) -> ReconcileError {
    match error {
        CommonError::Json(e) => ReconcileError::InvalidInput(format!("{}: {}", path.display(), e)),
        other => other.into(),
    }
}
