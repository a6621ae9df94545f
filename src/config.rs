use crate::error::{ReconcileError, Result};
use cml_reconcile_common::{Error as CommonError, MatchOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub min_confidence: f64,
    pub allow_fuzzy_match: bool,
    /// レポートの見出し（未指定時は日付入り）
    pub report_title: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let options = MatchOptions::default();
        Self {
            min_confidence: options.min_confidence,
            allow_fuzzy_match: options.allow_fuzzy_match,
            report_title: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReconcileError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cml-reconcile").join("config.json"))
    }

    pub fn set_min_confidence(&mut self, value: f64) -> Result<()> {
        check_confidence(value)?;
        self.min_confidence = value;
        Ok(())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            min_confidence: self.min_confidence,
            allow_fuzzy_match: self.allow_fuzzy_match,
        }
    }

    fn validate(&self) -> Result<()> {
        check_confidence(self.min_confidence)
    }
}

/// 信頼度の閾値は 0.0〜1.0
pub fn check_confidence(value: f64) -> Result<()> {
    let options = MatchOptions {
        min_confidence: value,
        ..Default::default()
    };
    options.validate().map_err(|e| match e {
        CommonError::Config(msg) => ReconcileError::Config(msg),
        other => other.into(),
    })
}
