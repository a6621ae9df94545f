use crate::error::{Error, Result};
use crate::types::NewReading;
use serde::{Deserialize, Serialize};

/// 照合に使われた規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// 正規化後の名称が一致
    Exact,
    /// ベース位置と角度が一致
    Angular,
    /// 文字列類似度
    Fuzzy,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Angular => write!(f, "angular"),
            MatchType::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// 照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchOptions {
    /// 採用する最低信頼度
    pub min_confidence: f64,
    /// 類似度による照合を許可する
    pub allow_fuzzy_match: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.7,
            allow_fuzzy_match: true,
        }
    }
}

impl MatchOptions {
    /// 最低信頼度が 0.0〜1.0 の範囲か確認
    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.min_confidence) {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "minConfidence は 0.0〜1.0 で指定してください: {}",
                self.min_confidence
            )))
        }
    }
}

/// 照合候補（1回の走査内でのみ使用）
#[derive(Debug, Clone, Copy)]
pub(crate) struct MatchCandidate<'a> {
    pub existing_id: &'a str,
    pub existing_label: &'a str,
    pub match_type: MatchType,
    pub confidence: f64,
}

/// 照合できた測定値
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedLocation {
    pub existing_id: String,
    /// 照合先の前回の名称
    pub existing_label: String,
    pub new_reading: NewReading,
    pub confidence: f64,
    pub match_type: MatchType,
}

/// 照合できなかった測定値
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedReading {
    pub reading: NewReading,
    pub reason: String,
}

/// 照合の集計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total_new: usize,
    pub matched_count: usize,
    pub unmatched_count: usize,
    pub match_rate: f64,
    pub exact_count: usize,
    pub angular_count: usize,
    pub fuzzy_count: usize,
}

/// 照合結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched: Vec<MatchedLocation>,
    pub unmatched: Vec<UnmatchedReading>,
    pub summary: MatchSummary,
}
