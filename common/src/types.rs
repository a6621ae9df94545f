//! 照合エンジンの入力型定義
//!
//! - ExistingLocation: 過去の検査で登録済みのモニタリング位置
//! - NewReading: 今回取り込んだレポートから抽出した測定値
//! - ComponentCategory: 部位区分（胴・東鏡板・西鏡板・ノズル・その他）

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// 部位区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Shell,
    EastHead,
    WestHead,
    Nozzle,
    #[default]
    Other,
}

impl ComponentCategory {
    /// snake_case名から変換（未知の値は Other）
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "shell" => ComponentCategory::Shell,
            "east_head" => ComponentCategory::EastHead,
            "west_head" => ComponentCategory::WestHead,
            "nozzle" => ComponentCategory::Nozzle,
            _ => ComponentCategory::Other,
        }
    }

    /// 表示用の名称
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentCategory::Shell => "Shell",
            ComponentCategory::EastHead => "East Head",
            ComponentCategory::WestHead => "West Head",
            ComponentCategory::Nozzle => "Nozzle",
            ComponentCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// 保存済みの区分は古い表記のこともあるため、読めない値は Other に落とす
impl<'de> Deserialize<'de> for ComponentCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|s| Self::from_name(&s)).unwrap_or_default())
    }
}

/// 登録済みモニタリング位置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingLocation {
    pub id: String,

    /// 前回記録時のCML番号・名称
    #[serde(default)]
    pub legacy_label: String,

    #[serde(default)]
    pub component_category: ComponentCategory,

    /// 角度位置（度）
    #[serde(default, deserialize_with = "lenient_angle")]
    pub angular_position: Option<u32>,
}

/// 取り込み中の測定値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    #[serde(default)]
    pub raw_label: String,

    /// 部位の記述（例: "East Head", "24\" Manway"）
    #[serde(default)]
    pub component_text: String,

    #[serde(default, deserialize_with = "lenient_angle")]
    pub angular_position: Option<u32>,

    #[serde(default)]
    pub thickness_value: f64,

    #[serde(default)]
    pub minimum_required: Option<f64>,
}

/// 既存位置のJSON配列を読み込む
pub fn parse_existing(json: &str) -> Result<Vec<ExistingLocation>> {
    Ok(serde_json::from_str(json)?)
}

/// 測定値のJSON配列を読み込む
pub fn parse_readings(json: &str) -> Result<Vec<NewReading>> {
    Ok(serde_json::from_str(json)?)
}

/// 角度の値を寛容に解釈する
///
/// 数値・数値文字列（`45.0` のような整数値を含む）は角度として扱い、
/// それ以外（負数、端数のある小数、文字列、null）は
/// 角度なしとする。デシリアライズ自体は失敗させない。
fn lenient_angle<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<u32>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(angle_from_value))
}

fn angle_from_value(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n.as_f64().and_then(integral_angle),
        },
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_angle))
        }
        _ => None,
    }
}

/// `45.0` のような整数値の浮動小数点のみ受け付ける
fn integral_angle(v: f64) -> Option<u32> {
    (v.is_finite() && v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v)).then(|| v as u32)
}
