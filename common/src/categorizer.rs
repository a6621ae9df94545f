//! 部位区分の判定
//!
//! 部位の記述テキストからキーワードで区分を判定する。
//! 照合エンジンの信頼度ボーナスと、表示用のグループ分けに使用。

use crate::types::{ComponentCategory, NewReading};
use regex::Regex;
use serde::Serialize;

/// キーワード条件
#[derive(Debug, Clone, Copy)]
pub enum Keywords {
    /// いずれかを含む
    Any(&'static [&'static str]),
    /// すべてを含む
    All(&'static [&'static str]),
}

impl Keywords {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Keywords::Any(words) => words.iter().any(|w| text.contains(w)),
            Keywords::All(words) => words.iter().all(|w| text.contains(w)),
        }
    }
}

/// ノズル判定キーワード
pub const NOZZLE_KEYWORDS: Keywords = Keywords::Any(&[
    "nozzle", "manway", "relief", "vapor", "sight", "gauge", "feed", "inlet", "outlet",
]);

/// ノズル種別の判定表（上から順に評価し、最初に一致したものを採用）
pub const NOZZLE_TYPES: &[(Keywords, &str)] = &[
    (Keywords::Any(&["manway"]), "Manway"),
    (Keywords::Any(&["relief"]), "Relief"),
    (Keywords::Any(&["vapor out", "vapor-out"]), "Vapor Out"),
    (Keywords::Any(&["vapor in", "vapor-in"]), "Vapor In"),
    (Keywords::All(&["sight", "gauge"]), "Sight Gauge"),
    (Keywords::All(&["reactor", "feed"]), "Reactor Feed"),
    (Keywords::Any(&["gauge"]), "Gauge"),
    (Keywords::Any(&["inlet"]), "Inlet"),
    (Keywords::Any(&["outlet", "out"]), "Outlet"),
];

/// 判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    pub category: ComponentCategory,
    /// ノズル径（例: `24"`）
    pub nozzle_size: Option<String>,
    pub nozzle_type: Option<String>,
}

impl Categorization {
    fn simple(category: ComponentCategory) -> Self {
        Self {
            category,
            nozzle_size: None,
            nozzle_type: None,
        }
    }
}

/// 部位テキストを区分に分類する
///
/// 判定順: ノズル → 東鏡板 → 西鏡板 → 鏡板（左右表記）→ 胴 → その他。
/// 方向の手掛かりがない "head" は推測せず Other とする。
pub fn categorize(component_text: &str) -> Categorization {
    let text = component_text.to_lowercase();

    if NOZZLE_KEYWORDS.matches(&text) {
        return Categorization {
            category: ComponentCategory::Nozzle,
            nozzle_size: extract_nozzle_size(&text),
            nozzle_type: detect_nozzle_type(&text).map(str::to_string),
        };
    }

    let head_or_seam = text.contains("head") || text.contains("seam");
    if text.contains("east") && head_or_seam {
        return Categorization::simple(ComponentCategory::EastHead);
    }
    if text.contains("west") && head_or_seam {
        return Categorization::simple(ComponentCategory::WestHead);
    }

    if text.contains("head") && !text.contains("overhead") {
        let category = if text.contains("left") || text.contains("front") {
            ComponentCategory::EastHead
        } else if text.contains("right") || text.contains("rear") {
            ComponentCategory::WestHead
        } else {
            ComponentCategory::Other
        };
        return Categorization::simple(category);
    }

    // "vessel shell" は "shell" に含まれる
    if text.contains("shell") || text.contains("body") {
        return Categorization::simple(ComponentCategory::Shell);
    }

    Categorization::simple(ComponentCategory::Other)
}

/// ノズル径を抽出（`24"`, `3 inch` など）
pub fn extract_nozzle_size(text: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref SIZE_RE: Regex = Regex::new(r#"(?i)(\d+)\s*(?:"|”|inch)"#).unwrap();
    }

    SIZE_RE
        .captures(text)
        .map(|caps| format!("{}\"", &caps[1]))
}

/// ノズル種別を判定
pub fn detect_nozzle_type(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    NOZZLE_TYPES
        .iter()
        .find(|(keywords, _)| keywords.matches(&text))
        .map(|(_, label)| *label)
}

/// 表示用グループ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGroup {
    pub category: ComponentCategory,
    pub name: String,
    pub nozzle_size: Option<String>,
    pub readings: Vec<NewReading>,
}

impl ComponentGroup {
    fn size_inches(&self) -> Option<u32> {
        self.nozzle_size
            .as_deref()
            .and_then(|s| s.trim_end_matches('"').parse().ok())
    }
}

/// 測定値を部位ごとにグループ分けする
///
/// 並び順: 胴 → 東鏡板 → 西鏡板 → ノズル（径の大きい順）→ その他。
/// ノズルは記述ごとに別グループ、それ以外は区分ごとに1グループ。
pub fn group_readings(readings: &[NewReading]) -> Vec<ComponentGroup> {
    let mut groups: Vec<ComponentGroup> = Vec::new();

    for reading in readings {
        let result = categorize(&reading.component_text);
        let key = match result.category {
            ComponentCategory::Nozzle => reading.component_text.trim().to_lowercase(),
            _ => String::new(),
        };

        let existing = groups.iter_mut().find(|g| {
            g.category == result.category
                && (g.category != ComponentCategory::Nozzle || g.name.to_lowercase() == key)
        });

        match existing {
            Some(group) => group.readings.push(reading.clone()),
            None => {
                let name = match result.category {
                    ComponentCategory::Nozzle => reading.component_text.trim().to_string(),
                    category => category.display_name().to_string(),
                };
                groups.push(ComponentGroup {
                    category: result.category,
                    name,
                    nozzle_size: result.nozzle_size,
                    readings: vec![reading.clone()],
                });
            }
        }
    }

    // 安定ソートなので同順位は出現順のまま
    groups.sort_by(|a, b| {
        category_rank(a.category)
            .cmp(&category_rank(b.category))
            .then_with(|| match (a.size_inches(), b.size_inches()) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });

    groups
}

fn category_rank(category: ComponentCategory) -> u8 {
    match category {
        ComponentCategory::Shell => 0,
        ComponentCategory::EastHead => 1,
        ComponentCategory::WestHead => 2,
        ComponentCategory::Nozzle => 3,
        ComponentCategory::Other => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(label: &str, component: &str) -> NewReading {
        NewReading {
            raw_label: label.to_string(),
            component_text: component.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_categorize_nozzle_with_size_and_type() {
        let result = categorize("24\" Manway");
        assert_eq!(result.category, ComponentCategory::Nozzle);
        assert_eq!(result.nozzle_size.as_deref(), Some("24\""));
        assert_eq!(result.nozzle_type.as_deref(), Some("Manway"));

        let result = categorize("3 inch Relief Valve Nozzle");
        assert_eq!(result.nozzle_size.as_deref(), Some("3\""));
        assert_eq!(result.nozzle_type.as_deref(), Some("Relief"));
    }

    #[test]
    fn test_categorize_nozzle_without_type() {
        let result = categorize("Nozzle N3");
        assert_eq!(result.category, ComponentCategory::Nozzle);
        assert_eq!(result.nozzle_size, None);
        assert_eq!(result.nozzle_type, None);
    }

    #[test]
    fn test_nozzle_type_precedence() {
        assert_eq!(detect_nozzle_type("vapor outlet"), Some("Vapor Out"));
        assert_eq!(detect_nozzle_type("Vapor-In nozzle"), Some("Vapor In"));
        assert_eq!(detect_nozzle_type("sight gauge"), Some("Sight Gauge"));
        assert_eq!(detect_nozzle_type("level gauge"), Some("Gauge"));
        assert_eq!(detect_nozzle_type("reactor feed"), Some("Reactor Feed"));
        assert_eq!(detect_nozzle_type("feed inlet"), Some("Inlet"));
        assert_eq!(detect_nozzle_type("bottom outlet"), Some("Outlet"));
        assert_eq!(detect_nozzle_type("manway relief"), Some("Manway"));
    }

    #[test]
    fn test_nozzle_wins_over_head() {
        let result = categorize("East Head Inlet Nozzle");
        assert_eq!(result.category, ComponentCategory::Nozzle);
    }

    #[test]
    fn test_categorize_heads() {
        assert_eq!(categorize("East Head").category, ComponentCategory::EastHead);
        assert_eq!(categorize("EAST SEAM").category, ComponentCategory::EastHead);
        assert_eq!(categorize("West Head 6 O'Clock").category, ComponentCategory::WestHead);
        assert_eq!(categorize("Left Head").category, ComponentCategory::EastHead);
        assert_eq!(categorize("Front head").category, ComponentCategory::EastHead);
        assert_eq!(categorize("Right Head").category, ComponentCategory::WestHead);
        assert_eq!(categorize("rear head").category, ComponentCategory::WestHead);
    }

    #[test]
    fn test_ambiguous_head_is_other() {
        assert_eq!(categorize("Head").category, ComponentCategory::Other);
        assert_eq!(categorize("Elliptical head 2:1").category, ComponentCategory::Other);
    }

    #[test]
    fn test_overhead_is_not_a_head() {
        assert_eq!(categorize("Overhead shell").category, ComponentCategory::Shell);
        assert_eq!(categorize("Overhead line").category, ComponentCategory::Other);
    }

    #[test]
    fn test_categorize_shell() {
        assert_eq!(categorize("Shell").category, ComponentCategory::Shell);
        assert_eq!(categorize("Vessel Shell Course 2").category, ComponentCategory::Shell);
        assert_eq!(categorize("Body").category, ComponentCategory::Shell);
        assert_eq!(categorize("").category, ComponentCategory::Other);
        assert_eq!(categorize("Unknown").category, ComponentCategory::Other);
    }

    #[test]
    fn test_group_readings_order() {
        let readings = vec![
            reading("1", "Unknown"),
            reading("N2", "2\" Drain Outlet"),
            reading("7", "West Head"),
            reading("N1", "24\" Manway"),
            reading("2", "Shell"),
            reading("N3", "Nozzle N3"),
            reading("4", "East Head"),
            reading("3", "Vessel Shell"),
        ];

        let groups = group_readings(&readings);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Shell", "East Head", "West Head", "24\" Manway", "2\" Drain Outlet", "Nozzle N3", "Other"]
        );

        let shell = &groups[0];
        assert_eq!(shell.readings.len(), 2);
        assert_eq!(shell.readings[0].raw_label, "2");
        assert_eq!(shell.readings[1].raw_label, "3");
    }

    #[test]
    fn test_group_readings_same_nozzle_merged() {
        let readings = vec![
            reading("N1-0", "24\" Manway"),
            reading("N1-90", "24\" manway "),
        ];

        let groups = group_readings(&readings);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].readings.len(), 2);
    }

    #[test]
    fn test_group_readings_empty() {
        assert!(group_readings(&[]).is_empty());
    }
}
