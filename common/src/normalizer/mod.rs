//! CML名称の正規化
//!
//! 表記揺れのある位置名称を比較可能な形に揃える。
//!
//! ## 処理順
//! 1. 前後空白除去・小文字化
//! 2. アポストロフィ・引用符の統一
//! 3. ft / feet → `'`
//! 4. in / inch / inches → `"`
//! 5. o'clock 系の表記 → `oclock`
//! 6. 連続空白を1つに

pub mod location_key;

use regex::Regex;

/// 位置名称を正規化する
///
/// 純粋関数で失敗しない。空白のみの入力は空文字になる。
/// 何度適用しても結果は変わらない。
pub fn normalize(label: &str) -> String {
    lazy_static::lazy_static! {
        // 数値に続く単位のみ置換（"left" や "inlet" は対象外）
        static ref FEET_RE: Regex = Regex::new(r"(\d)\s*(?:feet|ft)\b").unwrap();
        static ref INCH_RE: Regex = Regex::new(r"(\d)\s*(?:inches|inch|in)\b").unwrap();
        // 単語の途中（"two clock" など）は対象外。"12o'clock" のような数字直後は置換する
        static ref OCLOCK_RE: Regex = Regex::new(r"(^|[^a-z])o\s*'?\s*clock\b").unwrap();
        static ref SPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let mut result: String = label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '’' | '‘' | '`' | '′' => '\'',
            '“' | '”' | '″' => '"',
            _ => c,
        })
        .collect();

    result = FEET_RE.replace_all(&result, "$1'").to_string();
    result = INCH_RE.replace_all(&result, "$1\"").to_string();
    result = OCLOCK_RE.replace_all(&result, "${1}oclock").to_string();
    result = SPACE_RE.replace_all(&result, " ").to_string();

    result.trim().to_string()
}
