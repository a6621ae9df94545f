//! 位置キーの分解
//!
//! `"10-45"` のような「スライス-角度」形式をベース位置と角度に分ける。

use regex::Regex;

lazy_static::lazy_static! {
    static ref SLICE_ANGLE_RE: Regex = Regex::new(r"^(\d+)-(\d+)$").unwrap();
}

/// ベース位置を取得
///
/// スライス-角度形式ならスライス部分、それ以外は入力をそのまま返す。
pub fn extract_base_location(label: &str) -> String {
    SLICE_ANGLE_RE
        .captures(label)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| label.to_string())
}

/// 角度位置を取得
///
/// スライス-角度形式でない場合、または数値として読めない場合は None。
pub fn extract_angular_position(label: &str) -> Option<u32> {
    SLICE_ANGLE_RE
        .captures(label)
        .and_then(|caps| caps[2].parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base_location() {
        assert_eq!(extract_base_location("10-45"), "10");
        assert_eq!(extract_base_location("7"), "7");
        assert_eq!(extract_base_location("east head 12 oclock"), "east head 12 oclock");
        assert_eq!(extract_base_location("n1-a"), "n1-a");
        assert_eq!(extract_base_location("10-45-90"), "10-45-90");
    }

    #[test]
    fn test_extract_angular_position() {
        assert_eq!(extract_angular_position("10-45"), Some(45));
        assert_eq!(extract_angular_position("3-0"), Some(0));
        assert_eq!(extract_angular_position("10"), None);
        assert_eq!(extract_angular_position("10 - 45"), None);
    }

    #[test]
    fn test_extract_angular_position_overflow() {
        assert_eq!(extract_angular_position("1-99999999999999"), None);
        assert_eq!(extract_base_location("1-99999999999999"), "1");
    }
}
