//! 位置名称の類似度
//!
//! 正規化後の名称を比較し、0.0〜1.0 の信頼度を返す。

use crate::normalizer::normalize;

/// 2つの位置名称の類似度を計算
///
/// 1. 正規化後に一致 → 1.0
/// 2. 一方が他方を含む → 短い方の長さ / 長い方の長さ
/// 3. それ以外 → 1 - 編集距離 / 長い方の長さ
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (shorter, longer, short_len, long_len) = if a_len <= b_len {
        (&a, &b, a_len, b_len)
    } else {
        (&b, &a, b_len, a_len)
    };

    if longer.contains(shorter.as_str()) {
        return short_len as f64 / long_len as f64;
    }

    let distance = strsim::levenshtein(&a, &b);
    1.0 - (distance as f64 / long_len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_similarity_identical() {
        assert!(approx(similarity("N1", "N1"), 1.0));
        assert!(approx(similarity("East Head 12 O'Clock", "east head 12 oclock"), 1.0));
        assert!(approx(similarity("", ""), 1.0));
        assert!(approx(similarity("  ", ""), 1.0));
    }

    #[test]
    fn test_similarity_substring() {
        // "n1" は "n12" に含まれる
        assert!(approx(similarity("N1", "N12"), 2.0 / 3.0));
        assert!(approx(similarity("shell 7", "7"), 1.0 / 7.0));
        assert!(approx(similarity("", "abc"), 0.0));
    }

    #[test]
    fn test_similarity_edit_distance() {
        // kitten → sitting: 距離3、長さ7
        assert!(approx(similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
        assert!(approx(similarity("cml-12", "cml-13"), 1.0 - 1.0 / 6.0));
    }

    #[test]
    fn test_similarity_transposition_costs_two() {
        // 隣接入れ替えは置換2回として数える
        assert!(approx(similarity("ab", "ba"), 0.0));
    }

    #[test]
    fn test_similarity_symmetric() {
        let pairs = [("N1", "N12"), ("kitten", "sitting"), ("East Head", "West Head")];
        for (a, b) in pairs {
            assert!(approx(similarity(a, b), similarity(b, a)));
        }
    }
}
