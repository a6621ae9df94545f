//! CML照合エンジン
//!
//! 新しい測定値を入力順に処理し、未使用の既存位置から最良の候補を1つ選ぶ。
//! 一度割り当てた既存位置は以降の測定値では候補にしない（貪欲法）。
//!
//! ## 規則
//! - exact: 正規化後の名称が一致（双方に角度がある場合は角度も一致）。信頼度 1.0、即確定
//! - angular: ベース位置が一致し、双方の角度が一致。信頼度 0.95
//! - fuzzy: 名称の類似度。部位区分が一致すれば 1.1 倍（上限 1.0、Other 同士は対象外）
//!
//! angular と fuzzy は両方評価し、信頼度の高い方を残す。

mod types;

pub use types::{MatchOptions, MatchResult, MatchSummary, MatchType, MatchedLocation, UnmatchedReading};

use crate::categorizer::categorize;
use crate::normalizer::location_key::{extract_angular_position, extract_base_location};
use crate::normalizer::normalize;
use crate::similarity::similarity;
use crate::types::{ComponentCategory, ExistingLocation, NewReading};
use std::collections::HashSet;
use types::MatchCandidate;

const EXACT_CONFIDENCE: f64 = 1.0;
const ANGULAR_CONFIDENCE: f64 = 0.95;
const COMPONENT_BONUS: f64 = 1.1;

pub const NO_MATCH_REASON: &str = "No matching location found";

/// 照合用に前処理した位置キー
struct LocationKey {
    label: String,
    base: String,
    angle: Option<u32>,
}

impl LocationKey {
    fn new(label: &str, explicit_angle: Option<u32>) -> Self {
        let label = normalize(label);
        let base = extract_base_location(&label);
        let angle = explicit_angle.or_else(|| extract_angular_position(&label));
        Self { label, base, angle }
    }
}

/// 既存位置と測定値を照合する
///
/// 常に完全な結果を返す。照合できない測定値は `unmatched` に理由付きで入る。
/// 呼び出しごとに独立しており、状態は持ち越さない。
pub fn match_locations(
    existing: &[ExistingLocation],
    new_readings: &[NewReading],
    options: &MatchOptions,
) -> MatchResult {
    let keys: Vec<LocationKey> = existing
        .iter()
        .map(|loc| LocationKey::new(&loc.legacy_label, loc.angular_position))
        .collect();

    let mut consumed: HashSet<&str> = HashSet::new();
    let mut result = MatchResult::default();

    for reading in new_readings {
        let best = find_best_candidate(reading, existing, &keys, &consumed, options);

        match best {
            Some(candidate) if candidate.confidence >= options.min_confidence => {
                log::debug!(
                    "照合: {} → {} ({}, {:.2})",
                    reading.raw_label, candidate.existing_id, candidate.match_type, candidate.confidence
                );
                consumed.insert(candidate.existing_id);
                result.matched.push(MatchedLocation {
                    existing_id: candidate.existing_id.to_string(),
                    existing_label: candidate.existing_label.to_string(),
                    new_reading: reading.clone(),
                    confidence: candidate.confidence,
                    match_type: candidate.match_type,
                });
            }
            near_miss => {
                let reason = match near_miss {
                    Some(candidate) => format!(
                        "Best match confidence {:.2} below threshold {:.2}",
                        candidate.confidence, options.min_confidence
                    ),
                    None => NO_MATCH_REASON.to_string(),
                };
                log::debug!("未照合: {} ({})", reading.raw_label, reason);
                result.unmatched.push(UnmatchedReading {
                    reading: reading.clone(),
                    reason,
                });
            }
        }
    }

    result.summary = summarize(&result, new_readings.len());
    log::info!(
        "照合完了: {}/{}件 (exact {}, angular {}, fuzzy {})",
        result.summary.matched_count,
        result.summary.total_new,
        result.summary.exact_count,
        result.summary.angular_count,
        result.summary.fuzzy_count
    );

    result
}

/// 未使用の既存位置から最良の候補を探す
///
/// 同点の場合は先に見つかった候補を残す。
fn find_best_candidate<'a>(
    reading: &NewReading,
    existing: &'a [ExistingLocation],
    keys: &[LocationKey],
    consumed: &HashSet<&str>,
    options: &MatchOptions,
) -> Option<MatchCandidate<'a>> {
    let key = LocationKey::new(&reading.raw_label, reading.angular_position);
    let category = categorize(&reading.component_text).category;
    let mut best: Option<MatchCandidate<'a>> = None;

    for (loc, loc_key) in existing.iter().zip(keys) {
        if consumed.contains(loc.id.as_str()) {
            continue;
        }

        let candidate = move |match_type, confidence| MatchCandidate {
            existing_id: loc.id.as_str(),
            existing_label: loc.legacy_label.as_str(),
            match_type,
            confidence,
        };

        if key.label == loc_key.label && angles_compatible(key.angle, loc_key.angle) {
            best = Some(candidate(MatchType::Exact, EXACT_CONFIDENCE));
            break;
        }

        let angular = (key.base == loc_key.base && key.angle.is_some() && key.angle == loc_key.angle)
            .then(|| candidate(MatchType::Angular, ANGULAR_CONFIDENCE));
        keep_better(&mut best, angular);

        if options.allow_fuzzy_match {
            let score = fuzzy_score(reading, category, loc);
            let fuzzy = (score >= options.min_confidence).then(|| candidate(MatchType::Fuzzy, score));
            keep_better(&mut best, fuzzy);
        }
    }

    best
}

/// 信頼度が真に高い場合のみ置き換える
fn keep_better<'a>(best: &mut Option<MatchCandidate<'a>>, candidate: Option<MatchCandidate<'a>>) {
    if let Some(c) = candidate {
        if best.map_or(true, |b| c.confidence > b.confidence) {
            *best = Some(c);
        }
    }
}

/// 双方に角度がある場合のみ一致を要求する
fn angles_compatible(a: Option<u32>, b: Option<u32>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        _ => true,
    }
}

/// 区分が判定できない（Other）場合はボーナスなし
fn fuzzy_score(reading: &NewReading, category: ComponentCategory, loc: &ExistingLocation) -> f64 {
    let score = similarity(&reading.raw_label, &loc.legacy_label);
    if category != ComponentCategory::Other && category == loc.component_category {
        (score * COMPONENT_BONUS).min(1.0)
    } else {
        score
    }
}

fn summarize(result: &MatchResult, total_new: usize) -> MatchSummary {
    let count = |t: MatchType| result.matched.iter().filter(|m| m.match_type == t).count();
    let matched_count = result.matched.len();

    MatchSummary {
        total_new,
        matched_count,
        unmatched_count: result.unmatched.len(),
        match_rate: if total_new == 0 {
            0.0
        } else {
            matched_count as f64 / total_new as f64
        },
        exact_count: count(MatchType::Exact),
        angular_count: count(MatchType::Angular),
        fuzzy_count: count(MatchType::Fuzzy),
    }
}
