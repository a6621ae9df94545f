//! JSON/Excel出力の統合テスト

use cml_reconcile::export::{self, excel};
use cml_reconcile_common::{match_locations, ExistingLocation, MatchOptions, MatchResult, NewReading};
use tempfile::tempdir;

fn create_test_result() -> MatchResult {
    let existing: Vec<ExistingLocation> = (1..=3)
        .map(|i| ExistingLocation {
            id: format!("cml-{}", i),
            legacy_label: format!("{}", i),
            ..Default::default()
        })
        .collect();

    let readings: Vec<NewReading> = (1..=5)
        .map(|i| NewReading {
            raw_label: format!("{}", i),
            component_text: "Shell".to_string(),
            thickness_value: 0.5 - i as f64 * 0.01,
            minimum_required: Some(0.375),
            ..Default::default()
        })
        .collect();

    match_locations(&existing, &readings, &MatchOptions::default())
}

#[test]
fn test_json_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("out").join("result.json");

    let result = create_test_result();
    export::write_json(&result, Some(&output_path)).expect("JSON出力失敗");

    let content = std::fs::read_to_string(&output_path).expect("読み込み失敗");
    let json: serde_json::Value = serde_json::from_str(&content).expect("JSON解析失敗");

    assert_eq!(json["summary"]["totalNew"], 5);
    assert_eq!(json["summary"]["matchedCount"], 3);
    assert_eq!(json["matched"][0]["existingId"], "cml-1");
    assert_eq!(json["matched"][0]["matchType"], "exact");
    assert_eq!(json["unmatched"][0]["reading"]["rawLabel"], "4");
}

#[test]
fn test_excel_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report.xlsx");

    let result = excel::write_excel(&create_test_result(), &output_path, "テスト照合レポート");

    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "Excelファイルが作成されていない");

    let metadata = std::fs::metadata(&output_path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "Excelファイルが空");
}

#[test]
fn test_excel_generation_empty_result() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("empty.xlsx");

    let result = excel::write_excel(&MatchResult::default(), &output_path, "空のテスト");

    assert!(result.is_ok(), "空のExcel生成に失敗: {:?}", result.err());
}

#[test]
fn test_report_path_for_directory() {
    let dir = tempdir().expect("Failed to create temp dir");

    let path = export::report_path(dir.path(), "V-101");
    assert_eq!(path, dir.path().join("V-101.xlsx"));

    let file = dir.path().join("custom.xlsx");
    assert_eq!(export::report_path(&file, "V-101"), file);
}
