//! 照合レポートのExcel生成（共通ライブラリ）
//!
//! サマリー・照合結果・未照合の3シートを作成する

use crate::matcher::MatchResult;
use crate::types::NewReading;
use rust_xlsxwriter::*;

const MATCHED_HEADERS: &[(&str, f64)] = &[
    ("既存ID", 12.0),
    ("前回CML", 24.0),
    ("今回CML", 24.0),
    ("部位", 24.0),
    ("角度", 8.0),
    ("肉厚", 10.0),
    ("必要最小肉厚", 14.0),
    ("照合種別", 10.0),
    ("信頼度", 10.0),
];

const UNMATCHED_HEADERS: &[(&str, f64)] = &[
    ("今回CML", 24.0),
    ("部位", 24.0),
    ("角度", 8.0),
    ("肉厚", 10.0),
    ("必要最小肉厚", 14.0),
    ("理由", 48.0),
];

/// 照合レポートをバッファに生成
///
/// # Arguments
/// * `result` - 照合結果
/// * `title` - サマリーシートの見出し
pub fn generate_report_buffer(result: &MatchResult, title: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let percent_format = Format::new().set_num_format("0.0%");
    let decimal_format = Format::new().set_num_format("0.000");

    // サマリー
    {
        let summary = &result.summary;
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("サマリー")
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        worksheet.set_column_width(0, 18.0)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;

        worksheet.write_string_with_format(0, 0, title, &title_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;

        let rows: [(&str, usize); 6] = [
            ("測定値件数", summary.total_new),
            ("照合件数", summary.matched_count),
            ("未照合件数", summary.unmatched_count),
            ("exact", summary.exact_count),
            ("angular", summary.angular_count),
            ("fuzzy", summary.fuzzy_count),
        ];
        for (i, (label, value)) in rows.iter().enumerate() {
            let row = 2 + i as u32;
            worksheet.write_string_with_format(row, 0, *label, &header_format)
                .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;
            worksheet.write_number(row, 1, *value as f64)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        let rate_row = 2 + rows.len() as u32;
        worksheet.write_string_with_format(rate_row, 0, "照合率", &header_format)
            .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;
        worksheet.write_number_with_format(rate_row, 1, summary.match_rate, &percent_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    // 照合結果
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("照合結果")
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        write_headers(worksheet, MATCHED_HEADERS, &header_format)?;

        for (i, m) in result.matched.iter().enumerate() {
            let row = 1 + i as u32;
            worksheet.write_string(row, 0, &m.existing_id)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet.write_string(row, 1, &m.existing_label)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            write_reading(worksheet, row, 2, &m.new_reading, &decimal_format)?;
            worksheet.write_string(row, 7, m.match_type.to_string())
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet.write_number_with_format(row, 8, m.confidence, &percent_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    // 未照合
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("未照合")
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        write_headers(worksheet, UNMATCHED_HEADERS, &header_format)?;

        for (i, u) in result.unmatched.iter().enumerate() {
            let row = 1 + i as u32;
            write_reading(worksheet, row, 0, &u.reading, &decimal_format)?;
            worksheet.write_string(row, 5, &u.reason)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_headers(
    worksheet: &mut Worksheet,
    headers: &[(&str, f64)],
    format: &Format,
) -> Result<(), String> {
    for (col, (label, width)) in headers.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.write_string_with_format(0, col, *label, format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    Ok(())
}

/// 測定値を5列（CML・部位・角度・肉厚・必要最小肉厚）に書き込む
fn write_reading(
    worksheet: &mut Worksheet,
    row: u32,
    first_col: u16,
    reading: &NewReading,
    decimal_format: &Format,
) -> Result<(), String> {
    worksheet.write_string(row, first_col, &reading.raw_label)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;
    worksheet.write_string(row, first_col + 1, &reading.component_text)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;
    if let Some(angle) = reading.angular_position {
        worksheet.write_number(row, first_col + 2, angle as f64)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }
    worksheet.write_number_with_format(row, first_col + 3, reading.thickness_value, decimal_format)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;
    if let Some(minimum) = reading.minimum_required {
        worksheet.write_number_with_format(row, first_col + 4, minimum, decimal_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{match_locations, MatchOptions};
    use crate::types::ExistingLocation;

    #[test]
    fn test_generate_report_buffer() {
        let existing = vec![ExistingLocation {
            id: "4".to_string(),
            legacy_label: "East Head 12 O'Clock".to_string(),
            ..Default::default()
        }];
        let readings = vec![
            NewReading {
                raw_label: "East Head 12 O'Clock".to_string(),
                thickness_value: 0.512,
                minimum_required: Some(0.375),
                ..Default::default()
            },
            NewReading {
                raw_label: "N9".to_string(),
                angular_position: Some(90),
                thickness_value: 0.25,
                ..Default::default()
            },
        ];
        let result = match_locations(&existing, &readings, &MatchOptions::default());

        let buffer = generate_report_buffer(&result, "V-101 照合レポート").expect("Excel生成失敗");
        // xlsx は zip 形式
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_report_buffer_empty() {
        let buffer = generate_report_buffer(&MatchResult::default(), "empty").expect("Excel生成失敗");
        assert!(!buffer.is_empty());
    }
}
