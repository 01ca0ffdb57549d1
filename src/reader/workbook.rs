use crate::error::{NameMatchError, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader, Sheets};
use chrono::Timelike;
use name_match_common::CellValue;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn open(path: &Path) -> Result<Sheets<BufReader<File>>> {
    open_workbook_auto(path).map_err(|e| {
        NameMatchError::UnreadableDataset(format!("{}: {}", path.display(), e))
    })
}

pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook = open(path)?;
    Ok(workbook.sheet_names().to_vec())
}

/// calamineのセルを変換
fn convert(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => convert_datetime(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// 日付はISO形式の文字列に、期間や範囲外の値はシリアル値のまま
fn convert_datetime(dt: &ExcelDateTime) -> CellValue {
    if dt.is_duration() {
        return CellValue::Number(dt.as_f64());
    }
    match dt.as_datetime() {
        Some(value) if value.num_seconds_from_midnight() == 0 => {
            CellValue::Text(value.format("%Y-%m-%d").to_string())
        }
        Some(value) => CellValue::Text(value.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => CellValue::Number(dt.as_f64()),
    }
}

/// ヘッダー行とデータ行を読み込む
pub fn read_rows(path: &Path, sheet: Option<&str>) -> Result<(Vec<String>, Vec<Vec<CellValue>>)> {
    let mut workbook = open(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();

    let sheet_name = match sheet {
        Some(s) if names.iter().any(|n| n == s) => s.to_string(),
        Some(s) => {
            return Err(NameMatchError::UnreadableDataset(format!(
                "シートが見つかりません: {}（利用可能: {}）",
                s,
                names.join(", ")
            )))
        }
        None => names.first().cloned().ok_or_else(|| {
            NameMatchError::UnreadableDataset(format!("シートがありません: {}", path.display()))
        })?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        NameMatchError::UnreadableDataset(format!("{} [{}]: {}", path.display(), sheet_name, e))
    })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| c.to_string()).collect(),
        None => Vec::new(),
    };
    let data: Vec<Vec<CellValue>> = rows.map(|r| r.iter().map(convert).collect()).collect();

    Ok((headers, data))
}
