use crate::error::{NameMatchError, Result};
use name_match_common::CellValue;
use std::path::Path;

/// CSVのヘッダー行とデータ行を読み込む（値は文字列のまま保持）
pub fn read_rows(path: &Path) -> Result<(Vec<String>, Vec<Vec<CellValue>>)> {
    let unreadable = |e: csv::Error| NameMatchError::UnreadableDataset(format!("{}: {}", path.display(), e));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(unreadable)?;
        rows.push(
            record
                .iter()
                .map(|v| if v.is_empty() { CellValue::Empty } else { CellValue::text(v) })
                .collect(),
        );
    }

    Ok((headers, rows))
}
