//! 表データ読み込みモジュール
//!
//! - xlsx/xlsm/xlsb/xls/ods: calamine
//! - csv: csv crate
//!
//! 1行目をヘッダーとして扱い、ヘッダーは整形・重複解消する。

mod csv_file;
mod workbook;

use crate::error::{NameMatchError, Result};
use name_match_common::{clean_header, CellValue, Table};
use std::collections::HashSet;
use std::path::Path;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(NameMatchError::InputUnavailable(path.display().to_string()));
    }
    Ok(())
}

/// シート名の一覧（CSVはファイル名のみ）
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    ensure_exists(path)?;
    if is_csv(path) {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "csv".to_string());
        return Ok(vec![name]);
    }
    workbook::sheet_names(path)
}

/// 表を読み込む（シート省略時は先頭シート）
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    ensure_exists(path)?;
    let (raw_headers, rows) = if is_csv(path) {
        if let Some(sheet) = sheet {
            tracing::debug!(sheet, "CSVではシート指定を無視");
        }
        csv_file::read_rows(path)?
    } else {
        workbook::read_rows(path, sheet)?
    };

    let table = Table::new(unique_headers(&widen_headers(raw_headers, &rows)), rows);
    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "表を読み込み"
    );
    Ok(table)
}

/// ヘッダーより長い行があれば空ヘッダーを足す（"Unnamed: n" になる）
pub(crate) fn widen_headers(mut headers: Vec<String>, rows: &[Vec<CellValue>]) -> Vec<String> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width > headers.len() {
        tracing::warn!(
            headers = headers.len(),
            width,
            "ヘッダーより列の多い行があるため列を追加"
        );
        headers.resize(width, String::new());
    }
    headers
}

/// ヘッダーの整形（空ヘッダーは "Unnamed: n"、重複は ".1", ".2" を付与）
pub(crate) fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    raw.iter()
        .enumerate()
        .map(|(i, h)| {
            let cleaned = clean_header(h);
            let base = if cleaned.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                cleaned
            };

            let mut name = base.clone();
            let mut n = 1;
            while seen.contains(&name) {
                name = format!("{}.{}", base, n);
                n += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}
