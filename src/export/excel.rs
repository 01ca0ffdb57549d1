//! Excel出力
//!
//! 照合結果の表を "Matched" シート1枚のxlsxとして書き出す。

use crate::error::{NameMatchError, Result};
use name_match_common::{CellValue, Table};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

/// 出力シート名
pub const SHEET_NAME: &str = "Matched";

const MAX_COLUMNS: usize = 16_384;

fn excel_err(context: &str) -> impl Fn(XlsxError) -> NameMatchError + '_ {
    move |e| NameMatchError::ExcelGeneration(format!("{}: {}", context, e))
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<()> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            worksheet
                .write_string(row, col, s)
                .map_err(excel_err("セル書き込みエラー"))?;
        }
        CellValue::Number(n) => {
            worksheet
                .write_number(row, col, *n)
                .map_err(excel_err("セル書き込みエラー"))?;
        }
        CellValue::Bool(b) => {
            worksheet
                .write_boolean(row, col, *b)
                .map_err(excel_err("セル書き込みエラー"))?;
        }
    }
    Ok(())
}

/// Workbookを組み立てる
fn build_workbook(table: &Table) -> Result<Workbook> {
    if table.headers.len() > MAX_COLUMNS {
        return Err(NameMatchError::ExcelGeneration(format!(
            "列数が上限を超えています: {}",
            table.headers.len()
        )));
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(excel_err("シート名設定エラー"))?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(excel_err("ヘッダー書き込みエラー"))?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let excel_row = u32::try_from(r + 1)
            .map_err(|_| NameMatchError::ExcelGeneration("行数が上限を超えています".into()))?;
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, excel_row, col as u16, value)?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(excel_err("ウィンドウ枠固定エラー"))?;
    worksheet.autofit();

    Ok(workbook)
}

/// 照合結果をxlsxファイルに保存
pub fn write_matched_workbook(table: &Table, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let bytes = matched_workbook_bytes(table)?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}

/// 照合結果をxlsxバイト列として生成
pub fn matched_workbook_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    workbook
        .save_to_buffer()
        .map_err(excel_err("Excel保存エラー"))
}
