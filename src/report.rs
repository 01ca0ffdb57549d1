//! 照合結果のコンソール表示
//!
//! 集計・プレビュー・未照合サンプルを表示する。

use name_match_common::assemble::METHOD_COLUMN;
use name_match_common::{MatchMethod, MatchSummary, Table};

/// 未照合サンプルの表示件数
pub const UNMATCHED_SAMPLE_SIZE: usize = 20;

/// 集計の表示行
pub fn summary_lines(summary: &MatchSummary) -> Vec<String> {
    vec![
        format!("  総行数:   {}", summary.total),
        format!("  照合済み: {}", summary.matched()),
        format!("  Exact:    {}", summary.exact),
        format!("  Fuzzy:    {}", summary.fuzzy),
        format!("  Not found: {}", summary.not_found),
    ]
}

/// 先頭n行のプレビュー（タブ区切り、ヘッダー行を含む）
pub fn preview_lines(table: &Table, limit: usize) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(limit.min(table.len()) + 1);
    lines.push(table.headers.join("\t"));
    for row in table.rows.iter().take(limit) {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        lines.push(cells.join("\t"));
    }
    lines
}

/// MatchMethod が Not found の行の名前（先頭limit件）
pub fn unmatched_sample(table: &Table, name_col: &str, limit: usize) -> Vec<String> {
    let (Some(methods), Some(names)) = (table.column_values(METHOD_COLUMN), table.column_values(name_col))
    else {
        return Vec::new();
    };

    methods
        .iter()
        .zip(names)
        .filter(|(m, _)| m.as_text().as_deref() == Some(MatchMethod::NotFound.label()))
        .map(|(_, name)| name.to_string())
        .take(limit)
        .collect()
}

pub fn print_summary(summary: &MatchSummary) {
    println!("照合結果:");
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

pub fn print_preview(table: &Table, limit: usize) {
    let lines = preview_lines(table, limit);
    if lines.is_empty() {
        return;
    }
    println!("\nプレビュー（先頭{}行）:", limit.min(table.len()));
    for line in lines {
        println!("  {}", line);
    }
}

pub fn print_unmatched_sample(table: &Table, name_col: &str) {
    let sample = unmatched_sample(table, name_col, UNMATCHED_SAMPLE_SIZE);
    if sample.is_empty() {
        return;
    }
    println!("\n未照合サンプル（先頭{}件）:", sample.len());
    for name in sample {
        println!("  - {}", name);
    }
}
