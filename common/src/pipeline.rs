//! 照合パイプライン
//!
//! 正規化 → 参照インデックス → 完全一致 → あいまい一致 → 組み立て → 集計 を1回実行する。

use crate::assemble::{assemble_table, MatchResult};
use crate::columns::ColumnSelection;
use crate::error::{Error, Result};
use crate::index::ReferenceIndex;
use crate::matcher::match_keys;
use crate::normalizer::normalize_cell;
use crate::options::MatchOptions;
use crate::summary::MatchSummary;
use crate::types::Table;

/// パイプラインの出力
#[derive(Debug, Clone)]
pub struct MatchOutput {
    /// 結果列を挿入した出力表
    pub table: Table,
    /// 行ごとの照合結果（元の行順）
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
}

/// 照合を実行する
pub fn run_matching(
    subject: &Table,
    reference: &Table,
    selection: &ColumnSelection,
    options: &MatchOptions,
) -> Result<MatchOutput> {
    options.validate()?;

    let name_values = subject
        .column_values(&selection.subject_name)
        .ok_or_else(|| Error::UnknownColumn {
            dataset: "subject".to_string(),
            column: selection.subject_name.clone(),
            available: subject.headers.clone(),
        })?;
    let keys: Vec<String> = name_values.into_iter().map(normalize_cell).collect();

    let index = ReferenceIndex::build(
        reference,
        &selection.reference_name,
        &selection.reference_category,
    )?;

    let hits = match_keys(&keys, &index, options);
    let results: Vec<MatchResult> = hits
        .iter()
        .map(|hit| MatchResult::resolve(hit.as_ref(), &selection.reference_category))
        .collect();

    let table = assemble_table(subject, &selection.subject_name, &results);
    let summary = MatchSummary::from_table(&table);

    tracing::info!(
        total = summary.total,
        exact = summary.exact,
        fuzzy = summary.fuzzy,
        not_found = summary.not_found,
        "照合完了"
    );

    Ok(MatchOutput {
        table,
        results,
        summary,
    })
}
