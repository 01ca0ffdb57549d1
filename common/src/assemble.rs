//! 照合結果の組み立て
//!
//! 行ごとのヒットから結果レコードを作り、結果4列を名前列の直後に挿入した表を作成する。

use crate::columns::CategorySource;
use crate::matcher::{MatchHit, MatchMethod};
use crate::types::{CellValue, Table};
use serde::Serialize;

pub const CATEGORY_COLUMN: &str = "Category";
pub const MATCHED_TO_COLUMN: &str = "MatchedTo";
pub const METHOD_COLUMN: &str = "MatchMethod";
pub const SCORE_COLUMN: &str = "MatchScore";

/// 結果列（この順で挿入）
pub const RESULT_COLUMNS: [&str; 4] = [CATEGORY_COLUMN, MATCHED_TO_COLUMN, METHOD_COLUMN, SCORE_COLUMN];

pub const NOT_FOUND: &str = "Not found";
pub const FOUND: &str = "Found";

/// 1行分の確定した照合結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub category: CellValue,
    pub matched_to: Option<CellValue>,
    pub method: MatchMethod,
    pub score: f64,
}

impl MatchResult {
    /// ヒットから結果を確定（未設定項目はNot found / 0.0）
    ///
    /// 分類列なしの場合、分類は照合先の有無で Found / Not found になる。
    pub fn resolve(hit: Option<&MatchHit<'_>>, category: &CategorySource) -> Self {
        let matched_to = hit.map(|h| h.entry.name.clone());
        let category = match category {
            CategorySource::Column(_) => hit
                .and_then(|h| h.entry.category.clone())
                .unwrap_or_else(|| CellValue::text(NOT_FOUND)),
            CategorySource::None => {
                if matched_to.is_some() {
                    CellValue::text(FOUND)
                } else {
                    CellValue::text(NOT_FOUND)
                }
            }
        };

        Self {
            category,
            matched_to,
            method: hit.map(|h| h.method).unwrap_or(MatchMethod::NotFound),
            score: hit.map(|h| h.score).unwrap_or(0.0),
        }
    }

    fn cells(&self) -> [CellValue; 4] {
        [
            self.category.clone(),
            self.matched_to.clone().unwrap_or_default(),
            CellValue::text(self.method.label()),
            CellValue::Number(self.score),
        ]
    }
}

/// 結果列の挿入位置と残す元の列を求める
///
/// 元の表に結果列と同名の列があれば置き換える。
fn output_layout(headers: &[String], name_col: &str) -> (Vec<usize>, usize) {
    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !RESULT_COLUMNS.contains(&h.as_str()))
        .map(|(i, _)| i)
        .collect();

    let insert_at = kept
        .iter()
        .position(|&i| headers[i] == name_col)
        .map(|p| p + 1)
        .unwrap_or(1)
        .min(kept.len());

    (kept, insert_at)
}

/// 元の表に結果列を挿入した出力表を作成
pub fn assemble_table(subject: &Table, name_col: &str, results: &[MatchResult]) -> Table {
    let (kept, insert_at) = output_layout(&subject.headers, name_col);

    let mut headers: Vec<String> = kept.iter().map(|&i| subject.headers[i].clone()).collect();
    headers.splice(insert_at..insert_at, RESULT_COLUMNS.iter().map(|c| c.to_string()));

    let rows = results
        .iter()
        .enumerate()
        .map(|(row, result)| {
            let mut cells: Vec<CellValue> = kept.iter().map(|&c| subject.cell(row, c).clone()).collect();
            cells.splice(insert_at..insert_at, result.cells());
            cells
        })
        .collect();

    Table { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ReferenceEntry;

    fn entry(category: Option<&str>) -> ReferenceEntry {
        ReferenceEntry {
            key: "john smith".into(),
            name: CellValue::text("John Smith"),
            category: category.map(CellValue::text),
        }
    }

    #[test]
    fn test_resolve_not_found() {
        let result = MatchResult::resolve(None, &CategorySource::Column("Type".into()));
        assert_eq!(result.category, CellValue::text(NOT_FOUND));
        assert_eq!(result.matched_to, None);
        assert_eq!(result.method, MatchMethod::NotFound);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_resolve_with_category() {
        let e = entry(Some("Individual"));
        let hit = MatchHit { entry: &e, method: MatchMethod::Fuzzy, score: 94.5 };
        let result = MatchResult::resolve(Some(&hit), &CategorySource::Column("Type".into()));
        assert_eq!(result.category, CellValue::text("Individual"));
        assert_eq!(result.matched_to, Some(CellValue::text("John Smith")));
        assert_eq!(result.method, MatchMethod::Fuzzy);
        assert_eq!(result.score, 94.5);
    }

    #[test]
    fn test_resolve_existence_mode_overrides_category() {
        let e = entry(Some("Individual"));
        let hit = MatchHit { entry: &e, method: MatchMethod::Exact, score: 100.0 };
        let found = MatchResult::resolve(Some(&hit), &CategorySource::None);
        assert_eq!(found.category, CellValue::text(FOUND));
        let missing = MatchResult::resolve(None, &CategorySource::None);
        assert_eq!(missing.category, CellValue::text(NOT_FOUND));
    }

    #[test]
    fn test_resolve_empty_reference_category() {
        let e = entry(None);
        let hit = MatchHit { entry: &e, method: MatchMethod::Exact, score: 100.0 };
        let result = MatchResult::resolve(Some(&hit), &CategorySource::Column("Type".into()));
        assert_eq!(result.method, MatchMethod::Exact);
        assert_eq!(result.category, CellValue::text(NOT_FOUND));
    }

    #[test]
    fn test_assemble_inserts_after_name_column() {
        let subject = Table::new(
            vec!["ID".into(), "Name of Entity".into(), "Amount".into()],
            vec![vec![CellValue::Number(1.0), "Jon".into(), CellValue::Number(10.0)]],
        );
        let results = vec![MatchResult::resolve(None, &CategorySource::None)];
        let table = assemble_table(&subject, "Name of Entity", &results);

        assert_eq!(
            table.headers,
            vec!["ID", "Name of Entity", "Category", "MatchedTo", "MatchMethod", "MatchScore", "Amount"]
        );
        assert_eq!(table.rows[0][0], CellValue::Number(1.0));
        assert_eq!(table.rows[0][2], CellValue::text(NOT_FOUND));
        assert_eq!(table.rows[0][3], CellValue::Empty);
        assert_eq!(table.rows[0][4], CellValue::text("Not found"));
        assert_eq!(table.rows[0][5], CellValue::Number(0.0));
        assert_eq!(table.rows[0][6], CellValue::Number(10.0));
    }

    #[test]
    fn test_assemble_replaces_existing_result_columns() {
        let subject = Table::new(
            vec!["Category".into(), "Name".into()],
            vec![vec!["old".into(), "Jon".into()]],
        );
        let results = vec![MatchResult::resolve(None, &CategorySource::None)];
        let table = assemble_table(&subject, "Name", &results);

        assert_eq!(table.headers, vec!["Name", "Category", "MatchedTo", "MatchMethod", "MatchScore"]);
        assert_eq!(table.rows[0][1], CellValue::text(NOT_FOUND));
    }

    #[test]
    fn test_assemble_empty_subject() {
        let subject = Table::new(vec!["Name".into()], vec![]);
        let table = assemble_table(&subject, "Name", &[]);
        assert_eq!(table.headers.len(), 5);
        assert!(table.rows.is_empty());
    }
}
