//! 照合結果の集計

use crate::assemble::METHOD_COLUMN;
use crate::matcher::MatchMethod;
use crate::types::Table;
use serde::Serialize;

/// 照合方法ごとの件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub exact: usize,
    pub fuzzy: usize,
    pub not_found: usize,
}

impl MatchSummary {
    /// 出力表の MatchMethod 列から集計
    pub fn from_table(table: &Table) -> Self {
        let mut summary = Self {
            total: table.len(),
            ..Default::default()
        };

        let Some(methods) = table.column_values(METHOD_COLUMN) else {
            return summary;
        };
        for value in methods {
            match value.as_text().as_deref() {
                Some(m) if m == MatchMethod::Exact.label() => summary.exact += 1,
                Some(m) if m == MatchMethod::Fuzzy.label() => summary.fuzzy += 1,
                Some(m) if m == MatchMethod::NotFound.label() => summary.not_found += 1,
                _ => {}
            }
        }
        summary
    }

    /// 照合できた件数
    pub fn matched(&self) -> usize {
        self.exact + self.fuzzy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn test_from_table() {
        let table = Table::new(
            vec!["Name".into(), METHOD_COLUMN.into()],
            vec![
                vec!["a".into(), "Exact".into()],
                vec!["b".into(), "Fuzzy".into()],
                vec!["c".into(), "Not found".into()],
                vec!["d".into(), "Exact".into()],
            ],
        );
        let summary = MatchSummary::from_table(&table);
        assert_eq!(
            summary,
            MatchSummary { total: 4, exact: 2, fuzzy: 1, not_found: 1 }
        );
        assert_eq!(summary.matched(), 3);
    }

    #[test]
    fn test_from_table_without_method_column() {
        let table = Table::new(vec!["Name".into()], vec![vec![CellValue::text("a")]]);
        let summary = MatchSummary::from_table(&table);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.matched() + summary.not_found, 0);
    }
}
