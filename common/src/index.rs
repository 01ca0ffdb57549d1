//! 参照リストのインデックス
//!
//! 参照表を正規化キーで重複排除し、キー → (元の名前, 分類) を保持する。
//! 同じキーが複数ある場合は最初に出現した行を採用する。

use crate::columns::CategorySource;
use crate::error::{Error, Result};
use crate::normalizer::normalize_cell;
use crate::types::{CellValue, Table};
use std::collections::HashMap;

/// 参照エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEntry {
    /// 正規化キー
    pub key: String,
    /// 参照表の元の名前
    pub name: CellValue,
    /// 分類（分類列なし、または空セルの場合はNone）
    pub category: Option<CellValue>,
}

/// 正規化キーで引ける参照インデックス
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: Vec<ReferenceEntry>,
    by_key: HashMap<String, usize>,
}

impl ReferenceIndex {
    /// 参照表からインデックスを構築
    pub fn build(reference: &Table, name_col: &str, category: &CategorySource) -> Result<Self> {
        let name_idx = column_index(reference, name_col)?;
        let category_idx = match category.column() {
            Some(col) => Some(column_index(reference, col)?),
            None => None,
        };

        let mut index = Self::default();
        let mut duplicates = 0usize;
        let mut empty_keys = 0usize;

        for row in 0..reference.len() {
            let name = reference.cell(row, name_idx);
            let key = normalize_cell(name);
            if key.is_empty() {
                empty_keys += 1;
                continue;
            }

            let category = category_idx
                .map(|c| reference.cell(row, c))
                .filter(|v| !v.is_empty())
                .cloned();

            if !index.insert(ReferenceEntry {
                key,
                name: name.clone(),
                category,
            }) {
                duplicates += 1;
            }
        }

        tracing::debug!(
            entries = index.len(),
            duplicates,
            empty_keys,
            "参照インデックス構築"
        );
        Ok(index)
    }

    /// エントリを追加（キー重複時は追加せずfalse）
    pub fn insert(&mut self, entry: ReferenceEntry) -> bool {
        if entry.key.is_empty() || self.by_key.contains_key(&entry.key) {
            return false;
        }
        self.by_key.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// 正規化キーで完全一致検索
    pub fn get(&self, key: &str) -> Option<&ReferenceEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// 出現順の全エントリ
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn column_index(table: &Table, column: &str) -> Result<usize> {
    table.column_index(column).ok_or_else(|| Error::UnknownColumn {
        dataset: "reference".to_string(),
        column: column.to_string(),
        available: table.headers.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Table {
        Table::new(
            vec!["Name".into(), "Type".into()],
            vec![
                vec!["ACME Corp.".into(), "Company".into()],
                vec!["acme corp".into(), "Individual".into()],
                vec!["".into(), "Ghost".into()],
                vec![CellValue::Empty, "Ghost".into()],
                vec!["John Smith".into(), CellValue::Empty],
            ],
        )
    }

    #[test]
    fn test_first_occurrence_wins() {
        let index =
            ReferenceIndex::build(&reference(), "Name", &CategorySource::Column("Type".into())).unwrap();
        assert_eq!(index.len(), 2);

        let entry = index.get("acme corp").unwrap();
        assert_eq!(entry.name, CellValue::text("ACME Corp."));
        assert_eq!(entry.category, Some(CellValue::text("Company")));
    }

    #[test]
    fn test_empty_keys_dropped() {
        let index =
            ReferenceIndex::build(&reference(), "Name", &CategorySource::Column("Type".into())).unwrap();
        assert!(index.get("").is_none());
        assert!(index.entries().iter().all(|e| !e.key.is_empty()));
    }

    #[test]
    fn test_entries_keep_reference_order() {
        let index = ReferenceIndex::build(&reference(), "Name", &CategorySource::None).unwrap();
        let keys: Vec<&str> = index.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["acme corp", "john smith"]);
        assert!(index.entries().iter().all(|e| e.category.is_none()));
    }

    #[test]
    fn test_empty_category_cell_is_none() {
        let index =
            ReferenceIndex::build(&reference(), "Name", &CategorySource::Column("Type".into())).unwrap();
        assert_eq!(index.get("john smith").unwrap().category, None);
    }

    #[test]
    fn test_unknown_column() {
        let result = ReferenceIndex::build(&reference(), "Title", &CategorySource::None);
        assert!(matches!(result, Err(Error::UnknownColumn { .. })));
    }
}
