//! 列の自動検出モジュール
//!
//! ヘッダー名の部分一致で名前列・分類列の候補を求め、
//! ユーザー指定と合わせて照合に使う列を確定する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 分類列とみなすキーワード（小文字ヘッダーへの部分一致）
pub const CATEGORY_KEYWORDS: &[&str] = &[
    "category",
    "type",
    "class",
    "segment",
    "classification",
    "cat",
];

/// 名前列とみなすキーワード
pub const NAME_KEYWORD: &str = "name";

/// 「分類列なし」を表す選択肢
pub const NO_CATEGORY_LABEL: &str = "(No category column)";

/// ヘッダーの整形（ノーブレークスペース→スペース、前後空白除去）
pub fn clean_header(raw: &str) -> String {
    raw.replace('\u{00A0}', " ").trim().to_string()
}

/// 名前列の候補
pub fn name_candidates(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| h.to_lowercase().contains(NAME_KEYWORD))
        .cloned()
        .collect()
}

/// 分類列の候補
pub fn category_candidates(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| {
            let lower = h.to_lowercase();
            CATEGORY_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .cloned()
        .collect()
}

/// 列検出時の注意（処理は継続可能）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// 分類列らしき列が見つからない
    NoCategoryColumn,
}

/// 分類列の選択肢
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    pub choices: Vec<String>,
    pub advisory: Option<Advisory>,
}

/// 分類列の選択肢を作成
///
/// 候補がない場合は「分類列なし」＋全列を選択肢にする。
pub fn category_options(headers: &[String]) -> CategoryOptions {
    let candidates = category_candidates(headers);
    if !candidates.is_empty() {
        return CategoryOptions {
            choices: candidates,
            advisory: None,
        };
    }

    let mut choices = Vec::with_capacity(headers.len() + 1);
    choices.push(NO_CATEGORY_LABEL.to_string());
    choices.extend(headers.iter().cloned());
    CategoryOptions {
        choices,
        advisory: Some(Advisory::NoCategoryColumn),
    }
}

/// 分類の取得元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySource {
    Column(String),
    /// 分類列なし（存在確認モード）
    None,
}

impl CategorySource {
    /// 選択肢の文字列から変換
    pub fn from_choice(choice: &str) -> Self {
        if choice == NO_CATEGORY_LABEL {
            CategorySource::None
        } else {
            CategorySource::Column(choice.to_string())
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            CategorySource::Column(c) => Some(c),
            CategorySource::None => None,
        }
    }
}

/// 照合に使う列の組
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub subject_name: String,
    pub reference_name: String,
    pub reference_category: CategorySource,
}

/// ユーザー指定の列（未指定はNone）
#[derive(Debug, Clone, Default)]
pub struct ColumnRequest {
    pub subject_name: Option<String>,
    pub reference_name: Option<String>,
    pub reference_category: Option<String>,
    pub no_category: bool,
}

/// 列の選択を確定する
///
/// 未指定の列は先頭候補を採用する。名前列候補がなければ、列を指定していても `NoNameColumn`。
pub fn resolve_selection(
    subject_headers: &[String],
    reference_headers: &[String],
    request: &ColumnRequest,
) -> Result<ColumnSelection> {
    let subject_name = resolve_name_column("subject", subject_headers, request.subject_name.as_deref())?;
    let reference_name =
        resolve_name_column("reference", reference_headers, request.reference_name.as_deref())?;

    let reference_category = if request.no_category {
        CategorySource::None
    } else if let Some(column) = request.reference_category.as_deref() {
        let source = CategorySource::from_choice(column);
        if let CategorySource::Column(c) = &source {
            ensure_column("reference", reference_headers, c)?;
        }
        source
    } else {
        // 先頭の選択肢（候補なしなら「分類列なし」）
        let options = category_options(reference_headers);
        options
            .choices
            .first()
            .map(|c| CategorySource::from_choice(c))
            .unwrap_or(CategorySource::None)
    };

    Ok(ColumnSelection {
        subject_name,
        reference_name,
        reference_category,
    })
}

/// 名前列の候補（候補なしは `NoNameColumn`）
pub fn require_name_candidates(dataset: &str, headers: &[String]) -> Result<Vec<String>> {
    let candidates = name_candidates(headers);
    if candidates.is_empty() {
        return Err(Error::NoNameColumn {
            dataset: dataset.to_string(),
            available: headers.to_vec(),
        });
    }
    Ok(candidates)
}

/// 名前列は候補の中からのみ選べる
fn resolve_name_column(dataset: &str, headers: &[String], requested: Option<&str>) -> Result<String> {
    let mut candidates = require_name_candidates(dataset, headers)?;

    match requested {
        Some(column) if candidates.iter().any(|c| c == column) => Ok(column.to_string()),
        Some(column) => Err(Error::UnknownColumn {
            dataset: dataset.to_string(),
            column: column.to_string(),
            available: candidates,
        }),
        None => Ok(candidates.swap_remove(0)),
    }
}

fn ensure_column(dataset: &str, headers: &[String], column: &str) -> Result<()> {
    if headers.iter().any(|h| h == column) {
        Ok(())
    } else {
        Err(Error::UnknownColumn {
            dataset: dataset.to_string(),
            column: column.to_string(),
            available: headers.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("\u{00A0}Name of Entity "), "Name of Entity");
        assert_eq!(clean_header("Type"), "Type");
    }

    #[test]
    fn test_name_candidates() {
        let h = headers(&["ID", "Name of Entity", "Company NAME", "Address"]);
        assert_eq!(name_candidates(&h), headers(&["Name of Entity", "Company NAME"]));
    }

    #[test]
    fn test_category_candidates() {
        let h = headers(&["Name", "Entity Type", "Segment", "Notes", "Classification"]);
        assert_eq!(
            category_candidates(&h),
            headers(&["Entity Type", "Segment", "Classification"])
        );
    }

    #[test]
    fn test_category_options_without_candidates() {
        let h = headers(&["Name", "Notes"]);
        let options = category_options(&h);
        assert_eq!(options.advisory, Some(Advisory::NoCategoryColumn));
        assert_eq!(options.choices, headers(&[NO_CATEGORY_LABEL, "Name", "Notes"]));
    }

    #[test]
    fn test_resolve_defaults() {
        let subject = headers(&["Name of Entity", "Amount"]);
        let reference = headers(&["Name", "Type"]);
        let selection = resolve_selection(&subject, &reference, &ColumnRequest::default()).unwrap();
        assert_eq!(selection.subject_name, "Name of Entity");
        assert_eq!(selection.reference_name, "Name");
        assert_eq!(selection.reference_category, CategorySource::Column("Type".into()));
    }

    #[test]
    fn test_resolve_defaults_to_no_category() {
        let subject = headers(&["Name"]);
        let reference = headers(&["Name", "Notes"]);
        let selection = resolve_selection(&subject, &reference, &ColumnRequest::default()).unwrap();
        assert_eq!(selection.reference_category, CategorySource::None);
    }

    #[test]
    fn test_resolve_no_name_column() {
        let subject = headers(&["ID", "Entity"]);
        let reference = headers(&["Name"]);
        let err = resolve_selection(&subject, &reference, &ColumnRequest::default()).unwrap_err();
        match err {
            Error::NoNameColumn { dataset, available } => {
                assert_eq!(dataset, "subject");
                assert_eq!(available, subject);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_explicit_column_without_candidates() {
        let subject = headers(&["ID", "Entity"]);
        let reference = headers(&["Name", "Type"]);
        let request = ColumnRequest {
            subject_name: Some("Entity".into()),
            ..Default::default()
        };
        let err = resolve_selection(&subject, &reference, &request).unwrap_err();
        assert!(matches!(err, Error::NoNameColumn { dataset, .. } if dataset == "subject"));
    }

    #[test]
    fn test_resolve_requested_name_must_be_candidate() {
        let subject = headers(&["ID", "Full Name"]);
        let reference = headers(&["Name", "Type"]);
        let request = ColumnRequest {
            subject_name: Some("ID".into()),
            ..Default::default()
        };
        match resolve_selection(&subject, &reference, &request).unwrap_err() {
            Error::UnknownColumn { column, available, .. } => {
                assert_eq!(column, "ID");
                assert_eq!(available, headers(&["Full Name"]));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let request = ColumnRequest {
            subject_name: Some("Full Name".into()),
            ..Default::default()
        };
        let selection = resolve_selection(&subject, &reference, &request).unwrap();
        assert_eq!(selection.subject_name, "Full Name");
    }

    #[test]
    fn test_resolve_unknown_requested_column() {
        let subject = headers(&["Name"]);
        let reference = headers(&["Name", "Type"]);
        let request = ColumnRequest {
            reference_category: Some("Kind".into()),
            ..Default::default()
        };
        let err = resolve_selection(&subject, &reference, &request).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { .. }));
    }

    #[test]
    fn test_resolve_explicit_no_category_label() {
        let subject = headers(&["Name"]);
        let reference = headers(&["Name", "Type"]);
        let request = ColumnRequest {
            reference_category: Some(NO_CATEGORY_LABEL.into()),
            ..Default::default()
        };
        let selection = resolve_selection(&subject, &reference, &request).unwrap();
        assert_eq!(selection.reference_category, CategorySource::None);
    }
}
