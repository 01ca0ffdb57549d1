//! シート・列の対話式選択モジュール

use crate::error::{NameMatchError, Result};
use dialoguer::Select;
use name_match_common::{category_options, require_name_candidates, Advisory, ColumnRequest};

fn prompt_error(e: dialoguer::Error) -> NameMatchError {
    NameMatchError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// 選択肢から1つ選ぶ（先頭が既定）
pub fn select_one(prompt: &str, choices: &[String]) -> Result<String> {
    if choices.len() == 1 {
        return Ok(choices[0].clone());
    }
    let index = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(choices[index].clone())
}

/// シートを選ぶ（指定済み・1枚のみの場合は問い合わせない）
pub fn select_sheet(label: &str, sheets: &[String], requested: Option<&str>) -> Result<Option<String>> {
    if requested.is_some() || sheets.len() <= 1 {
        return Ok(requested.map(str::to_string));
    }
    select_one(&format!("{}のシート", label), sheets).map(Some)
}

/// 名前列の選択肢（候補がなければ `NoNameColumn`）
pub fn name_choices(dataset: &str, headers: &[String]) -> Result<Vec<String>> {
    Ok(require_name_candidates(dataset, headers)?)
}

/// 未指定の列を対話的に補う
pub fn complete_request(
    subject_headers: &[String],
    reference_headers: &[String],
    request: ColumnRequest,
) -> Result<ColumnRequest> {
    let mut request = request;

    if request.subject_name.is_none() {
        request.subject_name = Some(select_one(
            "分類対象の名前列",
            &name_choices("subject", subject_headers)?,
        )?);
    }
    if request.reference_name.is_none() {
        request.reference_name = Some(select_one(
            "参照表の名前列",
            &name_choices("reference", reference_headers)?,
        )?);
    }
    if request.reference_category.is_none() && !request.no_category {
        let options = category_options(reference_headers);
        if options.advisory == Some(Advisory::NoCategoryColumn) {
            println!("⚠ 参照表に分類列らしき列がありません。手動で選ぶか「(No category column)」を選択してください");
        }
        request.reference_category = Some(select_one("参照表の分類列", &options.choices)?);
    }

    Ok(request)
}
