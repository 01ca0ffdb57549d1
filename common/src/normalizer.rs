//! 名前の正規化モジュール
//!
//! 生の名前を照合用の正規化キーに変換する。
//!
//! ## 処理フロー
//! 1. 欠損値は空キー
//! 2. ノーブレークスペースを通常スペースに変換
//! 3. 小文字化
//! 4. `[a-z0-9 ]` 以外の文字の連続をスペースに置換
//! 5. 連続空白を1つに圧縮し、前後の空白を除去

use crate::types::CellValue;
use regex::Regex;

lazy_static::lazy_static! {
    static ref DISALLOWED_RE: Regex = Regex::new(r"[^a-z0-9 ]+").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// 文字列を正規化キーに変換
///
/// 全域関数。空文字列からは空キーを返す。
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.replace('\u{00A0}', " ").to_lowercase();
    let replaced = DISALLOWED_RE.replace_all(&lowered, " ");
    WHITESPACE_RE.replace_all(&replaced, " ").trim().to_string()
}

/// セル値を正規化キーに変換（空セルは空キー）
pub fn normalize_cell(value: &CellValue) -> String {
    value
        .as_text()
        .map(|s| normalize_name(&s))
        .unwrap_or_default()
}
