//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Threshold out of range: {0} (expected 50-100)")]
    InvalidThreshold(f64),

    #[error("Unknown scorer: {0}. Use token_sort_ratio, WRatio, ratio, or token_set_ratio")]
    UnknownScorer(String),

    #[error("No name-like column in {dataset} dataset. Columns found: {available:?}")]
    NoNameColumn {
        dataset: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' not found in {dataset} dataset. Columns found: {available:?}")]
    UnknownColumn {
        dataset: String,
        column: String,
        available: Vec<String>,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
