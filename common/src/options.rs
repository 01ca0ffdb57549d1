//! 照合オプション

use crate::error::{Error, Result};
use crate::scorer::Scorer;
use serde::{Deserialize, Serialize};

/// 閾値の下限
pub const MIN_THRESHOLD: f64 = 50.0;
/// 閾値の上限
pub const MAX_THRESHOLD: f64 = 100.0;
/// 閾値の既定値
pub const DEFAULT_THRESHOLD: f64 = 92.0;

/// 照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// あいまい一致を有効にする
    pub enable_fuzzy: bool,
    /// あいまい一致の採用閾値（50-100）
    pub threshold: f64,
    /// スコアラー
    pub scorer: Scorer,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            enable_fuzzy: true,
            threshold: DEFAULT_THRESHOLD,
            scorer: Scorer::default(),
        }
    }
}

impl MatchOptions {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
