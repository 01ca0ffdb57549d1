//! 完全一致照合
//!
//! 正規化キーが参照インデックスのキーと一致する行を解決する。

use super::types::{MatchHit, MatchMethod, EXACT_SCORE};
use crate::index::ReferenceIndex;

/// 各行の正規化キーを参照インデックスと突き合わせる
///
/// 空キー・未ヒットの行はNone。
pub fn match_exact<'a>(keys: &[String], index: &'a ReferenceIndex) -> Vec<Option<MatchHit<'a>>> {
    keys.iter()
        .map(|key| {
            if key.is_empty() {
                return None;
            }
            index.get(key).map(|entry| MatchHit {
                entry,
                method: MatchMethod::Exact,
                score: EXACT_SCORE,
            })
        })
        .collect()
}
