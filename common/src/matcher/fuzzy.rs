//! あいまい一致照合
//!
//! 完全一致で解決しなかった行について、参照キー全体から最高スコアの候補を探す。
//! 同点の場合は参照表で先に出現したキーを採用する。

use super::types::{MatchHit, MatchMethod};
use crate::index::{ReferenceEntry, ReferenceIndex};
use crate::scorer::Scorer;
use rayon::prelude::*;

/// 全参照エントリから最良の候補を探す
///
/// 結果は全件走査と同一。`Ratio`/`TokenSortRatio` では長さから求まる
/// スコア上限が現在の最良値を下回る候補を計算せずに飛ばす。
pub fn best_match<'a>(
    query: &str,
    entries: &'a [ReferenceEntry],
    scorer: Scorer,
) -> Option<(&'a ReferenceEntry, f64)> {
    let query_len = query.chars().count();
    let mut best: Option<(&'a ReferenceEntry, f64)> = None;

    for entry in entries {
        if let Some((_, best_score)) = best {
            if let Some(bound) = length_bound(scorer, query_len, entry.key.chars().count()) {
                if bound < best_score - 1e-9 {
                    continue;
                }
            }
        }

        let score = scorer.score(query, &entry.key);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((entry, score)),
        }
    }

    best
}

/// 長さだけから求まるスコア上限（正規化キー前提）
fn length_bound(scorer: Scorer, len_a: usize, len_b: usize) -> Option<f64> {
    match scorer {
        Scorer::Ratio | Scorer::TokenSortRatio => {
            let total = len_a + len_b;
            if total == 0 {
                return None;
            }
            Some(200.0 * len_a.min(len_b) as f64 / total as f64)
        }
        Scorer::WRatio | Scorer::TokenSetRatio => None,
    }
}

/// 未解決行のあいまい一致
///
/// `resolved` で既に解決済みの行と空キーの行は検索しない。
/// 最良スコアが `threshold` 未満ならNone。行単位で並列に処理し、結果は行順。
pub fn match_fuzzy<'a>(
    keys: &[String],
    resolved: &[Option<MatchHit<'a>>],
    index: &'a ReferenceIndex,
    scorer: Scorer,
    threshold: f64,
) -> Vec<Option<MatchHit<'a>>> {
    let entries = index.entries();

    keys.par_iter()
        .enumerate()
        .map(|(row, key)| {
            let already = resolved.get(row).map(|h| h.is_some()).unwrap_or(false);
            if already || key.is_empty() {
                return None;
            }
            best_match(key, entries, scorer)
                .filter(|(_, score)| *score >= threshold)
                .map(|(entry, score)| MatchHit {
                    entry,
                    method: MatchMethod::Fuzzy,
                    score,
                })
        })
        .collect()
}
