//! 照合モジュール
//!
//! 完全一致 → あいまい一致の順に各行を参照インデックスと突き合わせる。

pub mod exact;
pub mod fuzzy;
pub mod types;

pub use exact::match_exact;
pub use fuzzy::{best_match, match_fuzzy};
pub use types::{MatchHit, MatchMethod, EXACT_SCORE};

use crate::index::ReferenceIndex;
use crate::options::MatchOptions;

/// 完全一致とあいまい一致を実行し、行ごとのヒットを返す
///
/// 完全一致が常に優先される。あいまい一致が無効なら完全一致のみ。
pub fn match_keys<'a>(
    keys: &[String],
    index: &'a ReferenceIndex,
    options: &MatchOptions,
) -> Vec<Option<MatchHit<'a>>> {
    let exact = match_exact(keys, index);
    let exact_count = exact.iter().filter(|h| h.is_some()).count();
    tracing::debug!(rows = keys.len(), exact = exact_count, "完全一致");

    if !options.enable_fuzzy {
        return exact;
    }

    let fuzzy = match_fuzzy(keys, &exact, index, options.scorer, options.threshold);
    let fuzzy_count = fuzzy.iter().filter(|h| h.is_some()).count();
    tracing::debug!(
        fuzzy = fuzzy_count,
        scorer = %options.scorer,
        threshold = options.threshold,
        "あいまい一致"
    );

    exact
        .into_iter()
        .zip(fuzzy)
        .map(|(e, f)| e.or(f))
        .collect()
}
