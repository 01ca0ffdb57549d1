//! 類似度スコアラー
//!
//! 基本の類似度は rapidfuzz の正規化Indel類似度（0-100に換算）。
//! トークン系・部分一致・重み付きのスコアはそれを組み合わせて算出する。

use crate::error::Error;
use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;

/// 照合に使うスコアラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scorer {
    /// トークンを並べ替えてから比較
    #[default]
    #[serde(rename = "token_sort_ratio")]
    TokenSortRatio,
    /// 長さ比に応じて部分一致・トークン比較を重み付け
    #[serde(rename = "WRatio", alias = "wratio")]
    WRatio,
    /// 文字列全体の比較
    #[serde(rename = "ratio")]
    Ratio,
    /// 共通トークン集合と差分で比較
    #[serde(rename = "token_set_ratio")]
    TokenSetRatio,
}

impl Scorer {
    pub const ALL: [Scorer; 4] = [
        Scorer::TokenSortRatio,
        Scorer::WRatio,
        Scorer::Ratio,
        Scorer::TokenSetRatio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scorer::TokenSortRatio => "token_sort_ratio",
            Scorer::WRatio => "WRatio",
            Scorer::Ratio => "ratio",
            Scorer::TokenSetRatio => "token_set_ratio",
        }
    }

    /// 2つの文字列の類似度（0-100）
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::TokenSortRatio => token_sort_ratio(a, b),
            Scorer::WRatio => wratio(a, b),
            Scorer::Ratio => ratio(a, b),
            Scorer::TokenSetRatio => token_set_ratio(a, b),
        }
    }
}

impl std::str::FromStr for Scorer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token_sort_ratio" | "token-sort-ratio" => Ok(Scorer::TokenSortRatio),
            "wratio" | "weighted_ratio" | "weighted-ratio" => Ok(Scorer::WRatio),
            "ratio" | "raw_ratio" | "raw-ratio" => Ok(Scorer::Ratio),
            "token_set_ratio" | "token-set-ratio" => Ok(Scorer::TokenSetRatio),
            _ => Err(Error::UnknownScorer(s.to_string())),
        }
    }
}

impl std::fmt::Display for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn chars_ratio(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    indel::normalized_similarity(a.iter().copied(), b.iter().copied()) * 100.0
}

/// 文字列全体の類似度
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    chars_ratio(&a, &b)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_set(s: &str) -> BTreeSet<&str> {
    s.split_whitespace().collect()
}

fn join_tokens<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

/// トークンを並べ替えた文字列同士の類似度
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// 共通トークンと差分トークンによる類似度
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = token_set(a);
    let tokens_b = token_set(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersect: Vec<&&str> = tokens_a.intersection(&tokens_b).collect();
    let diff_ab: Vec<&&str> = tokens_a.difference(&tokens_b).collect();
    let diff_ba: Vec<&&str> = tokens_b.difference(&tokens_a).collect();

    if !intersect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = join_tokens(intersect.into_iter());
    let ab = join_tokens(diff_ab.into_iter());
    let ba = join_tokens(diff_ba.into_iter());

    if sect.is_empty() {
        return ratio(&ab, &ba);
    }

    let sect_ab = format!("{} {}", sect, ab);
    let sect_ba = format!("{} {}", sect, ba);

    ratio(&sect_ab, &sect_ba)
        .max(ratio(&sect, &sect_ab))
        .max(ratio(&sect, &sect_ba))
}

/// 短い方の文字列と、長い方の同じ長さの部分文字列との最大類似度
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100.0 } else { 0.0 };
    }

    if a.len() == b.len() {
        return partial_windows(&a, &b).max(partial_windows(&b, &a));
    }
    if a.len() < b.len() {
        partial_windows(&a, &b)
    } else {
        partial_windows(&b, &a)
    }
}

/// 端で欠ける窓も含めて全位置を走査
fn partial_windows(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let m = haystack.len();
    let mut best = 0.0_f64;

    for len in 1..n {
        best = best.max(chars_ratio(needle, &haystack[..len]));
        best = best.max(chars_ratio(needle, &haystack[m - len..]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    for start in 0..=(m - n) {
        best = best.max(chars_ratio(needle, &haystack[start..start + n]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    best
}

fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = token_set(a);
    let tokens_b = token_set(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    if tokens_a.intersection(&tokens_b).next().is_some() {
        return 100.0;
    }

    let result = partial_ratio(&sorted_tokens(a), &sorted_tokens(b));

    // 重複トークンがなければ差分は元の並べ替え文字列と同一
    let split_a = a.split_whitespace().count();
    let split_b = b.split_whitespace().count();
    if split_a == tokens_a.len() && split_b == tokens_b.len() {
        return result;
    }

    let ab = join_tokens(tokens_a.difference(&tokens_b));
    let ba = join_tokens(tokens_b.difference(&tokens_a));
    result.max(partial_ratio(&ab, &ba))
}

/// 重み付き類似度
pub fn wratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let end_ratio = ratio(a, b);

    if len_ratio < 1.5 {
        let token_ratio = token_set_ratio(a, b).max(token_sort_ratio(a, b));
        return end_ratio.max(token_ratio * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio(a, b) * partial_scale);
    end_ratio.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_ratio() {
        assert!(approx(ratio("jon smith", "john smith"), 94.74));
        assert!(approx(ratio("this is a test", "this is a test!"), 96.55));
        assert!(approx(ratio("acme corp", "acme corporation"), 72.0));
        assert_eq!(ratio("abc", "abc"), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_token_sort_ratio_ignores_order() {
        assert_eq!(token_sort_ratio("smith john", "john smith"), 100.0);
        assert!(token_sort_ratio("john smith", "jane smith") < 100.0);
    }

    #[test]
    fn test_token_set_ratio() {
        assert_eq!(token_set_ratio("acme corp ltd", "acme corp"), 100.0);
        assert_eq!(token_set_ratio("smith john", "john smith"), 100.0);
        // 共通トークンなしは差分同士の比較
        assert!(approx(token_set_ratio("abc", "abd"), ratio("abc", "abd")));
        assert_eq!(token_set_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_token_set_ratio_partial_overlap() {
        // sect="smith", ab="john", ba="jon"
        let expected = ratio("smith john", "smith jon")
            .max(ratio("smith", "smith john"))
            .max(ratio("smith", "smith jon"));
        assert!(approx(token_set_ratio("john smith", "jon smith"), expected));
    }

    #[test]
    fn test_partial_ratio() {
        assert_eq!(partial_ratio("acme corp", "acme corporation"), 100.0);
        assert_eq!(partial_ratio("acme corporation", "acme corp"), 100.0);
        assert!(partial_ratio("xyz", "acme corporation") < 50.0);
    }

    #[test]
    fn test_wratio() {
        // 長さ比1.5以上: 部分一致×0.9
        assert!(approx(wratio("acme corp", "acme corporation"), 90.0));
        // 長さ比1.5未満: 全体比較とトークン比較×0.95の大きい方
        assert!(approx(wratio("jon smith", "john smith"), 94.74));
        assert!(approx(wratio("smith john", "john smith"), 95.0));
        assert_eq!(wratio("", "abc"), 0.0);
    }

    #[test]
    fn test_scorer_from_str() {
        assert_eq!("token_sort_ratio".parse::<Scorer>().unwrap(), Scorer::TokenSortRatio);
        assert_eq!("WRatio".parse::<Scorer>().unwrap(), Scorer::WRatio);
        assert_eq!("ratio".parse::<Scorer>().unwrap(), Scorer::Ratio);
        assert_eq!("token-set-ratio".parse::<Scorer>().unwrap(), Scorer::TokenSetRatio);
        assert!(matches!("jaro".parse::<Scorer>(), Err(Error::UnknownScorer(_))));
    }

    #[test]
    fn test_scorer_display_roundtrip_names() {
        for scorer in Scorer::ALL {
            assert_eq!(scorer.to_string().parse::<Scorer>().unwrap(), scorer);
        }
    }

    #[test]
    fn test_scorer_serde_names() {
        let json = serde_json::to_string(&Scorer::WRatio).unwrap();
        assert_eq!(json, "\"WRatio\"");
        let parsed: Scorer = serde_json::from_str("\"token_set_ratio\"").unwrap();
        assert_eq!(parsed, Scorer::TokenSetRatio);
    }
}
