use crate::index::ReferenceEntry;
use serde::{Deserialize, Serialize};

/// 照合方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMethod {
    Exact,
    Fuzzy,
    #[serde(rename = "Not found")]
    NotFound,
}

impl MatchMethod {
    pub fn label(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "Exact",
            MatchMethod::Fuzzy => "Fuzzy",
            MatchMethod::NotFound => "Not found",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 完全一致の照合スコア
pub const EXACT_SCORE: f64 = 100.0;

/// 1行分の照合ヒット（完全一致またはあいまい一致）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchHit<'a> {
    pub entry: &'a ReferenceEntry,
    pub method: MatchMethod,
    pub score: f64,
}
