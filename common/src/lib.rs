//! Name Match Common Library
//!
//! 名簿照合のコア: 正規化・参照インデックス・完全一致/あいまい一致・結果の組み立て

pub mod types;
pub mod error;
pub mod normalizer;
pub mod columns;
pub mod scorer;
pub mod options;
pub mod index;
pub mod matcher;
pub mod assemble;
pub mod summary;
pub mod pipeline;

pub use types::{CellValue, Table};
pub use error::{Error, Result};
pub use normalizer::{normalize_cell, normalize_name};
pub use columns::{
    category_options, clean_header, name_candidates, require_name_candidates, resolve_selection,
    Advisory, CategoryOptions, CategorySource, ColumnRequest, ColumnSelection, CATEGORY_KEYWORDS,
    NO_CATEGORY_LABEL,
};
pub use scorer::Scorer;
pub use options::MatchOptions;
pub use index::{ReferenceEntry, ReferenceIndex};
pub use matcher::{MatchHit, MatchMethod};
pub use assemble::{MatchResult, RESULT_COLUMNS};
pub use summary::MatchSummary;
pub use pipeline::{run_matching, MatchOutput};
