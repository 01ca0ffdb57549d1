use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}（照合には2つのファイルが必要です）")]
    InputUnavailable(String),

    #[error("表データとして読み込めません: {0}")]
    UnreadableDataset(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] name_match_common::Error),
}

pub type Result<T> = std::result::Result<T, NameMatchError>;
