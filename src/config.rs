use crate::error::{NameMatchError, Result};
use name_match_common::{MatchOptions, Scorer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// プレビュー行数の既定値
pub const DEFAULT_PREVIEW_ROWS: usize = 200;
/// 出力ファイル名の既定値
pub const DEFAULT_OUTPUT_FILE: &str = "matched_output.xlsx";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub enable_fuzzy: bool,
    pub threshold: f64,
    pub scorer: Scorer,
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        let options = MatchOptions::default();
        Self {
            enable_fuzzy: options.enable_fuzzy,
            threshold: options.threshold,
            scorer: options.scorer,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.match_options().validate()?;
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NameMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("name-match").join("config.json"))
    }

    /// 設定値から照合オプションを作成
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            enable_fuzzy: self.enable_fuzzy,
            threshold: self.threshold,
            scorer: self.scorer,
        }
    }

    /// CLI指定で上書きした照合オプション
    pub fn match_options_with(
        &self,
        no_fuzzy: bool,
        threshold: Option<f64>,
        scorer: Option<Scorer>,
    ) -> MatchOptions {
        let base = self.match_options();
        MatchOptions {
            enable_fuzzy: base.enable_fuzzy && !no_fuzzy,
            threshold: threshold.unwrap_or(base.threshold),
            scorer: scorer.unwrap_or(base.scorer),
        }
    }
}
