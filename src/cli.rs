use clap::{Parser, Subcommand};
use name_match_common::Scorer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "name-match")]
#[command(about = "名簿照合ツール（完全一致＋あいまい一致）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 2つの表を照合して結果をExcelに出力
    Run {
        /// 分類対象の表（xlsx/xls/ods/csv）
        #[arg(required = true)]
        subject: PathBuf,

        /// 参照表（名前＋分類）
        #[arg(required = true)]
        reference: PathBuf,

        /// 分類対象のシート名（省略時は先頭シート）
        #[arg(long)]
        subject_sheet: Option<String>,

        /// 参照表のシート名（省略時は先頭シート）
        #[arg(long)]
        reference_sheet: Option<String>,

        /// 分類対象の名前列（省略時は "name" を含む最初の列）
        #[arg(long)]
        subject_column: Option<String>,

        /// 参照表の名前列
        #[arg(long)]
        reference_column: Option<String>,

        /// 参照表の分類列
        #[arg(long, conflicts_with = "no_category")]
        category_column: Option<String>,

        /// 分類列を使わず、見つかった/見つからないのみ判定
        #[arg(long)]
        no_category: bool,

        /// あいまい一致を無効化
        #[arg(long)]
        no_fuzzy: bool,

        /// あいまい一致の閾値（50-100）
        #[arg(short, long)]
        threshold: Option<f64>,

        /// スコアラー (token_sort_ratio/WRatio/ratio/token_set_ratio)
        #[arg(short, long)]
        scorer: Option<Scorer>,

        /// 出力Excelファイル（デフォルト: matched_output.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 結果のプレビュー行数（0で非表示）
        #[arg(long)]
        preview: Option<usize>,

        /// 列を対話的に選択
        #[arg(short, long)]
        interactive: bool,
    },

    /// ファイルのシート・列・候補列を表示
    Inspect {
        /// 対象ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// シート名（省略時は全シート）
        #[arg(long)]
        sheet: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の閾値を設定
        #[arg(long)]
        threshold: Option<f64>,

        /// 既定のスコアラーを設定
        #[arg(long)]
        scorer: Option<Scorer>,

        /// あいまい一致の既定値を設定 (true/false)
        #[arg(long)]
        fuzzy: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
