pub mod excel;

use std::path::{Path, PathBuf};

/// 出力先パスを決定（ディレクトリ指定時はその中に既定ファイル名）
pub fn output_path(output: Option<&Path>, default_file: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(default_file),
        Some(path) if path.extension().is_none() => path.with_extension("xlsx"),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file),
    }
}
