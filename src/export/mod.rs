pub mod excel;

use crate::error::{CalculatorError, Result};
use midnight_dough_common::Catalog;
use std::path::{Path, PathBuf};

/// カタログを読み込む（パス省略時は組み込みデータ）
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    if !path.exists() {
        return Err(CalculatorError::FileNotFound(path.display().to_string()));
    }

    Catalog::from_file(path).map_err(|e| match e {
        midnight_dough_common::Error::Json(e) => CalculatorError::JsonParse(e),
        midnight_dough_common::Error::Io(e) => CalculatorError::Io(e),
        other => CalculatorError::Workbook(other),
    })
}

/// 拡張子がなければ .xlsx を付ける
pub fn output_path(output: &Path) -> PathBuf {
    if output.extension().is_none() {
        output.with_extension("xlsx")
    } else {
        output.to_path_buf()
    }
}
