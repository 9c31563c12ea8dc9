//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[cfg(feature = "excel")]
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::style::StyleToken;
    use crate::types::RowTheme;

    #[test]
    fn test_broken_catalog_json_is_json_error() {
        let error = Catalog::from_json("{\"recipes\": [").unwrap_err();
        assert!(matches!(error, Error::Json(_)));
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_missing_catalog_file_is_io_error() {
        let error = Catalog::from_file(std::path::Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_bad_row_theme_is_invalid_color() {
        let theme = RowTheme { fill: "coffee".into(), light_text: true };
        let error = StyleToken::recipe_row(Some(&theme)).unwrap_err();
        assert_eq!(error.to_string(), "Invalid color: coffee");
    }

    #[cfg(feature = "excel")]
    #[test]
    fn test_save_failure_is_workbook_error() {
        use crate::export::{CalculatorOptions, WorkbookAssembler};

        let catalog = Catalog::builtin();
        let options = CalculatorOptions::default();
        let mut assembler = WorkbookAssembler::new(&catalog, &options);
        assembler.build_sheet(crate::layout::SheetKind::QuickReference).unwrap();

        let error = assembler
            .save(std::path::Path::new("/nonexistent/dir/calculator.xlsx"))
            .unwrap_err();
        assert!(matches!(error, Error::Xlsx(_)));
        assert!(error.to_string().starts_with("Workbook error"));
    }
}
