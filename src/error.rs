use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("ワークブック生成エラー: {0}")]
    Workbook(#[from] midnight_dough_common::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
