//! ワークブック生成
//!
//! - excel_core: 書式付きセル書き込みとワークブックの組み立て
//! - sheets: 6シートそれぞれのビルダー

pub mod excel_core;
pub mod sheets;

pub use excel_core::{generate_workbook_buffer, CalculatorOptions, SheetContext, SheetWriter, WorkbookAssembler};
