//! Excel生成（CLI版）
//!
//! シートごとに進捗を表示しながら組み立てて保存する。

use crate::error::{CalculatorError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use midnight_dough_common::{
    calculator_coverage, CalculatorOptions, Catalog, Coverage, SheetKind, WorkbookAssembler,
};
use std::path::Path;

/// 生成結果の要約
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub sheets: Vec<SheetKind>,
    /// 計算シートに並べた材料数
    pub ingredient_count: usize,
    pub coverage: Coverage,
}

pub fn generate_calculator(
    catalog: &Catalog,
    options: &CalculatorOptions,
    output_path: &Path,
    show_progress: bool,
) -> Result<GenerationSummary> {
    let mut assembler = WorkbookAssembler::new(catalog, options);

    let pb = if show_progress {
        let pb = ProgressBar::new(SheetKind::ALL.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    for kind in SheetKind::ALL {
        pb.set_message(kind.name());
        assembler.build_sheet(kind)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let summary = GenerationSummary {
        sheets: assembler.built_sheets().to_vec(),
        ingredient_count: assembler.ingredients().len(),
        coverage: calculator_coverage(catalog, assembler.ingredients()),
    };

    assembler
        .save(output_path)
        .map_err(|e| CalculatorError::ExcelGeneration(format!("{}: {}", output_path.display(), e)))?;

    Ok(summary)
}
