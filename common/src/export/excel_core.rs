//! Excel生成（共通ライブラリ）
//!
//! layout.rs のシート定義と style.rs のトークンを使ってワークブックを組み立てる。
//! 各シートは独立した `Worksheet` として作り、出力順に追加する。

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::formula::Expr;
use crate::layout::{SheetKind, DEFAULT_BRAND, DEFAULT_ORDER_LINES};
use crate::style::StyleToken;
use crate::types::IngredientSelection;
use rust_xlsxwriter::{DataValidation, Formula, Workbook, Worksheet};
use std::path::Path;

use super::sheets;

/// 生成オプション
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorOptions {
    /// タイトル行のブランド名
    pub brand: String,
    /// Order Calculator の注文行数
    pub order_lines: u32,
    pub selection: IngredientSelection,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            order_lines: DEFAULT_ORDER_LINES,
            selection: IngredientSelection::Fixed,
        }
    }
}

/// シートビルダーに渡す読み取り専用の文脈
pub struct SheetContext<'a> {
    pub catalog: &'a Catalog,
    pub options: &'a CalculatorOptions,
    /// Batch Calculator / Shopping List に並べる材料
    pub ingredients: Vec<String>,
    /// ドロップダウン候補
    pub recipe_names: Vec<&'a str>,
}

impl<'a> SheetContext<'a> {
    pub fn new(catalog: &'a Catalog, options: &'a CalculatorOptions) -> Self {
        Self {
            catalog,
            options,
            ingredients: catalog.calculator_list(options.selection),
            recipe_names: catalog.recipe_names(),
        }
    }
}

/// 書式トークン付きでセルを書き込むラッパー
pub struct SheetWriter<'w> {
    sheet: &'w mut Worksheet,
}

impl<'w> SheetWriter<'w> {
    pub fn new(sheet: &'w mut Worksheet) -> Self {
        Self { sheet }
    }

    pub fn text(&mut self, row: u32, col: u16, value: &str, style: StyleToken) -> Result<()> {
        self.sheet.write_string_with_format(row, col, value, &style.format())?;
        Ok(())
    }

    pub fn number(&mut self, row: u32, col: u16, value: f64, style: StyleToken) -> Result<()> {
        self.sheet.write_number_with_format(row, col, value, &style.format())?;
        Ok(())
    }

    pub fn formula(&mut self, row: u32, col: u16, expr: &Expr, style: StyleToken) -> Result<()> {
        self.sheet
            .write_formula_with_format(row, col, Formula::new(expr.to_formula()), &style.format())?;
        Ok(())
    }

    /// 配列評価が必要な数式（動的配列数式として書き込む）
    pub fn array_formula(&mut self, row: u32, col: u16, expr: &Expr, style: StyleToken) -> Result<()> {
        self.sheet.write_dynamic_formula_with_format(
            row,
            col,
            Formula::new(expr.to_formula()),
            &style.format(),
        )?;
        Ok(())
    }

    /// 値なし・書式のみ（入力欄など）
    pub fn blank(&mut self, row: u32, col: u16, style: StyleToken) -> Result<()> {
        self.sheet.write_blank(row, col, &style.format())?;
        Ok(())
    }

    /// 1行目の結合タイトル
    pub fn title(&mut self, kind: SheetKind, text: &str) -> Result<()> {
        self.banner(0, kind, text, StyleToken::Title)
    }

    /// 2行目の結合説明文
    pub fn subtitle(&mut self, kind: SheetKind, text: &str) -> Result<()> {
        self.banner(1, kind, text, StyleToken::Subtitle)
    }

    fn banner(&mut self, row: u32, kind: SheetKind, text: &str, style: StyleToken) -> Result<()> {
        let last_col = kind.title_span().saturating_sub(1);
        self.sheet.merge_range(row, 0, row, last_col, text, &style.format())?;
        Ok(())
    }

    pub fn header_row(&mut self, row: u32, headers: &[&str]) -> Result<()> {
        for (col, header) in headers.iter().enumerate() {
            self.text(row, col as u16, header, StyleToken::ColumnHeader)?;
        }
        Ok(())
    }

    pub fn column_widths(&mut self, kind: SheetKind) -> Result<()> {
        for (col, width) in kind.column_widths().iter().enumerate() {
            self.sheet.set_column_width(col as u16, *width)?;
        }
        Ok(())
    }

    /// リスト入力規則（ドロップダウン）
    pub fn dropdown(
        &mut self,
        first_row: u32,
        last_row: u32,
        col: u16,
        names: &[&str],
        error: Option<(&str, &str)>,
    ) -> Result<()> {
        let mut validation = DataValidation::new().allow_list_strings(names)?;
        if let Some((title, message)) = error {
            validation = validation.set_error_title(title)?.set_error_message(message)?;
        }
        self.sheet.add_data_validation(first_row, col, last_row, col, &validation)?;
        Ok(())
    }
}

/// ワークブックの組み立て
///
/// `build_sheet` を呼んだ順にシートが並ぶ。`build_all` は SheetKind::ALL の順。
pub struct WorkbookAssembler<'a> {
    context: SheetContext<'a>,
    workbook: Workbook,
    built: Vec<SheetKind>,
}

impl<'a> WorkbookAssembler<'a> {
    pub fn new(catalog: &'a Catalog, options: &'a CalculatorOptions) -> Self {
        Self {
            context: SheetContext::new(catalog, options),
            workbook: Workbook::new(),
            built: Vec::new(),
        }
    }

    /// 計算シートに並ぶ材料
    pub fn ingredients(&self) -> &[String] {
        &self.context.ingredients
    }

    pub fn built_sheets(&self) -> &[SheetKind] {
        &self.built
    }

    pub fn build_sheet(&mut self, kind: SheetKind) -> Result<()> {
        if self.built.contains(&kind) {
            return Err(Error::Config(format!("sheet already built: {}", kind.name())));
        }

        let mut worksheet = Worksheet::new();
        worksheet.set_name(kind.name())?;

        {
            let mut writer = SheetWriter::new(&mut worksheet);
            writer.column_widths(kind)?;
            let ctx = &self.context;
            match kind {
                SheetKind::IngredientPrices => sheets::prices::build(&mut writer, ctx)?,
                SheetKind::RecipeDatabase => sheets::recipes::build(&mut writer, ctx)?,
                SheetKind::BatchCalculator => sheets::batch::build(&mut writer, ctx)?,
                SheetKind::OrderCalculator => sheets::orders::build(&mut writer, ctx)?,
                SheetKind::ShoppingList => sheets::shopping::build(&mut writer, ctx)?,
                SheetKind::QuickReference => sheets::reference::build(&mut writer, ctx)?,
            }
        }

        self.workbook.push_worksheet(worksheet);
        self.built.push(kind);
        Ok(())
    }

    pub fn build_all(&mut self) -> Result<()> {
        for kind in SheetKind::ALL {
            self.build_sheet(kind)?;
        }
        Ok(())
    }

    pub fn save(mut self, path: &Path) -> Result<()> {
        self.workbook.save(path)?;
        Ok(())
    }

    pub fn save_to_buffer(mut self) -> Result<Vec<u8>> {
        Ok(self.workbook.save_to_buffer()?)
    }
}

/// 全シートを生成してバッファに書き出し
pub fn generate_workbook_buffer(catalog: &Catalog, options: &CalculatorOptions) -> Result<Vec<u8>> {
    let mut assembler = WorkbookAssembler::new(catalog, options);
    assembler.build_all()?;
    assembler.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = CalculatorOptions::default();
        assert_eq!(options.brand, "MIDNIGHT DOUGH");
        assert_eq!(options.order_lines, 20);
        assert_eq!(options.selection, IngredientSelection::Fixed);
    }

    #[test]
    fn test_build_all_in_order() {
        let catalog = Catalog::builtin();
        let options = CalculatorOptions::default();
        let mut assembler = WorkbookAssembler::new(&catalog, &options);
        assembler.build_all().expect("シート生成失敗");
        assert_eq!(assembler.built_sheets(), &SheetKind::ALL);
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let catalog = Catalog::builtin();
        let options = CalculatorOptions::default();
        let mut assembler = WorkbookAssembler::new(&catalog, &options);
        assembler.build_sheet(SheetKind::QuickReference).expect("シート生成失敗");
        let result = assembler.build_sheet(SheetKind::QuickReference);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_generate_buffer_is_zip() {
        let buffer = generate_workbook_buffer(&Catalog::builtin(), &CalculatorOptions::default())
            .expect("生成失敗");
        assert!(buffer.len() > 1000);
        assert_eq!(&buffer[..2], b"PK");
    }
}
