//! シート構成とセル配置
//!
//! 行・列はすべて0始まり（rust_xlsxwriter と同じ）。
//! 他シートから参照される列はここで定義し、数式側と共有する。

/// 出力ファイル名の既定値
pub const DEFAULT_OUTPUT_FILE: &str = "midnight_dough_cookie_calculator.xlsx";

/// 既定のブランド名（タイトル行に使用）
pub const DEFAULT_BRAND: &str = "MIDNIGHT DOUGH";

/// Order Calculator の注文行数の既定値
pub const DEFAULT_ORDER_LINES: u32 = 20;

/// ワークブックのシート（出力順）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    IngredientPrices,
    RecipeDatabase,
    BatchCalculator,
    OrderCalculator,
    ShoppingList,
    QuickReference,
}

impl SheetKind {
    pub const ALL: [SheetKind; 6] = [
        SheetKind::IngredientPrices,
        SheetKind::RecipeDatabase,
        SheetKind::BatchCalculator,
        SheetKind::OrderCalculator,
        SheetKind::ShoppingList,
        SheetKind::QuickReference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SheetKind::IngredientPrices => "Ingredient Prices",
            SheetKind::RecipeDatabase => "Recipe Database",
            SheetKind::BatchCalculator => "Batch Calculator",
            SheetKind::OrderCalculator => "Order Calculator",
            SheetKind::ShoppingList => "Shopping List",
            SheetKind::QuickReference => "Quick Reference",
        }
    }

    /// サマリ表示用の説明
    pub fn description(self) -> &'static str {
        match self {
            SheetKind::IngredientPrices => "Edit package prices (per-unit auto-calculates)",
            SheetKind::RecipeDatabase => "All cookie recipes",
            SheetKind::BatchCalculator => "Select cookie, qty, size → full breakdown",
            SheetKind::OrderCalculator => "Multiple orders with totals",
            SheetKind::ShoppingList => "Calculate packages to buy",
            SheetKind::QuickReference => "Sizes and bake times",
        }
    }

    /// 列幅（A列から順に）
    pub fn column_widths(self) -> &'static [f64] {
        match self {
            SheetKind::IngredientPrices => &[25.0, 10.0, 15.0, 18.0, 18.0, 25.0],
            SheetKind::RecipeDatabase => &[22.0, 12.0, 14.0, 15.0, 25.0, 10.0, 8.0, 12.0],
            SheetKind::BatchCalculator => &[25.0, 14.0, 8.0, 16.0, 14.0, 16.0, 12.0, 14.0],
            SheetKind::OrderCalculator => &[5.0, 22.0, 8.0, 10.0, 16.0, 12.0, 14.0, 12.0, 20.0],
            SheetKind::ShoppingList => &[25.0, 14.0, 8.0, 10.0, 12.0, 12.0, 12.0, 20.0],
            SheetKind::QuickReference => &[22.0, 25.0, 18.0, 12.0],
        }
    }

    /// タイトル行を結合する列数
    pub fn title_span(self) -> u16 {
        self.column_widths().len() as u16
    }
}

/// Ingredient Prices の列
pub mod price_cols {
    pub const NAME: u16 = 0;
    pub const UNIT: u16 = 1;
    pub const PACKAGE_SIZE: u16 = 2;
    pub const PACKAGE_PRICE: u16 = 3;
    pub const UNIT_PRICE: u16 = 4;
    pub const NOTES: u16 = 5;

    pub const HEADER_ROW: u32 = 3;
    pub const FIRST_DATA_ROW: u32 = 4;
}

/// Recipe Database の列
pub mod recipe_cols {
    pub const NAME: u16 = 0;
    pub const BASE_YIELD: u16 = 1;
    pub const BASE_SIZE: u16 = 2;
    pub const TOTAL_DOUGH: u16 = 3;
    pub const INGREDIENT: u16 = 4;
    pub const AMOUNT: u16 = 5;
    pub const UNIT: u16 = 6;
    pub const CATEGORY: u16 = 7;

    pub const HEADER_ROW: u32 = 2;
    pub const FIRST_DATA_ROW: u32 = 3;
}

/// Recipe Database のデータ最終行（データなしは先頭行）
pub fn recipe_last_row(row_count: usize) -> u32 {
    recipe_cols::FIRST_DATA_ROW + (row_count.max(1) as u32) - 1
}

/// VLOOKUP の列番号（1始まり）
pub const fn lookup_index(col: u16) -> u32 {
    col as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_order_and_names() {
        let names: Vec<&str> = SheetKind::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "Ingredient Prices",
                "Recipe Database",
                "Batch Calculator",
                "Order Calculator",
                "Shopping List",
                "Quick Reference",
            ]
        );
    }

    #[test]
    fn test_title_span_matches_columns() {
        assert_eq!(SheetKind::IngredientPrices.title_span(), 6);
        assert_eq!(SheetKind::OrderCalculator.title_span(), 9);
        assert_eq!(SheetKind::QuickReference.title_span(), 4);
    }

    #[test]
    fn test_recipe_last_row() {
        // 67行 → 4行目から70行目（0始まりで69）
        assert_eq!(recipe_last_row(67), 69);
        assert_eq!(recipe_last_row(0), recipe_cols::FIRST_DATA_ROW);
    }

    #[test]
    fn test_lookup_index() {
        assert_eq!(lookup_index(price_cols::UNIT_PRICE), 5);
        assert_eq!(lookup_index(recipe_cols::TOTAL_DOUGH), 4);
    }
}
