//! Recipe Database シート
//!
//! Recipe × LineItem の結合ビューを1明細1行で書き出す。
//! サマリ項目（枚数・サイズ・生地総量）は同じレシピの全行に繰り返す。

use crate::error::Result;
use crate::export::excel_core::{SheetContext, SheetWriter};
use crate::layout::{recipe_cols::*, SheetKind};
use crate::style::StyleToken;

const KIND: SheetKind = SheetKind::RecipeDatabase;

const HEADERS: [&str; 8] = [
    "Recipe Name",
    "Base Yield",
    "Base Size (g)",
    "Total Dough (g)",
    "Ingredient",
    "Amount",
    "Unit",
    "Category",
];

pub fn build(w: &mut SheetWriter<'_>, ctx: &SheetContext<'_>) -> Result<()> {
    w.title(KIND, &format!("🍪 {} - RECIPE DATABASE", ctx.options.brand))?;
    w.header_row(HEADER_ROW, &HEADERS)?;

    let mut row = FIRST_DATA_ROW;
    for recipe in &ctx.catalog.recipes {
        let style = StyleToken::recipe_row(recipe.theme.as_ref())?;
        for line in recipe.rows() {
            w.text(row, NAME, &line.recipe.name, style)?;
            w.number(row, BASE_YIELD, line.recipe.base_yield as f64, style)?;
            w.number(row, BASE_SIZE, line.recipe.base_size_g, style)?;
            w.number(row, TOTAL_DOUGH, line.recipe.total_dough_g, style)?;
            w.text(row, INGREDIENT, &line.item.ingredient, style)?;
            w.number(row, AMOUNT, line.item.amount, style)?;
            w.text(row, UNIT, &line.item.unit, style)?;
            w.text(row, CATEGORY, &line.item.category, style)?;
            row += 1;
        }
    }

    Ok(())
}
