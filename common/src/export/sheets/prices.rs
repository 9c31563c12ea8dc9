//! Ingredient Prices シート

use crate::error::Result;
use crate::export::excel_core::{SheetContext, SheetWriter};
use crate::formula::{CellRef, Expr};
use crate::layout::{price_cols::*, SheetKind};
use crate::style::StyleToken;

const KIND: SheetKind = SheetKind::IngredientPrices;

const HEADERS: [&str; 6] = [
    "Ingredient",
    "Unit",
    "Package Size",
    "Package Price ($)",
    "Price per Unit",
    "Notes",
];

/// 単価 = パッケージ価格 / パッケージ量
pub fn unit_price_formula(row: u32) -> Expr {
    Expr::cell(CellRef::new(row, PACKAGE_PRICE)) / Expr::cell(CellRef::new(row, PACKAGE_SIZE))
}

pub fn build(w: &mut SheetWriter<'_>, ctx: &SheetContext<'_>) -> Result<()> {
    w.title(KIND, &format!("🍪 {} - INGREDIENT PRICE DATABASE", ctx.options.brand))?;
    w.subtitle(KIND, "Edit Package Price - Price per Unit calculates automatically")?;
    w.header_row(HEADER_ROW, &HEADERS)?;

    for (i, ingredient) in ctx.catalog.ingredients.iter().enumerate() {
        let row = FIRST_DATA_ROW + i as u32;
        w.text(row, NAME, &ingredient.name, StyleToken::Cell)?;
        w.text(row, UNIT, &ingredient.unit, StyleToken::Cell)?;
        w.number(row, PACKAGE_SIZE, ingredient.package_size, StyleToken::Cell)?;
        w.number(row, PACKAGE_PRICE, ingredient.package_price, StyleToken::InputCurrency)?;
        w.formula(row, UNIT_PRICE, &unit_price_formula(row), StyleToken::UnitPriceHighlight)?;
        w.text(row, NOTES, &ingredient.notes, StyleToken::Cell)?;
    }

    Ok(())
}
