//! シートビルダー
//!
//! 各ビルダーは `SheetWriter` に対して固定座標へ値・数式・書式を書き込む。
//! 他シートへの参照はこのモジュールのヘルパー経由で組み立てる。

pub mod batch;
pub mod orders;
pub mod prices;
pub mod recipes;
pub mod reference;
pub mod shopping;

use crate::formula::{fx, CellRef, Expr, RangeRef};
use crate::layout::{lookup_index, price_cols, recipe_cols, recipe_last_row, SheetKind};

use super::excel_core::SheetContext;

/// 'Recipe Database'!F:F
pub(crate) fn recipe_column(col: u16) -> Expr {
    RangeRef::column(col).on(SheetKind::RecipeDatabase.name()).into()
}

/// 'Recipe Database'!A:{col}（VLOOKUP用の表）
pub(crate) fn recipe_table(last_col: u16) -> Expr {
    RangeRef::columns(recipe_cols::NAME, last_col).on(SheetKind::RecipeDatabase.name()).into()
}

/// Recipe Database のデータ範囲に限定した列（配列数式用）
///
/// `absolute_col` が真なら $A$4:$A$70、偽なら A$4:A$70。
pub(crate) fn recipe_extent(ctx: &SheetContext<'_>, col: u16, absolute_col: bool) -> Expr {
    let last = recipe_last_row(ctx.catalog.recipe_row_count());
    let anchor = |row: u32| {
        let cell = CellRef::new(row, col).lock_row();
        if absolute_col {
            cell.absolute()
        } else {
            cell
        }
    };
    RangeRef::cells(anchor(recipe_cols::FIRST_DATA_ROW), anchor(last))
        .on(SheetKind::RecipeDatabase.name())
        .into()
}

/// VLOOKUP(key,'Ingredient Prices'!A:{col},n,FALSE)
pub(crate) fn price_lookup(key: Expr, col: u16) -> Expr {
    let table = RangeRef::columns(price_cols::NAME, col).on(SheetKind::IngredientPrices.name());
    fx::vlookup(key, table.into(), lookup_index(col))
}

/// VLOOKUP(key,'Recipe Database'!A:{col},n,FALSE)
pub(crate) fn recipe_lookup(key: Expr, col: u16) -> Expr {
    fx::vlookup(key, recipe_table(col), lookup_index(col))
}
