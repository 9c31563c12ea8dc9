//! Batch Calculator シート
//!
//! 選択したレシピを数量・サイズに合わせて拡大縮小し、材料ごとの量とコストを出す。
//!
//! ```text
//! scale = (数量 × サイズ) / (基本枚数 × 基本サイズ)
//! ```

use crate::error::Result;
use crate::export::excel_core::{SheetContext, SheetWriter};
use crate::formula::{fx, CellRef, Expr, RangeRef};
use crate::layout::{price_cols, recipe_cols, SheetKind};
use crate::style::StyleToken;

use super::{price_lookup, recipe_column, recipe_extent, recipe_lookup};

const KIND: SheetKind = SheetKind::BatchCalculator;

// 入力欄
pub const COOKIE_TYPE: CellRef = CellRef::new(3, 1);
pub const QUANTITY: CellRef = CellRef::new(4, 1);
pub const COOKIE_SIZE: CellRef = CellRef::new(5, 1);

// レシピから引く値
pub const BASE_YIELD: CellRef = CellRef::new(3, 4);
pub const BASE_SIZE: CellRef = CellRef::new(4, 4);
pub const SCALE_FACTOR: CellRef = CellRef::new(5, 4);

// サマリ
pub const TOTAL_DOUGH: CellRef = CellRef::new(3, 7);
pub const TOTAL_COST: CellRef = CellRef::new(4, 7);
pub const COST_PER_COOKIE: CellRef = CellRef::new(5, 7);

pub const TABLE_HEADER_ROW: u32 = 7;
pub const FIRST_LINE_ROW: u32 = 8;

const COL_INGREDIENT: u16 = 0;
const COL_BASE: u16 = 1;
const COL_UNIT: u16 = 2;
const COL_SCALED: u16 = 3;
const COL_PRICE: u16 = 4;
const COL_COST: u16 = 5;
const COL_CATEGORY: u16 = 6;

const HEADERS: [&str; 7] = [
    "Ingredient",
    "Base Amount",
    "Unit",
    "Scaled Amount",
    "Unit Price",
    "Ingredient Cost",
    "Category",
];

fn cell(c: CellRef) -> Expr {
    Expr::cell(c)
}

fn at(row: u32, col: u16) -> Expr {
    Expr::cell(CellRef::new(row, col))
}

/// 合計行（材料表の下に空行を1行挟む）
pub fn total_row(line_count: usize) -> u32 {
    FIRST_LINE_ROW + line_count as u32 + 1
}

pub fn base_yield_formula() -> Expr {
    fx::iferror(recipe_lookup(cell(COOKIE_TYPE), recipe_cols::BASE_YIELD), Expr::blank())
}

pub fn base_size_formula() -> Expr {
    fx::iferror(recipe_lookup(cell(COOKIE_TYPE), recipe_cols::BASE_SIZE), Expr::blank())
}

pub fn scale_factor_formula() -> Expr {
    fx::if_(
        fx::or(vec![
            cell(QUANTITY).is_blank(),
            cell(COOKIE_SIZE).is_blank(),
            cell(BASE_YIELD).is_blank(),
            cell(BASE_SIZE).is_blank(),
        ]),
        Expr::blank(),
        (cell(QUANTITY) * cell(COOKIE_SIZE)).group() / (cell(BASE_YIELD) * cell(BASE_SIZE)),
    )
}

pub fn total_dough_formula() -> Expr {
    fx::if_(
        fx::or(vec![cell(QUANTITY).is_blank(), cell(COOKIE_SIZE).is_blank()]),
        Expr::blank(),
        cell(QUANTITY) * cell(COOKIE_SIZE),
    )
}

pub fn total_cost_formula(line_count: usize) -> Expr {
    let total = at(total_row(line_count), COL_COST);
    fx::if_(total.clone().is_blank(), Expr::blank(), total)
}

pub fn cost_per_cookie_formula() -> Expr {
    fx::if_(
        fx::or(vec![cell(TOTAL_COST).is_blank(), cell(QUANTITY).is_blank()]),
        Expr::blank(),
        cell(TOTAL_COST) / cell(QUANTITY),
    )
}

/// 選択レシピ × 材料の明細量合計
pub fn base_amount_formula(row: u32) -> Expr {
    fx::iferror(
        fx::sumifs(
            recipe_column(recipe_cols::AMOUNT),
            vec![
                (recipe_column(recipe_cols::NAME), cell(COOKIE_TYPE.absolute())),
                (recipe_column(recipe_cols::INGREDIENT), at(row, COL_INGREDIENT)),
            ],
        ),
        Expr::num(0),
    )
}

pub fn unit_formula(row: u32) -> Expr {
    fx::iferror(price_lookup(at(row, COL_INGREDIENT), price_cols::UNIT), Expr::blank())
}

/// ROUND(base × scale, 1)
pub fn scaled_amount_formula(row: u32) -> Expr {
    let scale = cell(SCALE_FACTOR.absolute());
    fx::if_(
        fx::or(vec![scale.clone().is_blank(), at(row, COL_BASE).equals(Expr::num(0))]),
        Expr::blank(),
        fx::round(at(row, COL_BASE) * scale, 1),
    )
}

pub fn unit_price_formula(row: u32) -> Expr {
    fx::iferror(price_lookup(at(row, COL_INGREDIENT), price_cols::UNIT_PRICE), Expr::num(0))
}

pub fn line_cost_formula(row: u32) -> Expr {
    fx::if_(
        at(row, COL_SCALED).is_blank(),
        Expr::num(0),
        at(row, COL_SCALED) * at(row, COL_PRICE),
    )
}

/// 選択レシピでのその材料のカテゴリ（配列数式）
pub fn category_formula(ctx: &SheetContext<'_>, row: u32) -> Expr {
    let names = recipe_extent(ctx, recipe_cols::NAME, true);
    let ingredients = recipe_extent(ctx, recipe_cols::INGREDIENT, true);
    let categories = recipe_extent(ctx, recipe_cols::CATEGORY, true);
    let hit = names.equals(cell(COOKIE_TYPE.absolute()))
        * ingredients.equals(at(row, COL_INGREDIENT));
    fx::iferror(fx::index(categories, fx::match_exact(Expr::num(1), hit)), Expr::blank())
}

pub fn grand_total_formula(line_count: usize) -> Expr {
    let first = CellRef::new(FIRST_LINE_ROW, COL_COST);
    let last = CellRef::new(FIRST_LINE_ROW + line_count.max(1) as u32 - 1, COL_COST);
    fx::sum(RangeRef::cells(first, last).into())
}

fn write_inputs(w: &mut SheetWriter<'_>, ctx: &SheetContext<'_>) -> Result<()> {
    let labels = [
        (COOKIE_TYPE, "Cookie Type:"),
        (QUANTITY, "Quantity Needed:"),
        (COOKIE_SIZE, "Cookie Size (g):"),
    ];
    for (input, label) in labels {
        w.text(input.row, input.col - 1, label, StyleToken::Label)?;
        w.blank(input.row, input.col, StyleToken::Input)?;
    }
    w.dropdown(COOKIE_TYPE.row, COOKIE_TYPE.row, COOKIE_TYPE.col, &ctx.recipe_names, None)?;
    Ok(())
}

fn write_summary(w: &mut SheetWriter<'_>, line_count: usize) -> Result<()> {
    let calculated = [
        (BASE_YIELD, "Base Yield:", base_yield_formula(), StyleToken::Cell),
        (BASE_SIZE, "Base Size (g):", base_size_formula(), StyleToken::Cell),
        (SCALE_FACTOR, "Scale Factor:", scale_factor_formula(), StyleToken::ScaleFactor),
        (TOTAL_DOUGH, "Total Dough:", total_dough_formula(), StyleToken::Grams),
        (TOTAL_COST, "Total Cost:", total_cost_formula(line_count), StyleToken::Money),
        (COST_PER_COOKIE, "Cost/Cookie:", cost_per_cookie_formula(), StyleToken::Money),
    ];
    for (target, label, expr, style) in calculated {
        w.text(target.row, target.col - 1, label, StyleToken::Label)?;
        w.formula(target.row, target.col, &expr, style)?;
    }
    w.text(SCALE_FACTOR.row, SCALE_FACTOR.col + 1, "x base recipe", StyleToken::Hint)?;
    Ok(())
}

pub fn build(w: &mut SheetWriter<'_>, ctx: &SheetContext<'_>) -> Result<()> {
    w.title(KIND, "📊 BATCH CALCULATOR - Scale Any Recipe")?;
    w.subtitle(
        KIND,
        "Select cookie type, enter quantity & size. Ingredients scale automatically with costs!",
    )?;

    let line_count = ctx.ingredients.len();
    write_inputs(w, ctx)?;
    write_summary(w, line_count)?;

    w.header_row(TABLE_HEADER_ROW, &HEADERS)?;
    for (i, ingredient) in ctx.ingredients.iter().enumerate() {
        let row = FIRST_LINE_ROW + i as u32;
        w.text(row, COL_INGREDIENT, ingredient, StyleToken::Cell)?;
        w.formula(row, COL_BASE, &base_amount_formula(row), StyleToken::Amount)?;
        w.formula(row, COL_UNIT, &unit_formula(row), StyleToken::Cell)?;
        w.formula(row, COL_SCALED, &scaled_amount_formula(row), StyleToken::Scaled)?;
        w.formula(row, COL_PRICE, &unit_price_formula(row), StyleToken::UnitPrice)?;
        w.formula(row, COL_COST, &line_cost_formula(row), StyleToken::Money)?;
        w.array_formula(row, COL_CATEGORY, &category_formula(ctx, row), StyleToken::Cell)?;
    }

    let total = total_row(line_count);
    w.text(total, COL_PRICE, "TOTAL COST:", StyleToken::TotalLabel)?;
    w.formula(total, COL_COST, &grand_total_formula(line_count), StyleToken::TotalMoney)?;

    Ok(())
}
