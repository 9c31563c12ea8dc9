//! Order Calculator シート
//!
//! 固定数の注文行。各行でレシピ・数量・サイズを選び、生地量・倍率・概算コストを出す。

use crate::error::Result;
use crate::export::excel_core::{SheetContext, SheetWriter};
use crate::formula::{fx, CellRef, Expr, RangeRef};
use crate::layout::{price_cols, recipe_cols, SheetKind};
use crate::style::StyleToken;

use super::{price_lookup, recipe_extent, recipe_lookup};

const KIND: SheetKind = SheetKind::OrderCalculator;

pub const HEADER_ROW: u32 = 3;
pub const FIRST_LINE_ROW: u32 = 4;

const COL_NUMBER: u16 = 0;
const COL_COOKIE: u16 = 1;
const COL_QTY: u16 = 2;
const COL_SIZE: u16 = 3;
const COL_DOUGH: u16 = 4;
const COL_SCALE: u16 = 5;
const COL_COST: u16 = 6;
const COL_PER_COOKIE: u16 = 7;
const COL_NOTES: u16 = 8;

const HEADERS: [&str; 9] = [
    "#",
    "Cookie Type",
    "Qty",
    "Size (g)",
    "Total Dough (g)",
    "Scale Factor",
    "Est. Cost ($)",
    "Cost/Cookie",
    "Notes",
];

fn at(row: u32, col: u16) -> Expr {
    Expr::cell(CellRef::new(row, col))
}

pub fn last_line_row(order_lines: u32) -> u32 {
    FIRST_LINE_ROW + order_lines.max(1) - 1
}

/// 合計行（注文行の下に空行を1行挟む）
pub fn totals_row(order_lines: u32) -> u32 {
    last_line_row(order_lines) + 2
}

pub fn dough_formula(row: u32) -> Expr {
    fx::if_(at(row, COL_QTY).is_blank(), Expr::blank(), at(row, COL_QTY) * at(row, COL_SIZE))
}

/// 生地量 ÷ レシピの生地総量
pub fn scale_formula(row: u32) -> Expr {
    fx::iferror(
        fx::if_(
            at(row, COL_COOKIE).is_blank(),
            Expr::blank(),
            at(row, COL_DOUGH) / recipe_lookup(at(row, COL_COOKIE), recipe_cols::TOTAL_DOUGH),
        ),
        Expr::blank(),
    )
}

/// 倍率 × Σ(明細量 × 単価)（配列数式）
pub fn cost_formula(ctx: &SheetContext<'_>, row: u32) -> Expr {
    let matches = recipe_extent(ctx, recipe_cols::NAME, false).equals(at(row, COL_COOKIE));
    let amounts = recipe_extent(ctx, recipe_cols::AMOUNT, false);
    let prices = price_lookup(
        recipe_extent(ctx, recipe_cols::INGREDIENT, false),
        price_cols::UNIT_PRICE,
    );
    let base_cost = fx::sumproduct(matches * amounts * prices);

    fx::iferror(
        fx::if_(at(row, COL_SCALE).is_blank(), Expr::blank(), at(row, COL_SCALE) * base_cost),
        Expr::blank(),
    )
}

pub fn per_cookie_formula(row: u32) -> Expr {
    fx::if_(
        fx::or(vec![at(row, COL_COST).is_blank(), at(row, COL_QTY).is_blank()]),
        Expr::blank(),
        at(row, COL_COST) / at(row, COL_QTY),
    )
}

/// 注文行だけを合計する
pub fn column_total_formula(col: u16, order_lines: u32) -> Expr {
    let first = CellRef::new(FIRST_LINE_ROW, col);
    let last = CellRef::new(last_line_row(order_lines), col);
    fx::sum(RangeRef::cells(first, last).into())
}

pub fn build(w: &mut SheetWriter<'_>, ctx: &SheetContext<'_>) -> Result<()> {
    w.title(KIND, &format!("🍪 {} - ORDER CALCULATOR", ctx.options.brand))?;
    w.subtitle(
        KIND,
        "Add multiple orders. Each row calculates batches needed and estimated ingredient cost.",
    )?;
    w.header_row(HEADER_ROW, &HEADERS)?;

    let order_lines = ctx.options.order_lines.max(1);
    for i in 0..order_lines {
        let row = FIRST_LINE_ROW + i;
        w.number(row, COL_NUMBER, (i + 1) as f64, StyleToken::Cell)?;
        w.blank(row, COL_COOKIE, StyleToken::Input)?;
        w.blank(row, COL_QTY, StyleToken::Input)?;
        w.blank(row, COL_SIZE, StyleToken::Input)?;
        w.formula(row, COL_DOUGH, &dough_formula(row), StyleToken::Integer)?;
        w.formula(row, COL_SCALE, &scale_formula(row), StyleToken::Ratio)?;
        w.array_formula(row, COL_COST, &cost_formula(ctx, row), StyleToken::Money)?;
        w.formula(row, COL_PER_COOKIE, &per_cookie_formula(row), StyleToken::Money)?;
        w.blank(row, COL_NOTES, StyleToken::Cell)?;
    }

    w.dropdown(
        FIRST_LINE_ROW,
        last_line_row(order_lines),
        COL_COOKIE,
        &ctx.recipe_names,
        Some(("Invalid Cookie Type", "Please select a valid cookie type")),
    )?;

    let totals = totals_row(order_lines);
    for col in 0..KIND.title_span() {
        match col {
            COL_NUMBER => w.text(totals, col, "TOTALS", StyleToken::TotalCell)?,
            COL_QTY => w.formula(
                totals,
                col,
                &column_total_formula(COL_QTY, order_lines),
                StyleToken::TotalCell,
            )?,
            COL_DOUGH => w.formula(
                totals,
                col,
                &column_total_formula(COL_DOUGH, order_lines),
                StyleToken::TotalInteger,
            )?,
            COL_COST => w.formula(
                totals,
                col,
                &column_total_formula(COL_COST, order_lines),
                StyleToken::TotalCurrency,
            )?,
            _ => w.blank(totals, col, StyleToken::TotalCell)?,
        }
    }

    Ok(())
}
