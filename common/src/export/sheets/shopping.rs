//! Shopping List シート
//!
//! 必要量から購入パッケージ数（切り上げ）と購入額を出す。

use crate::error::Result;
use crate::export::excel_core::{SheetContext, SheetWriter};
use crate::formula::{fx, CellRef, Expr, RangeRef};
use crate::layout::{price_cols, SheetKind};
use crate::style::StyleToken;

use super::price_lookup;

const KIND: SheetKind = SheetKind::ShoppingList;

pub const HEADER_ROW: u32 = 3;
pub const FIRST_LINE_ROW: u32 = 4;

const COL_INGREDIENT: u16 = 0;
const COL_NEEDED: u16 = 1;
const COL_UNIT: u16 = 2;
const COL_PKG_SIZE: u16 = 3;
const COL_PACKAGES: u16 = 4;
const COL_PKG_PRICE: u16 = 5;
const COL_TOTAL: u16 = 6;
const COL_NOTES: u16 = 7;

const HEADERS: [&str; 8] = [
    "Ingredient",
    "Amount Needed",
    "Unit",
    "Pkg Size",
    "Pkgs to Buy",
    "Pkg Price",
    "Total Cost",
    "Notes",
];

fn at(row: u32, col: u16) -> Expr {
    Expr::cell(CellRef::new(row, col))
}

/// 総計行（材料表の直下）
pub fn grand_total_row(line_count: usize) -> u32 {
    FIRST_LINE_ROW + line_count as u32
}

fn lookup(row: u32, col: u16) -> Expr {
    fx::iferror(price_lookup(at(row, COL_INGREDIENT), col), Expr::blank())
}

pub fn unit_formula(row: u32) -> Expr {
    lookup(row, price_cols::UNIT)
}

pub fn package_size_formula(row: u32) -> Expr {
    lookup(row, price_cols::PACKAGE_SIZE)
}

pub fn package_price_formula(row: u32) -> Expr {
    lookup(row, price_cols::PACKAGE_PRICE)
}

/// ROUNDUP(必要量 / パッケージ量, 0)
pub fn packages_formula(row: u32) -> Expr {
    fx::iferror(
        fx::if_(
            at(row, COL_NEEDED).is_blank(),
            Expr::blank(),
            fx::roundup(at(row, COL_NEEDED) / at(row, COL_PKG_SIZE), 0),
        ),
        Expr::blank(),
    )
}

pub fn line_total_formula(row: u32) -> Expr {
    fx::if_(
        at(row, COL_PACKAGES).is_blank(),
        Expr::blank(),
        at(row, COL_PACKAGES) * at(row, COL_PKG_PRICE),
    )
}

pub fn grand_total_formula(line_count: usize) -> Expr {
    let first = CellRef::new(FIRST_LINE_ROW, COL_TOTAL);
    let last = CellRef::new(FIRST_LINE_ROW + line_count.max(1) as u32 - 1, COL_TOTAL);
    fx::sum(RangeRef::cells(first, last).into())
}

pub fn build(w: &mut SheetWriter<'_>, ctx: &SheetContext<'_>) -> Result<()> {
    w.title(KIND, "🛒 INGREDIENT SHOPPING LIST")?;
    w.subtitle(KIND, "Enter amounts needed → see packages to buy and total cost")?;
    w.header_row(HEADER_ROW, &HEADERS)?;

    for (i, ingredient) in ctx.ingredients.iter().enumerate() {
        let row = FIRST_LINE_ROW + i as u32;
        w.text(row, COL_INGREDIENT, ingredient, StyleToken::Cell)?;
        w.blank(row, COL_NEEDED, StyleToken::Input)?;
        w.formula(row, COL_UNIT, &unit_formula(row), StyleToken::Cell)?;
        w.formula(row, COL_PKG_SIZE, &package_size_formula(row), StyleToken::Cell)?;
        w.formula(row, COL_PACKAGES, &packages_formula(row), StyleToken::Cell)?;
        w.formula(row, COL_PKG_PRICE, &package_price_formula(row), StyleToken::Currency)?;
        w.formula(row, COL_TOTAL, &line_total_formula(row), StyleToken::Money)?;
        w.blank(row, COL_NOTES, StyleToken::Cell)?;
    }

    let line_count = ctx.ingredients.len();
    let total = grand_total_row(line_count);
    w.text(total, COL_PKG_PRICE, "GRAND TOTAL:", StyleToken::Label)?;
    w.formula(total, COL_TOTAL, &grand_total_formula(line_count), StyleToken::TotalCurrency)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::eval::{evaluate, Value};
    use std::collections::HashMap;

    #[test]
    fn test_lookup_formulas() {
        assert_eq!(
            unit_formula(4).to_formula(),
            "=IFERROR(VLOOKUP(A5,'Ingredient Prices'!A:B,2,FALSE),\"\")"
        );
        assert_eq!(
            package_size_formula(4).to_formula(),
            "=IFERROR(VLOOKUP(A5,'Ingredient Prices'!A:C,3,FALSE),\"\")"
        );
        assert_eq!(
            package_price_formula(4).to_formula(),
            "=IFERROR(VLOOKUP(A5,'Ingredient Prices'!A:D,4,FALSE),\"\")"
        );
    }

    #[test]
    fn test_packages_round_up() {
        assert_eq!(
            packages_formula(4).to_formula(),
            "=IFERROR(IF(B5=\"\",\"\",ROUNDUP(B5/D5,0)),\"\")"
        );

        let cells = HashMap::from([
            ("B5".to_string(), Value::Number(500.0)),
            ("D5".to_string(), Value::Number(454.0)),
        ]);
        assert_eq!(evaluate(&packages_formula(4), &cells), Value::Number(2.0));
    }

    #[test]
    fn test_packages_blank_and_unknown_ingredient() {
        // 必要量なし → 空
        assert_eq!(evaluate(&packages_formula(4), &HashMap::new()), Value::Text(String::new()));

        // 価格マスタにない材料（パッケージ量が空）→ 空
        let cells = HashMap::from([("B5".to_string(), Value::Number(100.0))]);
        assert_eq!(evaluate(&packages_formula(4), &cells), Value::Text(String::new()));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total_formula(4).to_formula(), "=IF(E5=\"\",\"\",E5*F5)");
        let cells = HashMap::from([
            ("E5".to_string(), Value::Number(2.0)),
            ("F5".to_string(), Value::Number(5.99)),
        ]);
        assert_eq!(evaluate(&line_total_formula(4), &cells), Value::Number(11.98));
    }

    #[test]
    fn test_grand_total_covers_every_line() {
        assert_eq!(grand_total_row(26), 30);
        assert_eq!(grand_total_formula(26).to_formula(), "=SUM(G5:G30)");
    }

    #[test]
    fn test_grand_total_sums_filled_lines() {
        // 必要量を入れた行だけ E*F が数値になる
        let mut cells = HashMap::new();
        for row in 5..=30 {
            cells.insert(format!("G{}", row), Value::Text(String::new()));
        }
        let filled = [(5, 2.0, 5.99), (12, 1.0, 4.49), (30, 3.0, 0.5)];
        let mut expected = 0.0;
        for (row, packages, price) in filled {
            let line = HashMap::from([
                (format!("E{}", row), Value::Number(packages)),
                (format!("F{}", row), Value::Number(price)),
            ]);
            let Value::Number(total) = evaluate(&line_total_formula(row - 1), &line) else {
                panic!("行{}の合計が数値ではない", row);
            };
            expected += total;
            cells.insert(format!("G{}", row), Value::Number(total));
        }

        let Value::Number(grand) = evaluate(&grand_total_formula(26), &cells) else {
            panic!("総計が数値ではない");
        };
        assert!((grand - expected).abs() < 1e-9);
        assert!((grand - 17.97).abs() < 1e-9);
    }
}
