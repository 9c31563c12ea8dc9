//! 数式モデル
//!
//! セルに書き込む数式を型付きの式木（`Expr`）で組み立て、
//! `Display` でExcelの数式構文に変換する。
//!
//! ```text
//! Expr::cell(CellRef::new(4, 3)) / Expr::cell(CellRef::new(4, 2))  =>  =D5/C5
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul};

/// 0始まりの列番号をExcelの列記号に変換（0 = A, 25 = Z, 26 = AA）
pub fn column_letter(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// シート名を数式用に整形（必要なら '...' で囲む）
pub fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// セル参照（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
    pub row_abs: bool,
    pub col_abs: bool,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col, row_abs: false, col_abs: false }
    }

    /// $A$1 形式
    pub const fn absolute(self) -> Self {
        Self { row_abs: true, col_abs: true, ..self }
    }

    /// A$1 形式
    pub const fn lock_row(self) -> Self {
        Self { row_abs: true, ..self }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_mark = if self.col_abs { "$" } else { "" };
        let row_mark = if self.row_abs { "$" } else { "" };
        write!(f, "{}{}{}{}", col_mark, column_letter(self.col), row_mark, self.row + 1)
    }
}

/// 範囲の形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// A4:A70
    Cells(CellRef, CellRef),
    /// A:B（列全体）
    Columns(u16, u16),
}

/// 範囲参照（シート名付き可）
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRef {
    pub sheet: Option<String>,
    pub area: Area,
}

impl RangeRef {
    pub fn cells(first: CellRef, last: CellRef) -> Self {
        Self { sheet: None, area: Area::Cells(first, last) }
    }

    pub fn columns(first: u16, last: u16) -> Self {
        Self { sheet: None, area: Area::Columns(first, last) }
    }

    pub fn column(col: u16) -> Self {
        Self::columns(col, col)
    }

    pub fn on(mut self, sheet: &str) -> Self {
        self.sheet = Some(sheet.to_string());
        self
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "{}!", quote_sheet_name(sheet))?;
        }
        match self.area {
            Area::Cells(first, last) => write!(f, "{}:{}", first, last),
            Area::Columns(first, last) => {
                write!(f, "{}:{}", column_letter(first), column_letter(last))
            }
        }
    }
}

/// 二項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Mul,
    Div,
    Eq,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "=",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinOp::Eq => 1,
            BinOp::Add => 2,
            BinOp::Mul | BinOp::Div => 3,
        }
    }

    /// 右辺が同順位のとき括弧が要るか
    fn right_needs_group(self) -> bool {
        !matches!(self, BinOp::Add | BinOp::Mul)
    }
}

/// ワークシート関数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    If,
    IfError,
    Or,
    VLookup,
    SumIfs,
    SumProduct,
    Sum,
    Round,
    RoundUp,
    Index,
    Match,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Func::If => "IF",
            Func::IfError => "IFERROR",
            Func::Or => "OR",
            Func::VLookup => "VLOOKUP",
            Func::SumIfs => "SUMIFS",
            Func::SumProduct => "SUMPRODUCT",
            Func::Sum => "SUM",
            Func::Round => "ROUND",
            Func::RoundUp => "ROUNDUP",
            Func::Index => "INDEX",
            Func::Match => "MATCH",
        }
    }
}

/// 数式の式木
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Text(String),
    Bool(bool),
    Cell(CellRef),
    Range(RangeRef),
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { func: Func, args: Vec<Expr> },
    /// 明示的な括弧
    Group(Box<Expr>),
}

impl Expr {
    pub fn num(value: impl Into<f64>) -> Self {
        Expr::Number(value.into())
    }

    /// 空文字列 ""
    pub fn blank() -> Self {
        Expr::Text(String::new())
    }

    pub fn cell(cell: CellRef) -> Self {
        Expr::Cell(cell)
    }

    pub fn group(self) -> Self {
        Expr::Group(Box::new(self))
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn call(func: Func, args: Vec<Expr>) -> Self {
        Expr::Call { func, args }
    }

    pub fn equals(self, other: Expr) -> Self {
        Expr::binary(BinOp::Eq, self, other)
    }

    /// x=""
    pub fn is_blank(self) -> Self {
        self.equals(Expr::blank())
    }

    /// 先頭に = を付けた数式文字列
    pub fn to_formula(&self) -> String {
        format!("={}", self)
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Number(n) if *n < 0.0 => 2,
            _ => u8::MAX,
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, group: bool) -> fmt::Result {
        if group {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", format_number(*n)),
            Expr::Text(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            Expr::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Expr::Cell(cell) => write!(f, "{}", cell),
            Expr::Range(range) => write!(f, "{}", range),
            Expr::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                lhs.write_operand(f, lhs.precedence() < prec)?;
                write!(f, "{}", op.symbol())?;
                let rhs_prec = rhs.precedence();
                rhs.write_operand(f, rhs_prec < prec || (rhs_prec == prec && op.right_needs_group()))
            }
            Expr::Call { func, args } => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Group(inner) => write!(f, "({})", inner),
        }
    }
}

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::binary(BinOp::Add, self, rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::binary(BinOp::Mul, self, rhs)
    }
}

impl Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::binary(BinOp::Div, self, rhs)
    }
}

impl From<CellRef> for Expr {
    fn from(cell: CellRef) -> Self {
        Expr::cell(cell)
    }
}

impl From<RangeRef> for Expr {
    fn from(range: RangeRef) -> Self {
        Expr::Range(range)
    }
}

/// 関数呼び出しのショートカット
pub mod fx {
    use super::{Expr, Func};

    pub fn if_(cond: Expr, then: Expr, otherwise: Expr) -> Expr {
        Expr::call(Func::If, vec![cond, then, otherwise])
    }

    pub fn iferror(value: Expr, fallback: Expr) -> Expr {
        Expr::call(Func::IfError, vec![value, fallback])
    }

    pub fn or(conds: Vec<Expr>) -> Expr {
        Expr::call(Func::Or, conds)
    }

    /// 完全一致のVLOOKUP（第4引数 FALSE）
    pub fn vlookup(key: Expr, table: Expr, col_index: u32) -> Expr {
        Expr::call(Func::VLookup, vec![key, table, Expr::num(col_index), Expr::Bool(false)])
    }

    pub fn sumifs(sum_range: Expr, criteria: Vec<(Expr, Expr)>) -> Expr {
        let mut args = vec![sum_range];
        for (range, criterion) in criteria {
            args.push(range);
            args.push(criterion);
        }
        Expr::call(Func::SumIfs, args)
    }

    pub fn sumproduct(array: Expr) -> Expr {
        Expr::call(Func::SumProduct, vec![array])
    }

    pub fn sum(range: Expr) -> Expr {
        Expr::call(Func::Sum, vec![range])
    }

    pub fn round(value: Expr, digits: i32) -> Expr {
        Expr::call(Func::Round, vec![value, Expr::num(digits)])
    }

    pub fn roundup(value: Expr, digits: i32) -> Expr {
        Expr::call(Func::RoundUp, vec![value, Expr::num(digits)])
    }

    pub fn index(array: Expr, row: Expr) -> Expr {
        Expr::call(Func::Index, vec![array, row])
    }

    /// 完全一致のMATCH（第3引数 0）
    pub fn match_exact(value: Expr, array: Expr) -> Expr {
        Expr::call(Func::Match, vec![value, array, Expr::num(0)])
    }
}


#[cfg(test)]
mod tests {
    use super::eval::{evaluate, Value};
    use super::*;
    use std::collections::HashMap;

    const RECIPES: &str = "Recipe Database";

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(7), "H");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Prices"), "Prices");
        assert_eq!(quote_sheet_name("Recipe Database"), "'Recipe Database'");
        assert_eq!(quote_sheet_name("Baker's List"), "'Baker''s List'");
        assert_eq!(quote_sheet_name("2024"), "'2024'");
    }

    #[test]
    fn test_cell_ref_anchoring() {
        let cell = CellRef::new(3, 1);
        assert_eq!(cell.to_string(), "B4");
        assert_eq!(cell.absolute().to_string(), "$B$4");
        assert_eq!(cell.lock_row().to_string(), "B$4");
    }

    #[test]
    fn test_range_display() {
        assert_eq!(RangeRef::columns(0, 1).on(RECIPES).to_string(), "'Recipe Database'!A:B");
        assert_eq!(RangeRef::column(5).to_string(), "F:F");
        let range = RangeRef::cells(CellRef::new(3, 0).lock_row(), CellRef::new(99, 0).lock_row());
        assert_eq!(range.on(RECIPES).to_string(), "'Recipe Database'!A$4:A$100");
    }

    #[test]
    fn test_price_per_unit_formula() {
        let expr = Expr::cell(CellRef::new(4, 3)) / Expr::cell(CellRef::new(4, 2));
        assert_eq!(expr.to_formula(), "=D5/C5");
    }

    #[test]
    fn test_precedence_minimal_parentheses() {
        let a = || Expr::cell(CellRef::new(0, 0));
        let b = || Expr::cell(CellRef::new(0, 1));
        let c = || Expr::cell(CellRef::new(0, 2));

        assert_eq!((a() + b() * c()).to_string(), "A1+B1*C1");
        assert_eq!(((a() + b()) * c()).to_string(), "(A1+B1)*C1");
        assert_eq!((a() / (b() / c())).to_string(), "A1/(B1/C1)");
        assert_eq!((a() + (b() + c())).to_string(), "A1+B1+C1");
        assert_eq!((a() / (b() * c())).to_string(), "A1/(B1*C1)");
        assert_eq!((a().equals(b()) * c().is_blank()).to_string(), "(A1=B1)*(C1=\"\")");
    }

    #[test]
    fn test_explicit_group_is_kept() {
        let expr = (Expr::cell(CellRef::new(4, 1)) * Expr::cell(CellRef::new(5, 1))).group()
            / (Expr::cell(CellRef::new(3, 4)) * Expr::cell(CellRef::new(4, 4)));
        assert_eq!(expr.to_string(), "(B5*B6)/(E4*E5)");
    }

    #[test]
    fn test_text_literal_escaping() {
        assert_eq!(Expr::Text("say \"hi\"".into()).to_string(), "\"say \"\"hi\"\"\"");
        assert_eq!(Expr::blank().to_string(), "\"\"");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(Expr::num(1).to_string(), "1");
        assert_eq!(Expr::num(0.5).to_string(), "0.5");
        assert_eq!(Expr::num(-2).to_string(), "-2");
    }

    #[test]
    fn test_lookup_functions() {
        let key = Expr::cell(CellRef::new(3, 1));
        let expr = fx::iferror(
            fx::vlookup(key, RangeRef::columns(0, 1).on(RECIPES).into(), 2),
            Expr::blank(),
        );
        assert_eq!(
            expr.to_formula(),
            "=IFERROR(VLOOKUP(B4,'Recipe Database'!A:B,2,FALSE),\"\")"
        );
    }

    #[test]
    fn test_sumifs_pairs() {
        let expr = fx::sumifs(
            RangeRef::column(5).on(RECIPES).into(),
            vec![
                (RangeRef::column(0).on(RECIPES).into(), CellRef::new(3, 1).absolute().into()),
                (RangeRef::column(4).on(RECIPES).into(), CellRef::new(8, 0).into()),
            ],
        );
        assert_eq!(
            expr.to_string(),
            "SUMIFS('Recipe Database'!F:F,'Recipe Database'!A:A,$B$4,'Recipe Database'!E:E,A9)"
        );
    }

    #[test]
    fn test_eval_roundup_packages() {
        let expr = fx::roundup(Expr::cell(CellRef::new(4, 1)) / Expr::cell(CellRef::new(4, 3)), 0);
        let cells = HashMap::from([
            ("B5".to_string(), Value::Number(500.0)),
            ("D5".to_string(), Value::Number(454.0)),
        ]);
        assert_eq!(evaluate(&expr, &cells), Value::Number(2.0));

        let exact = HashMap::from([
            ("B5".to_string(), Value::Number(908.0)),
            ("D5".to_string(), Value::Number(454.0)),
        ]);
        assert_eq!(evaluate(&expr, &exact), Value::Number(2.0));
    }

    #[test]
    fn test_eval_sum_skips_text_cells() {
        let expr = fx::sum(RangeRef::cells(CellRef::new(0, 0), CellRef::new(3, 0)).into());
        let cells = HashMap::from([
            ("A1".to_string(), Value::Number(2.5)),
            ("A2".to_string(), Value::Text(String::new())),
            ("A3".to_string(), Value::Text("n/a".into())),
            ("A4".to_string(), Value::Number(4.0)),
        ]);
        assert_eq!(evaluate(&expr, &cells), Value::Number(6.5));
        assert_eq!(evaluate(&expr, &HashMap::new()), Value::Number(0.0));
    }

    #[test]
    fn test_eval_sum_over_other_sheet_is_unsupported() {
        let expr = fx::sum(RangeRef::column(0).on(RECIPES).into());
        assert_eq!(evaluate(&expr, &HashMap::new()), Value::Error);
    }

    #[test]
    fn test_eval_iferror_masks_division_by_zero() {
        let expr = fx::iferror(Expr::num(1) / Expr::cell(CellRef::new(0, 0)), Expr::num(0));
        assert_eq!(evaluate(&expr, &HashMap::new()), Value::Number(0.0));
    }
}
