//! スタイルトークン
//!
//! セルの役割（見出し・入力・計算・合計…）ごとに名前付きトークンを定義し、
//! 書式は `StyleToken::format()` で一か所から生成する。

use crate::error::{Error, Result};
use crate::types::RowTheme;

/// パレット
pub mod palette {
    pub const HEADER: u32 = 0x1A1A2E;
    pub const SUBHEADER: u32 = 0x16213E;
    pub const MONEY: u32 = 0xE8F5E9;
    pub const INPUT: u32 = 0xE3F2FD;
    pub const SCALED: u32 = 0xFFF3E0;
    pub const SCALE_HIGHLIGHT: u32 = 0xFFF9C4;
    pub const TOTAL: u32 = 0xC8E6C9;
    pub const HINT_TEXT: u32 = 0x666666;
    pub const WHITE: u32 = 0xFFFFFF;
    pub const BLACK: u32 = 0x000000;
}

/// 表示形式
pub mod num_format {
    pub const CURRENCY: &str = "$#,##0.00";
    pub const UNIT_PRICE: &str = "$#,##0.0000";
    pub const AMOUNT: &str = "#,##0.00";
    pub const SCALED: &str = "#,##0.0";
    pub const INTEGER: &str = "#,##0";
    pub const RATIO: &str = "0.00";
    pub const GRAMS: &str = "#,##0 \"g\"";
}

/// "fff3e0" / "#FFF3E0" 形式の色を解析
pub fn parse_hex_color(hex: &str) -> Result<u32> {
    let s = hex.strip_prefix('#').unwrap_or(hex);
    if s.len() != 6 {
        return Err(Error::InvalidColor(hex.to_string()));
    }
    u32::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(hex.to_string()))
}

/// セルの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    /// シートタイトル（結合セル）
    Title,
    /// タイトル下の説明
    Subtitle,
    /// 表の列見出し
    ColumnHeader,
    /// 入力欄の左ラベル
    Label,
    /// 補足（"x base recipe"）
    Hint,
    /// 罫線のみ
    Cell,
    /// 利用者が入力するセル
    Input,
    InputCurrency,
    /// 単価（$0.0000、背景あり）
    UnitPriceHighlight,
    UnitPrice,
    /// 金額（$0.00、背景あり）
    Money,
    Currency,
    Amount,
    Scaled,
    Integer,
    Ratio,
    ScaleFactor,
    Grams,
    /// 合計行ラベル（大）
    TotalLabel,
    /// 合計行の金額（大）
    TotalMoney,
    /// Order Calculator 合計行
    TotalCell,
    TotalInteger,
    TotalCurrency,
    /// Recipe Database のレシピ別配色行
    RecipeRow { fill: u32, light_text: bool },
}

impl StyleToken {
    /// レシピの配色からトークンを作る（配色なしは白背景）
    pub fn recipe_row(theme: Option<&RowTheme>) -> Result<Self> {
        match theme {
            Some(theme) => Ok(StyleToken::RecipeRow {
                fill: parse_hex_color(&theme.fill)?,
                light_text: theme.light_text,
            }),
            None => Ok(StyleToken::RecipeRow { fill: palette::WHITE, light_text: false }),
        }
    }
}

#[cfg(feature = "excel")]
mod excel {
    use super::{num_format, palette, StyleToken};
    use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

    fn bordered() -> Format {
        Format::new().set_border(FormatBorder::Thin)
    }

    impl StyleToken {
        pub fn format(self) -> Format {
            match self {
                StyleToken::Title => Format::new()
                    .set_bold()
                    .set_font_size(16)
                    .set_font_color(Color::RGB(palette::WHITE))
                    .set_background_color(Color::RGB(palette::HEADER))
                    .set_align(FormatAlign::Center),
                StyleToken::Subtitle => Format::new()
                    .set_italic()
                    .set_font_size(10)
                    .set_align(FormatAlign::Center),
                StyleToken::ColumnHeader => bordered()
                    .set_bold()
                    .set_font_size(12)
                    .set_font_color(Color::RGB(palette::WHITE))
                    .set_background_color(Color::RGB(palette::SUBHEADER))
                    .set_align(FormatAlign::Center),
                StyleToken::Label => Format::new().set_bold(),
                StyleToken::Hint => Format::new()
                    .set_italic()
                    .set_font_color(Color::RGB(palette::HINT_TEXT)),
                StyleToken::Cell => bordered(),
                StyleToken::Input => bordered().set_background_color(Color::RGB(palette::INPUT)),
                StyleToken::InputCurrency => bordered()
                    .set_background_color(Color::RGB(palette::INPUT))
                    .set_num_format(num_format::CURRENCY),
                StyleToken::UnitPriceHighlight => bordered()
                    .set_background_color(Color::RGB(palette::MONEY))
                    .set_num_format(num_format::UNIT_PRICE),
                StyleToken::UnitPrice => bordered().set_num_format(num_format::UNIT_PRICE),
                StyleToken::Money => bordered()
                    .set_background_color(Color::RGB(palette::MONEY))
                    .set_num_format(num_format::CURRENCY),
                StyleToken::Currency => bordered().set_num_format(num_format::CURRENCY),
                StyleToken::Amount => bordered().set_num_format(num_format::AMOUNT),
                StyleToken::Scaled => bordered()
                    .set_background_color(Color::RGB(palette::SCALED))
                    .set_num_format(num_format::SCALED),
                StyleToken::Integer => bordered().set_num_format(num_format::INTEGER),
                StyleToken::Ratio => bordered().set_num_format(num_format::RATIO),
                StyleToken::ScaleFactor => bordered()
                    .set_background_color(Color::RGB(palette::SCALE_HIGHLIGHT))
                    .set_num_format(num_format::RATIO),
                StyleToken::Grams => bordered().set_num_format(num_format::GRAMS),
                StyleToken::TotalLabel => Format::new().set_bold().set_font_size(12),
                StyleToken::TotalMoney => bordered()
                    .set_bold()
                    .set_font_size(12)
                    .set_background_color(Color::RGB(palette::TOTAL))
                    .set_num_format(num_format::CURRENCY),
                StyleToken::TotalCell => bordered().set_bold(),
                StyleToken::TotalInteger => bordered().set_bold().set_num_format(num_format::INTEGER),
                StyleToken::TotalCurrency => bordered()
                    .set_bold()
                    .set_background_color(Color::RGB(palette::TOTAL))
                    .set_num_format(num_format::CURRENCY),
                StyleToken::RecipeRow { fill, light_text } => {
                    let text = if light_text { palette::WHITE } else { palette::BLACK };
                    bordered()
                        .set_background_color(Color::RGB(fill))
                        .set_font_color(Color::RGB(text))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("fff3e0").unwrap(), 0xFFF3E0);
        assert_eq!(parse_hex_color("#3E2723").unwrap(), 0x3E2723);
        assert!(matches!(parse_hex_color("fff"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_hex_color("gggggg"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_recipe_row_token() {
        let theme = RowTheme { fill: "3e2723".into(), light_text: true };
        assert_eq!(
            StyleToken::recipe_row(Some(&theme)).unwrap(),
            StyleToken::RecipeRow { fill: 0x3E2723, light_text: true }
        );
        assert_eq!(
            StyleToken::recipe_row(None).unwrap(),
            StyleToken::RecipeRow { fill: palette::WHITE, light_text: false }
        );
    }
}
