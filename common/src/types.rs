//! カタログの型定義
//!
//! - Ingredient: 材料価格マスタの1行
//! - Recipe / LineItem: レシピと材料明細（正規化された形）
//! - RecipeRow: Recipe Database シートに書き出す非正規化ビュー
//! - ReferenceEntry: Quick Reference シートの1行

use serde::{Deserialize, Serialize};
use std::fmt;

/// 材料（価格マスタ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// 材料名（一意キー）
    pub name: String,
    pub unit: String,
    /// 1パッケージあたりの量（unit単位）
    pub package_size: f64,
    /// パッケージ価格（$）
    pub package_price: f64,
    #[serde(default)]
    pub notes: String,
}

/// レシピの材料明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub ingredient: String,
    pub amount: f64,
    pub unit: String,
    /// Wet / Dry / Mix-in / Topping / Rolling（自由文字列）
    pub category: String,
}

/// Recipe Database の行の配色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowTheme {
    /// 背景色（"fff3e0" 形式）
    pub fill: String,
    /// 文字色を白にする
    #[serde(default)]
    pub light_text: bool,
}

/// レシピ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    /// 基本レシピの出来上がり枚数
    pub base_yield: u32,
    /// 1枚あたりのグラム数
    pub base_size_g: f64,
    /// 生地の総量（宣言値。明細からは計算しない）
    pub total_dough_g: f64,
    #[serde(default)]
    pub theme: Option<RowTheme>,
    pub items: Vec<LineItem>,
}

impl Recipe {
    /// 非正規化行を生成（サマリ項目を明細ごとに繰り返す）
    pub fn rows(&self) -> impl Iterator<Item = RecipeRow<'_>> + '_ {
        self.items.iter().map(move |item| RecipeRow { recipe: self, item })
    }

    /// グラム単位の明細量の合計
    pub fn mass_total_g(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.unit == "g")
            .map(|item| item.amount)
            .sum()
    }
}

/// Recipe Database の1行（Recipe × LineItem の結合ビュー）
#[derive(Debug, Clone, Copy)]
pub struct RecipeRow<'a> {
    pub recipe: &'a Recipe,
    pub item: &'a LineItem,
}

/// Quick Reference の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    pub cookie: String,
    pub size_range: String,
    pub oven_temp: String,
    pub bake_time: String,
}

/// Batch Calculator / Shopping List に並べる材料の選び方
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientSelection {
    /// カタログ定義の固定リスト
    #[default]
    Fixed,
    /// レシピで使われている全材料（初出順）
    Used,
}

impl std::str::FromStr for IngredientSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(IngredientSelection::Fixed),
            "used" | "all" => Ok(IngredientSelection::Used),
            _ => Err(format!("Unknown ingredient selection: {}. Use fixed or used", s)),
        }
    }
}

impl fmt::Display for IngredientSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngredientSelection::Fixed => write!(f, "fixed"),
            IngredientSelection::Used => write!(f, "used"),
        }
    }
}
