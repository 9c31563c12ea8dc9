//! 材料・レシピ・参照表のカタログ
//!
//! 組み込みカタログ（Midnight Dough の6レシピ）と、
//! JSONファイルからの読み込みを提供する。

use crate::error::{Error, Result};
use crate::types::{
    Ingredient, IngredientSelection, LineItem, Recipe, RecipeRow, ReferenceEntry, RowTheme,
};
use serde::{Deserialize, Serialize};

/// カタログ全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub reference: Vec<ReferenceEntry>,
    /// Batch Calculator / Shopping List の固定材料リスト
    #[serde(default)]
    pub calculator_ingredients: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        if catalog.recipes.is_empty() {
            return Err(Error::Config("catalog has no recipes".into()));
        }
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }

    /// Recipe Database の全行（レシピ順・明細順）
    pub fn recipe_rows(&self) -> impl Iterator<Item = RecipeRow<'_>> + '_ {
        self.recipes.iter().flat_map(|r| r.rows())
    }

    pub fn recipe_row_count(&self) -> usize {
        self.recipes.iter().map(|r| r.items.len()).sum()
    }

    /// ドロップダウン用のレシピ名（重複除去・初出順）
    pub fn recipe_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for recipe in &self.recipes {
            if !names.contains(&recipe.name.as_str()) {
                names.push(&recipe.name);
            }
        }
        names
    }

    /// レシピで使われている材料名（重複除去・初出順）
    pub fn used_ingredients(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in self.recipe_rows() {
            if !names.contains(&row.item.ingredient.as_str()) {
                names.push(&row.item.ingredient);
            }
        }
        names
    }

    /// 計算シートに並べる材料
    ///
    /// 固定リストが空のカタログでは使用材料に切り替える。
    pub fn calculator_list(&self, selection: IngredientSelection) -> Vec<String> {
        match selection {
            IngredientSelection::Fixed if !self.calculator_ingredients.is_empty() => {
                self.calculator_ingredients.clone()
            }
            _ => self.used_ingredients().into_iter().map(String::from).collect(),
        }
    }

    /// 組み込みカタログ
    pub fn builtin() -> Self {
        Self {
            ingredients: builtin_ingredients(),
            recipes: builtin_recipes(),
            reference: builtin_reference(),
            calculator_ingredients: CALCULATOR_INGREDIENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Batch Calculator / Shopping List の固定材料リスト
///
/// 価格マスタの全材料ではない（Vegetable Shortening などは含まれない）。
pub const CALCULATOR_INGREDIENTS: [&str; 26] = [
    "Unsalted Butter", "Granulated Sugar", "Brown Sugar (Light)", "Brown Sugar (Dark)",
    "Eggs (large)", "Egg Yolk", "Vanilla Extract", "Sour Cream", "Cream Cheese",
    "All-Purpose Flour", "Cornstarch", "Dutch-Process Cocoa", "Old-Fashioned Oats",
    "Baking Powder", "Baking Soda", "Cream of Tartar",
    "Ground Cinnamon", "Salt (Kosher)", "Flaky Sea Salt", "Espresso Powder",
    "Chocolate Chips", "Dark Chocolate Chunks", "Raisins", "Walnuts (chopped)",
    "Lemon Juice (fresh)", "Lemon Zest",
];

fn builtin_ingredients() -> Vec<Ingredient> {
    const DATA: [(&str, &str, f64, f64, &str); 31] = [
        ("Unsalted Butter", "g", 454.0, 5.99, "Standard 1lb block"),
        ("Vegetable Shortening", "g", 1360.0, 6.49, "Crisco 48oz"),
        ("Granulated Sugar", "g", 1814.0, 4.29, "4lb bag"),
        ("Brown Sugar (Light)", "g", 907.0, 3.99, "2lb bag"),
        ("Brown Sugar (Dark)", "g", 907.0, 3.99, "2lb bag"),
        ("Powdered Sugar", "g", 907.0, 2.99, "2lb bag"),
        ("All-Purpose Flour", "g", 2268.0, 4.49, "5lb bag"),
        ("Cornstarch", "g", 454.0, 2.99, "1lb box"),
        ("Dutch-Process Cocoa", "g", 227.0, 8.99, "8oz premium"),
        ("Old-Fashioned Oats", "g", 1134.0, 4.99, "40oz container"),
        ("Baking Powder", "g", 283.0, 3.49, "10oz can"),
        ("Baking Soda", "g", 454.0, 1.99, "1lb box"),
        ("Cream of Tartar", "g", 85.0, 6.99, "3oz jar"),
        ("Eggs (large)", "each", 12.0, 4.99, "Dozen"),
        ("Egg Yolk", "each", 12.0, 4.99, "From dozen"),
        ("Sour Cream", "g", 454.0, 2.99, "16oz container"),
        ("Cream Cheese", "g", 227.0, 3.49, "8oz block"),
        ("Vanilla Extract", "g", 118.0, 8.99, "4oz pure vanilla"),
        ("Lemon Juice (fresh)", "tbsp", 3.0, 0.50, "Per lemon ~3tbsp"),
        ("Lemon Zest", "tbsp", 1.0, 0.17, "Per lemon ~1tbsp"),
        ("Lemon Extract", "g", 59.0, 4.99, "2oz bottle"),
        ("Espresso Powder", "g", 57.0, 7.99, "2oz jar"),
        ("Ground Cinnamon", "g", 68.0, 4.99, "2.4oz jar"),
        ("Nutmeg", "g", 62.0, 5.99, "2.2oz jar"),
        ("Salt (Kosher)", "g", 1361.0, 3.99, "3lb box"),
        ("Flaky Sea Salt", "g", 113.0, 6.99, "4oz Maldon"),
        ("Chocolate Chips", "g", 340.0, 4.99, "12oz bag"),
        ("Dark Chocolate Chunks", "g", 283.0, 6.99, "10oz premium"),
        ("Raisins", "g", 425.0, 4.49, "15oz box"),
        ("Walnuts (chopped)", "g", 227.0, 7.99, "8oz bag"),
        ("Pecans (chopped)", "g", 227.0, 9.99, "8oz bag"),
    ];

    DATA.iter()
        .map(|&(name, unit, package_size, package_price, notes)| Ingredient {
            name: name.into(),
            unit: unit.into(),
            package_size,
            package_price,
            notes: notes.into(),
        })
        .collect()
}

type ItemSpec = (&'static str, f64, &'static str, &'static str);

fn recipe(
    name: &str,
    base_yield: u32,
    base_size_g: f64,
    total_dough_g: f64,
    fill: &str,
    light_text: bool,
    items: &[ItemSpec],
) -> Recipe {
    Recipe {
        name: name.into(),
        base_yield,
        base_size_g,
        total_dough_g,
        theme: Some(RowTheme { fill: fill.into(), light_text }),
        items: items
            .iter()
            .map(|&(ingredient, amount, unit, category)| LineItem {
                ingredient: ingredient.into(),
                amount,
                unit: unit.into(),
                category: category.into(),
            })
            .collect(),
    }
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        recipe("Sugar Cookie", 24, 48.0, 1152.0, "fff3e0", false, &[
            ("Unsalted Butter", 170.0, "g", "Wet"),
            ("Granulated Sugar", 250.0, "g", "Wet"),
            ("Eggs (large)", 1.0, "each", "Wet"),
            ("Vanilla Extract", 8.0, "g", "Wet"),
            ("Sour Cream", 30.0, "g", "Wet"),
            ("All-Purpose Flour", 345.0, "g", "Dry"),
            ("Cornstarch", 8.0, "g", "Dry"),
            ("Baking Powder", 5.0, "g", "Dry"),
            ("Baking Soda", 3.0, "g", "Dry"),
            ("Salt (Kosher)", 4.0, "g", "Dry"),
            ("Granulated Sugar", 50.0, "g", "Rolling"),
        ]),
        recipe("Snickerdoodle", 24, 50.0, 1200.0, "fce4ec", false, &[
            ("All-Purpose Flour", 375.0, "g", "Dry"),
            ("Cream of Tartar", 6.0, "g", "Dry"),
            ("Baking Soda", 5.0, "g", "Dry"),
            ("Ground Cinnamon", 4.0, "g", "Dry"),
            ("Salt (Kosher)", 3.0, "g", "Dry"),
            ("Unsalted Butter", 226.0, "g", "Wet"),
            ("Granulated Sugar", 267.0, "g", "Wet"),
            ("Eggs (large)", 1.0, "each", "Wet"),
            ("Egg Yolk", 1.0, "each", "Wet"),
            ("Vanilla Extract", 8.0, "g", "Wet"),
            ("Granulated Sugar", 70.0, "g", "Topping"),
            ("Ground Cinnamon", 3.0, "g", "Topping"),
        ]),
        recipe("Dark Chocolate Chip", 10, 115.0, 1150.0, "3e2723", true, &[
            ("Unsalted Butter", 226.0, "g", "Wet"),
            ("Brown Sugar (Dark)", 220.0, "g", "Wet"),
            ("Granulated Sugar", 100.0, "g", "Wet"),
            ("Eggs (large)", 2.0, "each", "Wet"),
            ("Vanilla Extract", 8.0, "g", "Wet"),
            ("All-Purpose Flour", 280.0, "g", "Dry"),
            ("Dutch-Process Cocoa", 60.0, "g", "Dry"),
            ("Baking Soda", 5.0, "g", "Dry"),
            ("Salt (Kosher)", 4.0, "g", "Dry"),
            ("Espresso Powder", 2.0, "g", "Dry"),
            ("Dark Chocolate Chunks", 255.0, "g", "Mix-in"),
            ("Flaky Sea Salt", 2.0, "g", "Topping"),
        ]),
        recipe("Chocolate Chip", 48, 55.0, 2640.0, "8d6e63", false, &[
            ("Granulated Sugar", 300.0, "g", "Wet"),
            ("Brown Sugar (Light)", 400.0, "g", "Wet"),
            ("Unsalted Butter", 454.0, "g", "Wet"),
            ("Vanilla Extract", 26.0, "g", "Wet"),
            ("Eggs (large)", 4.0, "each", "Wet"),
            ("All-Purpose Flour", 750.0, "g", "Dry"),
            ("Baking Soda", 9.0, "g", "Dry"),
            ("Salt (Kosher)", 9.0, "g", "Dry"),
            ("Chocolate Chips", 1020.0, "g", "Mix-in"),
        ]),
        recipe("Lemon Sugar", 44, 30.0, 1320.0, "fffde7", false, &[
            ("All-Purpose Flour", 500.0, "g", "Dry"),
            ("Baking Soda", 5.0, "g", "Dry"),
            ("Baking Powder", 5.0, "g", "Dry"),
            ("Salt (Kosher)", 6.0, "g", "Dry"),
            ("Unsalted Butter", 454.0, "g", "Wet"),
            ("Granulated Sugar", 400.0, "g", "Wet"),
            ("Eggs (large)", 2.0, "each", "Wet"),
            ("Lemon Juice (fresh)", 4.0, "tbsp", "Wet"),
            ("Lemon Zest", 2.0, "tbsp", "Wet"),
            ("Vanilla Extract", 8.0, "g", "Wet"),
            ("Granulated Sugar", 100.0, "g", "Rolling"),
        ]),
        recipe("Oatmeal Raisin", 24, 50.0, 1200.0, "efebe9", false, &[
            ("Unsalted Butter", 226.0, "g", "Wet"),
            ("Brown Sugar (Light)", 200.0, "g", "Wet"),
            ("Granulated Sugar", 100.0, "g", "Wet"),
            ("Eggs (large)", 2.0, "each", "Wet"),
            ("Vanilla Extract", 13.0, "g", "Wet"),
            ("All-Purpose Flour", 190.0, "g", "Dry"),
            ("Baking Soda", 5.0, "g", "Dry"),
            ("Ground Cinnamon", 4.0, "g", "Dry"),
            ("Salt (Kosher)", 3.0, "g", "Dry"),
            ("Old-Fashioned Oats", 240.0, "g", "Mix-in"),
            ("Raisins", 190.0, "g", "Mix-in"),
            ("Walnuts (chopped)", 60.0, "g", "Mix-in"),
        ]),
    ]
}

fn builtin_reference() -> Vec<ReferenceEntry> {
    const DATA: [(&str, &str, &str, &str); 6] = [
        ("Sugar Cookie", "45-50g", "350°F (175°C)", "9-11 min"),
        ("Snickerdoodle", "40g (sm) / 70-80g (lg)", "375°F (190°C)", "10 min"),
        ("Dark Chocolate Chip", "110-120g", "375°F (190°C)", "12-14 min"),
        ("Chocolate Chip", "40-70g / 80-100g (lg)", "350°F (175°C)", "10-12 min"),
        ("Lemon Sugar", "30g / 45-55g (bakery)", "350°F (175°C)", "10-12 min"),
        ("Oatmeal Raisin", "45-55g", "350°F (175°C)", "11-13 min"),
    ];

    DATA.iter()
        .map(|&(cookie, size_range, oven_temp, bake_time)| ReferenceEntry {
            cookie: cookie.into(),
            size_range: size_range.into(),
            oven_temp: oven_temp.into(),
            bake_time: bake_time.into(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.ingredients.len(), 31);
        assert_eq!(catalog.recipes.len(), 6);
        assert_eq!(catalog.recipe_row_count(), 67);
        assert_eq!(catalog.reference.len(), 6);
        assert_eq!(catalog.calculator_ingredients.len(), 26);
    }

    #[test]
    fn test_ingredient_names_unique() {
        let catalog = Catalog::builtin();
        let mut names: Vec<&str> = catalog.ingredients.iter().map(|i| i.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), catalog.ingredients.len());
    }

    #[test]
    fn test_recipe_names_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.recipe_names(),
            vec![
                "Sugar Cookie",
                "Snickerdoodle",
                "Dark Chocolate Chip",
                "Chocolate Chip",
                "Lemon Sugar",
                "Oatmeal Raisin",
            ]
        );
    }

    #[test]
    fn test_recipe_rows_flatten_in_order() {
        let catalog = Catalog::builtin();
        let rows: Vec<_> = catalog.recipe_rows().collect();
        assert_eq!(rows[0].recipe.name, "Sugar Cookie");
        assert_eq!(rows[0].item.ingredient, "Unsalted Butter");
        assert_eq!(rows[11].recipe.name, "Snickerdoodle");
        assert_eq!(rows[11].item.ingredient, "All-Purpose Flour");
        assert_eq!(rows[66].item.ingredient, "Walnuts (chopped)");
        assert_eq!(rows[66].recipe.total_dough_g, 1200.0);
    }

    #[test]
    fn test_recipe_ingredients_exist_in_price_list() {
        let catalog = Catalog::builtin();
        for name in catalog.used_ingredients() {
            assert!(catalog.ingredient(name).is_some(), "価格マスタにない材料: {}", name);
        }
    }

    #[test]
    fn test_calculator_list_selection() {
        let catalog = Catalog::builtin();
        let fixed = catalog.calculator_list(IngredientSelection::Fixed);
        assert_eq!(fixed.first().map(String::as_str), Some("Unsalted Butter"));
        assert!(fixed.iter().any(|n| n == "Cream Cheese"));

        let used = catalog.calculator_list(IngredientSelection::Used);
        assert_eq!(used.len(), 25);
        assert!(!used.iter().any(|n| n == "Cream Cheese"));
    }

    #[test]
    fn test_from_json_roundtrip_builtin() {
        let catalog = Catalog::builtin();
        let json = catalog.to_json().expect("シリアライズ失敗");
        let restored = Catalog::from_json(&json).expect("デシリアライズ失敗");
        assert_eq!(restored, catalog);
    }

    #[test]
    fn test_from_json_rejects_empty_recipes() {
        let json = r#"{"ingredients": [], "recipes": []}"#;
        let result = Catalog::from_json(json);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_json_defaults_optional_sections() {
        let json = r#"{
            "ingredients": [
                {"name": "Unsalted Butter", "unit": "g", "packageSize": 454, "packagePrice": 5.99}
            ],
            "recipes": [{
                "name": "Butter Disc",
                "baseYield": 4,
                "baseSizeG": 25,
                "totalDoughG": 100,
                "items": [{"ingredient": "Unsalted Butter", "amount": 100, "unit": "g", "category": "Wet"}]
            }]
        }"#;

        let catalog = Catalog::from_json(json).expect("読み込み失敗");
        assert!(catalog.reference.is_empty());
        assert!(catalog.calculator_ingredients.is_empty());
        assert_eq!(catalog.ingredients[0].notes, "");
    }

    #[test]
    fn test_fixed_selection_without_list_uses_recipe_ingredients() {
        let mut catalog = Catalog::builtin();
        catalog.calculator_ingredients.clear();

        let fixed = catalog.calculator_list(IngredientSelection::Fixed);
        assert_eq!(fixed, catalog.calculator_list(IngredientSelection::Used));
        assert_eq!(fixed.len(), 25);
    }
}
