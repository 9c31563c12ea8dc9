//! カタログの整合性レポート
//!
//! 生成を止めるための検証ではなく、オペレータ向けの情報表示に使う。

use crate::catalog::Catalog;

/// 明細のグラム合計と宣言された生地総量の比較
#[derive(Debug, Clone, PartialEq)]
pub struct DoughMassCheck {
    pub recipe: String,
    pub declared_g: f64,
    pub mass_items_g: f64,
    /// 個数・大さじ単位で合計に含めなかった明細数
    pub non_mass_items: usize,
}

impl DoughMassCheck {
    /// 明細合計 − 宣言値
    pub fn difference_g(&self) -> f64 {
        self.mass_items_g - self.declared_g
    }
}

pub fn dough_mass_checks(catalog: &Catalog) -> Vec<DoughMassCheck> {
    catalog
        .recipes
        .iter()
        .map(|recipe| DoughMassCheck {
            recipe: recipe.name.clone(),
            declared_g: recipe.total_dough_g,
            mass_items_g: recipe.mass_total_g(),
            non_mass_items: recipe.items.iter().filter(|i| i.unit != "g").count(),
        })
        .collect()
}

/// 計算シートの材料リストがレシピをどこまでカバーしているか
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    /// レシピで使われているがリストにない材料（コストが集計から漏れる）
    pub missing: Vec<String>,
    /// リストにあるがどのレシピでも使われていない材料
    pub unused: Vec<String>,
    /// 価格マスタにない材料（VLOOKUPが失敗する）
    pub unpriced: Vec<String>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.unpriced.is_empty()
    }
}

pub fn calculator_coverage(catalog: &Catalog, list: &[String]) -> Coverage {
    let used = catalog.used_ingredients();

    let missing = used
        .iter()
        .filter(|name| !list.iter().any(|l| l == *name))
        .map(|name| name.to_string())
        .collect();

    let unused = list
        .iter()
        .filter(|name| !used.contains(&name.as_str()))
        .cloned()
        .collect();

    let mut unpriced: Vec<String> = Vec::new();
    for name in used.iter().copied().chain(list.iter().map(String::as_str)) {
        if catalog.ingredient(name).is_none() && !unpriced.iter().any(|u| u == name) {
            unpriced.push(name.to_string());
        }
    }

    Coverage { missing, unused, unpriced }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IngredientSelection;

    #[test]
    fn test_dough_mass_checks_builtin() {
        let checks = dough_mass_checks(&Catalog::builtin());
        let diffs: Vec<(&str, f64)> =
            checks.iter().map(|c| (c.recipe.as_str(), c.difference_g())).collect();

        assert_eq!(
            diffs,
            vec![
                ("Sugar Cookie", -279.0),
                ("Snickerdoodle", -233.0),
                ("Dark Chocolate Chip", 12.0),
                ("Chocolate Chip", 328.0),
                ("Lemon Sugar", 158.0),
                ("Oatmeal Raisin", 31.0),
            ]
        );
        assert_eq!(checks[1].non_mass_items, 2);
        assert_eq!(checks[4].non_mass_items, 3);
    }

    #[test]
    fn test_fixed_list_covers_builtin_recipes() {
        let catalog = Catalog::builtin();
        let list = catalog.calculator_list(IngredientSelection::Fixed);
        let coverage = calculator_coverage(&catalog, &list);

        assert!(coverage.is_complete());
        assert_eq!(coverage.unused, vec!["Cream Cheese".to_string()]);
    }

    #[test]
    fn test_short_list_reports_missing() {
        let catalog = Catalog::builtin();
        let list = vec!["Unsalted Butter".to_string(), "Pecans (chopped)".to_string()];
        let coverage = calculator_coverage(&catalog, &list);

        assert!(!coverage.is_complete());
        assert!(coverage.missing.contains(&"Raisins".to_string()));
        assert!(!coverage.missing.contains(&"Unsalted Butter".to_string()));
        assert_eq!(coverage.unused, vec!["Pecans (chopped)".to_string()]);
    }

    #[test]
    fn test_unpriced_ingredient_reported_once() {
        let mut catalog = Catalog::builtin();
        catalog.ingredients.retain(|i| i.name != "Raisins");
        let list = catalog.calculator_list(IngredientSelection::Fixed);
        let coverage = calculator_coverage(&catalog, &list);

        assert_eq!(coverage.unpriced, vec!["Raisins".to_string()]);
        assert!(!coverage.is_complete());
    }
}
