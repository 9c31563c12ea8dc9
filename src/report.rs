//! カタログ整合性レポート（テキスト）

use midnight_dough_common::{dough_mass_checks, Catalog, Coverage};
use std::fmt::Write;

/// 生地量差分がこの値（g）を超えたら注記する
pub const DOUGH_TOLERANCE_G: f64 = 5.0;

pub fn dough_mass_report(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🍪 DOUGH MASS CHECK");
    for check in dough_mass_checks(catalog) {
        let diff = check.difference_g();
        let marker = if diff.abs() > DOUGH_TOLERANCE_G { "⚠" } else { "✔" };
        let _ = write!(
            out,
            "  {} {}: declared {:.0} g, items {:.0} g ({:+.0} g)",
            marker, check.recipe, check.declared_g, check.mass_items_g, diff
        );
        if check.non_mass_items > 0 {
            let _ = write!(out, ", {} non-gram item(s) excluded", check.non_mass_items);
        }
        out.push('\n');
    }
    out
}

pub fn coverage_report(coverage: &Coverage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🧾 CALCULATOR INGREDIENT COVERAGE");
    if coverage.is_complete() && coverage.unused.is_empty() {
        let _ = writeln!(out, "  ✔ every recipe ingredient is listed and priced");
        return out;
    }
    section(&mut out, "missing from calculator sheets", &coverage.missing);
    section(&mut out, "listed but unused", &coverage.unused);
    section(&mut out, "no price entry", &coverage.unpriced);
    out
}

fn section(out: &mut String, label: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {} ({}): {}", label, names.len(), names.join(", "));
}

/// 生成時に表示する警告行
pub fn coverage_warnings(coverage: &Coverage) -> Vec<String> {
    let mut warnings = Vec::new();
    if !coverage.missing.is_empty() {
        warnings.push(format!(
            "⚠ {} recipe ingredient(s) not on calculator sheets: {}",
            coverage.missing.len(),
            coverage.missing.join(", ")
        ));
    }
    if !coverage.unpriced.is_empty() {
        warnings.push(format!(
            "⚠ no price entry for: {}",
            coverage.unpriced.join(", ")
        ));
    }
    warnings
}
