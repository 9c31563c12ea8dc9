//! Midnight Dough Common Library
//!
//! カタログ・数式モデル・スタイル・シートビルダーをCLIから切り離して提供する

pub mod types;
pub mod catalog;
pub mod formula;
pub mod layout;
pub mod style;
pub mod audit;
pub mod error;

#[cfg(feature = "excel")]
pub mod export;

pub use types::{Ingredient, IngredientSelection, LineItem, Recipe, RecipeRow, ReferenceEntry, RowTheme};
pub use catalog::{Catalog, CALCULATOR_INGREDIENTS};
pub use formula::{fx, CellRef, Expr, RangeRef};
pub use layout::SheetKind;
pub use style::StyleToken;
pub use audit::{calculator_coverage, dough_mass_checks, Coverage, DoughMassCheck};
pub use error::{Error, Result};

#[cfg(feature = "excel")]
pub use export::{generate_workbook_buffer, CalculatorOptions, WorkbookAssembler};
