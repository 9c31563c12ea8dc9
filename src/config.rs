use crate::error::{CalculatorError, Result};
use midnight_dough_common::layout::{DEFAULT_BRAND, DEFAULT_ORDER_LINES, DEFAULT_OUTPUT_FILE};
use midnight_dough_common::IngredientSelection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_file: PathBuf,
    pub brand: String,
    pub order_lines: u32,
    pub ingredients: IngredientSelection,
    /// カタログJSON（未設定なら組み込みデータ）
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            brand: DEFAULT_BRAND.into(),
            order_lines: DEFAULT_ORDER_LINES,
            ingredients: IngredientSelection::Fixed,
            catalog: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（ファイルがなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CalculatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("midnight-dough").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.order_lines == 0 {
            return Err(CalculatorError::Config("order_lines must be at least 1".into()));
        }
        Ok(())
    }

    pub fn set_output_file(&mut self, path: PathBuf) -> Result<()> {
        self.output_file = path;
        self.save()
    }
}
