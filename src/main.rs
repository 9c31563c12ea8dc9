use anyhow::Context;
use clap::Parser;
use midnight_dough::{cli, config, export, report};
use midnight_dough_common::{calculator_coverage, CalculatorOptions};
use cli::{Cli, Commands};
use config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command.unwrap_or_else(Commands::default_generate) {
        Commands::Generate { output, ingredients, catalog, order_lines } => {
            println!("🍪 midnight-dough - ワークブック生成\n");

            let catalog_path = catalog.or_else(|| config.catalog.clone());
            let catalog = export::load_catalog(catalog_path.as_deref())
                .context("カタログの読み込みに失敗しました")?;
            if cli.verbose {
                println!(
                    "- カタログ: {}種の材料, {}件のレシピ ({}行)",
                    catalog.ingredients.len(),
                    catalog.recipes.len(),
                    catalog.recipe_row_count()
                );
            }

            let options = CalculatorOptions {
                brand: config.brand.clone(),
                order_lines: order_lines.unwrap_or(config.order_lines).max(1),
                selection: ingredients.unwrap_or(config.ingredients),
            };
            let output_path = export::output_path(&output.unwrap_or_else(|| config.output_file.clone()));

            let summary = export::excel::generate_calculator(&catalog, &options, &output_path, true)
                .with_context(|| format!("{} の生成に失敗しました", output_path.display()))?;

            for warning in report::coverage_warnings(&summary.coverage) {
                eprintln!("{}", warning);
            }

            println!("✅ Calculator created successfully: {}", output_path.display());
            println!("\n📊 SHEETS:");
            for (i, kind) in summary.sheets.iter().enumerate() {
                println!("  {}. {} - {}", i + 1, kind.name(), kind.description());
            }
            if cli.verbose {
                println!(
                    "\n- 材料リスト: {} ({}種), 注文行: {}",
                    options.selection, summary.ingredient_count, options.order_lines
                );
            }
        }

        Commands::Report { catalog } => {
            let catalog_path = catalog.or_else(|| config.catalog.clone());
            let catalog = export::load_catalog(catalog_path.as_deref())
                .context("カタログの読み込みに失敗しました")?;

            print!("{}", report::dough_mass_report(&catalog));
            println!();
            let list = catalog.calculator_list(config.ingredients);
            print!("{}", report::coverage_report(&calculator_coverage(&catalog, &list)));
        }

        Commands::Config { show, set_output } => {
            let mut config = config;

            if let Some(path) = set_output {
                config.set_output_file(path)?;
                println!("✔ 出力ファイルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  出力ファイル: {}", config.output_file.display());
                println!("  ブランド: {}", config.brand);
                println!("  注文行数: {}", config.order_lines);
                println!("  材料リスト: {}", config.ingredients);
                println!(
                    "  カタログ: {}",
                    config
                        .catalog
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                if cli.verbose {
                    println!("  設定ファイル: {}", Config::config_path()?.display());
                }
            }
        }
    }

    Ok(())
}
