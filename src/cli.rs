use clap::{Parser, Subcommand};
use midnight_dough_common::IngredientSelection;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "midnight-dough")]
#[command(about = "クッキー原価・仕込み計算ワークブック生成ツール", long_about = None)]
pub struct Cli {
    /// 省略時は generate
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// 6シートの計算ワークブックを生成
    Generate {
        /// 出力ファイル（デフォルト: 設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 計算シートの材料リスト (fixed/used)
        #[arg(long)]
        ingredients: Option<IngredientSelection>,

        /// カタログJSONファイル（省略時は組み込みデータ）
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Order Calculator の注文行数
        #[arg(long)]
        order_lines: Option<u32>,
    },

    /// 生地量と材料リストの整合性を表示
    Report {
        /// カタログJSONファイル
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト出力ファイルを設定
        #[arg(long)]
        set_output: Option<PathBuf>,
    },
}

impl Commands {
    /// サブコマンド省略時の既定動作
    pub fn default_generate() -> Self {
        Commands::Generate {
            output: None,
            ingredients: None,
            catalog: None,
            order_lines: None,
        }
    }
}
