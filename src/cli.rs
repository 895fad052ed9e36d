use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plantdb")]
#[command(about = "植生調査Excel・写真照合データベース生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Excelの構造をプレビュー（開始位置の確認用）
    Preview {
        /// Excelファイルのパス (.xlsx/.xls/.ods)
        #[arg(required = true)]
        workbook: PathBuf,

        /// シートごとの表示行数（デフォルトは設定値）
        #[arg(short, long)]
        max_rows: Option<usize>,
    },

    /// 画像フォルダをスキャンしてメタデータを表示
    Images {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,
    },

    /// Excel抽出・画像照合・データベース生成を一括実行
    Run {
        /// Excelファイルのパス
        #[arg(required = true)]
        workbook: PathBuf,

        /// 画像フォルダのパス
        #[arg(required = true)]
        images: PathBuf,

        /// ヘッダー行の位置（0始まり、省略時は対話選択）
        #[arg(short = 'r', long)]
        start_row: Option<usize>,

        /// ヘッダー開始列の位置（0始まり、省略時は対話選択）
        #[arg(short = 'c', long)]
        start_col: Option<usize>,

        /// 参照写真列の名前（省略時は対話選択）
        #[arg(long)]
        ref_column: Option<String>,

        /// シート名（省略時は先頭シート）
        #[arg(short, long)]
        sheet: Option<String>,

        /// セッションID（省略時は自動生成）
        #[arg(long)]
        session: Option<String>,

        /// 出力ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 画像の複製をスキップ
        #[arg(long)]
        no_copy_images: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 出力ディレクトリを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// プレビュー表示行数を設定
        #[arg(long)]
        set_preview_rows: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
