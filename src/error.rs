use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantDbError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("Excelファイルを読み込めません: {0}")]
    SourceFormat(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("開始位置（行{row}, 列{col}）がシート範囲外です。シートは{total_rows}行 x {total_cols}列")]
    RangeOutOfBounds {
        row: usize,
        col: usize,
        total_rows: usize,
        total_cols: usize,
    },

    #[error("ヘッダー行{row}の下にデータ行がありません。シートは{total_rows}行")]
    NoDataRows { row: usize, total_rows: usize },

    #[error("参照写真列 '{requested}' が見つかりません。利用可能な列: {}", available.join(", "))]
    ColumnNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, PlantDbError>;
