//! 表データ抽出モジュール
//!
//! Excelシートの任意位置（origin）をヘッダー行の左上として、
//! ヘッダーとデータ本体を切り出し正規化テーブルを生成する。
//!
//! ## 処理フロー
//! 1. ワークブックを読み込み、指定シート（省略時は先頭）を生の行列として取得
//! 2. origin行をヘッダーとして解決（空セルは `Column_<列番号>` を合成）
//! 3. origin行より下をデータ本体としてヘッダー幅に揃える

mod preview;

pub use preview::{preview, SheetPreview, WorkbookPreview};

use crate::error::{PlantDbError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// セル値
///
/// 読み込み境界で型を確定させ、以降は文字列パースを繰り返さない。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

impl CellValue {
    /// 空セル扱いかどうか（空白のみの文字列も空とみなす）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 文字列形式（ヘッダー名・参照写真の解決に使用）
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Blank => None,
        }
    }

    /// 数値への安全な変換（パース不能・空白は None）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Blank => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Blank,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Blank,
        }
    }
}

/// 整数値は小数点なしで文字列化する（12.0 → "12"）
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 正規化テーブル
///
/// ヘッダー名は列挙順を保持する。重複した列名は解消せず、
/// 名前による解決は常に先頭の一致列を返す。
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl NormalizedTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 列名から列番号を解決（完全一致）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 大文字小文字・前後空白を無視して列番号を解決
    ///
    /// 完全一致を優先する。
    pub fn resolve_column(&self, name: &str) -> Option<usize> {
        self.column_index(name).or_else(|| {
            let want = name.trim().to_lowercase();
            self.headers
                .iter()
                .position(|h| h.trim().to_lowercase() == want)
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Excelファイルから指定位置を起点にテーブルを抽出する
///
/// # Arguments
/// * `source` - Excelファイルのパス (.xlsx/.xls/.ods)
/// * `origin_row` - ヘッダー行の位置（0始まり）
/// * `origin_col` - ヘッダー開始列の位置（0始まり）
/// * `sheet` - シート名（省略時は先頭シート）
pub fn extract(
    source: &Path,
    origin_row: usize,
    origin_col: usize,
    sheet: Option<&str>,
) -> Result<NormalizedTable> {
    let range = load_sheet(source, sheet)?;
    from_range(&range, origin_row, origin_col)
}

/// シートを生の行列として読み込む
pub(crate) fn load_sheet(source: &Path, sheet: Option<&str>) -> Result<Range<Data>> {
    let mut workbook =
        open_workbook_auto(source).map_err(|e| PlantDbError::SourceFormat(e.to_string()))?;

    let names = workbook.sheet_names().to_vec();
    let name = match sheet {
        Some(n) => {
            if !names.iter().any(|s| s == n) {
                return Err(PlantDbError::SheetNotFound(n.to_string()));
            }
            n.to_string()
        }
        None => names
            .first()
            .cloned()
            .ok_or_else(|| PlantDbError::SourceFormat("シートがありません".into()))?,
    };

    workbook
        .worksheet_range(&name)
        .map_err(|e| PlantDbError::SourceFormat(e.to_string()))
}

/// 生の行列から正規化テーブルを構築する
///
/// 座標はシート左上 (0, 0) 基準の絶対位置。
pub fn from_range(range: &Range<Data>, origin_row: usize, origin_col: usize) -> Result<NormalizedTable> {
    let (total_rows, total_cols) = sheet_bounds(range);

    if origin_row >= total_rows || origin_col >= total_cols {
        return Err(PlantDbError::RangeOutOfBounds {
            row: origin_row,
            col: origin_col,
            total_rows,
            total_cols,
        });
    }
    if origin_row + 1 >= total_rows {
        return Err(PlantDbError::NoDataRows {
            row: origin_row,
            total_rows,
        });
    }

    // ヘッダー行の解決
    let mut headers = Vec::with_capacity(total_cols - origin_col);
    for col in origin_col..total_cols {
        let cell = cell_at(range, origin_row, col);
        let name = match cell.as_text() {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => format!("Column_{}", col),
        };
        headers.push(name);
    }

    // データ本体（ヘッダー幅に揃える）
    let mut rows = Vec::with_capacity(total_rows - origin_row - 1);
    for row in (origin_row + 1)..total_rows {
        let mut cells = Vec::with_capacity(headers.len());
        for col in origin_col..total_cols {
            cells.push(cell_at(range, row, col));
        }
        rows.push(cells);
    }

    Ok(NormalizedTable { headers, rows })
}

/// シート全体の行数・列数（左上からの絶対サイズ）
pub(crate) fn sheet_bounds(range: &Range<Data>) -> (usize, usize) {
    match range.end() {
        Some((row, col)) => (row as usize + 1, col as usize + 1),
        None => (0, 0),
    }
}

pub(crate) fn cell_at(range: &Range<Data>, row: usize, col: usize) -> CellValue {
    range
        .get_value((row as u32, col as u32))
        .map(CellValue::from)
        .unwrap_or(CellValue::Blank)
}
