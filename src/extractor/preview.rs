//! Excelプレビューモジュール
//!
//! origin選択のために各シートの先頭部分を文字列グリッドとして返す。
//! スキーマは仮定せず、全セルを素朴に文字列化する。

use super::{cell_at, sheet_bounds};
use crate::error::{PlantDbError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// シート1枚分のプレビュー
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPreview {
    pub name: String,
    /// 先頭部分の行（全セル文字列化、空セルは ""）
    pub rows: Vec<Vec<String>>,
    /// 表示域に関わらないシート全体の行数
    pub total_rows: usize,
    /// シート全体の列数
    pub total_cols: usize,
}

/// ワークブック全体のプレビュー
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookPreview {
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetPreview>,
}

impl WorkbookPreview {
    pub fn sheet(&self, name: &str) -> Option<&SheetPreview> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// ワークブックの全シートをプレビューする
///
/// 表示行数は `max_rows` で打ち切るが、各シートの実際の
/// 行数・列数は常に報告する。
pub fn preview(source: &Path, max_rows: usize) -> Result<WorkbookPreview> {
    let mut workbook =
        open_workbook_auto(source).map_err(|e| PlantDbError::SourceFormat(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| PlantDbError::SourceFormat(e.to_string()))?;
        sheets.push(sheet_preview(name, &range, max_rows));
    }

    Ok(WorkbookPreview {
        sheet_names,
        sheets,
    })
}

fn sheet_preview(name: &str, range: &Range<Data>, max_rows: usize) -> SheetPreview {
    let (total_rows, total_cols) = sheet_bounds(range);

    let mut rows = Vec::with_capacity(total_rows.min(max_rows));
    for row in 0..total_rows.min(max_rows) {
        let mut cells = Vec::with_capacity(total_cols);
        for col in 0..total_cols {
            cells.push(cell_at(range, row, col).as_text().unwrap_or_default());
        }
        rows.push(cells);
    }

    SheetPreview {
        name: name.to_string(),
        rows,
        total_rows,
        total_cols,
    }
}
