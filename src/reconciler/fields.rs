//! 列名候補テーブル
//!
//! 調査票の列名は英語・フランス語・略記が混在するため、
//! 意味フィールドごとに候補名を優先順で持ち、先に見つかった列を使う。
//! 候補の解決は大文字小文字・前後空白を無視する。

use crate::extractor::{CellValue, NormalizedTable};

pub const Y_PROJ_CANDIDATES: &[&str] = &["Y_Proj", "yProj", "Y", "Latitude"];
pub const X_PROJ_CANDIDATES: &[&str] = &["X_Proj", "xProj", "X", "Longitude"];
pub const ALTITUDE_CANDIDATES: &[&str] = &["Altitude", "Elevation", "Élévation", "Alt"];
pub const SLOPE_CANDIDATES: &[&str] = &["Slope", "Pente"];
pub const SPECIES_CANDIDATES: &[&str] = &[
    "Species Name",
    "SpeciesName",
    "Species",
    "Espèce",
    "Espece",
    "Nom",
    "Name",
];
pub const FAMILY_CANDIDATES: &[&str] = &["Family", "Famille"];
pub const FORMATION_CANDIDATES: &[&str] = &["Formation", "Habitat", "Milieu"];
pub const EXPOSURE_CANDIDATES: &[&str] = &["Exposure", "Aspect", "Exposition"];

/// 候補リスト順に列を解決し、最初に存在した列のセルを返す
///
/// 列が存在すればそのセルが空でも候補探索は打ち切る
/// （空セルの扱いは呼び出し側のデフォルト値に委ねる）。
pub fn lookup<'a>(
    table: &'a NormalizedTable,
    row: usize,
    candidates: &[&str],
) -> Option<&'a CellValue> {
    for name in candidates {
        if let Some(col) = table.resolve_column(name) {
            return table.cell(row, col);
        }
    }
    None
}

/// 文字列フィールド（候補なし・空セルはデフォルト値）
pub fn text_field(
    table: &NormalizedTable,
    row: usize,
    candidates: &[&str],
    default: &str,
) -> String {
    lookup(table, row, candidates)
        .and_then(|cell| cell.as_text())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 数値フィールド（候補なし・空セル・パース不能は None）
pub fn numeric_field(table: &NormalizedTable, row: usize, candidates: &[&str]) -> Option<f64> {
    lookup(table, row, candidates).and_then(|cell| cell.as_number())
}
