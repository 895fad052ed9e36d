//! エンティティ照合モジュール
//!
//! 正規化テーブルの各行を画像メタデータと突き合わせ、
//! 植物レコード (Plant) の集合と集計メタデータを生成する。
//!
//! ## 処理フロー
//! 1. 参照写真列を解決（完全一致 → 大文字小文字・空白無視）
//! 2. 行ごとに3段階照合で画像を探す（不成立の行はスキップ記録）
//! 3. 科の一覧と集計カウンタをまとめる

pub mod fields;
pub mod matching;
pub mod types;

pub use matching::{find_matching_image, normalize_filename};
pub use types::{
    Plant, PlantDatabase, PlantDatabaseMetadata, ReconcileOutcome, RowSkip, SkipReason,
};

use crate::collector::ImageRecord;
use crate::error::{PlantDbError, Result};
use crate::extractor::NormalizedTable;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// テーブルと画像メタデータを照合してデータベースを生成する
///
/// 照合できない行はスキップとして記録し、処理全体は継続する。
/// 参照写真列が解決できない場合のみエラー。
pub fn reconcile(
    table: &NormalizedTable,
    images: &BTreeMap<String, ImageRecord>,
    ref_photo_column: &str,
    session_id: &str,
) -> Result<ReconcileOutcome> {
    let ref_col = table.resolve_column(ref_photo_column).ok_or_else(|| {
        PlantDbError::ColumnNotFound {
            requested: ref_photo_column.to_string(),
            available: table.headers().to_vec(),
        }
    })?;

    let mut plants = Vec::new();
    let mut families = BTreeSet::new();
    let mut skipped = Vec::new();

    for row in 0..table.row_count() {
        match build_plant(table, images, ref_col, session_id, row) {
            Ok(plant) => {
                families.insert(plant.family.clone());
                plants.push(plant);
            }
            Err(reason) => skipped.push(RowSkip { row, reason }),
        }
    }

    let metadata = PlantDatabaseMetadata {
        total_plants: table.row_count(),
        total_images: images.len(),
        successfully_mapped: plants.len(),
        processing_date: chrono::Local::now().to_rfc3339(),
        data_source: format!("Excel upload - Session {}", session_id),
        session_id: session_id.to_string(),
    };

    Ok(ReconcileOutcome {
        database: PlantDatabase {
            metadata,
            families: families.into_iter().collect(),
            plants,
        },
        skipped,
    })
}

/// 1行分のレコードを構築する（スキップは `Err(SkipReason)`）
fn build_plant(
    table: &NormalizedTable,
    images: &BTreeMap<String, ImageRecord>,
    ref_col: usize,
    session_id: &str,
    row: usize,
) -> std::result::Result<Plant, SkipReason> {
    let ref_photo = table
        .cell(row, ref_col)
        .and_then(|cell| cell.as_text())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(SkipReason::BlankReference)?;

    let (matched, image) = find_matching_image(&ref_photo, images)
        .ok_or_else(|| SkipReason::NoImageMatch(ref_photo.clone()))?;

    Ok(Plant {
        id: Uuid::new_v4().to_string(),
        y_proj: fields::numeric_field(table, row, fields::Y_PROJ_CANDIDATES),
        x_proj: fields::numeric_field(table, row, fields::X_PROJ_CANDIDATES),
        species_name: fields::text_field(table, row, fields::SPECIES_CANDIDATES, "Unknown Species"),
        family: fields::text_field(table, row, fields::FAMILY_CANDIDATES, "Unknown Family"),
        formation: fields::text_field(
            table,
            row,
            fields::FORMATION_CANDIDATES,
            "Unknown Formation",
        ),
        slope: fields::numeric_field(table, row, fields::SLOPE_CANDIDATES),
        exposure: fields::text_field(table, row, fields::EXPOSURE_CANDIDATES, "Unknown"),
        altitude: fields::numeric_field(table, row, fields::ALTITUDE_CANDIDATES).unwrap_or(0.0),
        image_path: format!("{}/{}", session_id, matched),
        image_size: image.size_mb,
        ref_photo,
    })
}
