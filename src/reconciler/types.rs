//! 照合結果の型定義
//!
//! 出力JSONのフィールド名は既存のデータベース契約に合わせる
//! (refPhoto / yProj / imagePath など)。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 照合済みの植物レコード（テーブル1行 + 画像1枚に対応）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    /// テーブルに書かれていた参照写真の生文字列
    pub ref_photo: String,
    pub y_proj: Option<f64>,
    pub x_proj: Option<f64>,
    pub species_name: String,
    pub family: String,
    pub formation: String,
    pub slope: Option<f64>,
    pub exposure: String,
    pub altitude: f64,
    /// セッション修飾済みの画像パス (<sessionId>/<ファイル名>)
    pub image_path: String,
    /// 照合した画像のサイズ（MB）
    pub image_size: f64,
}

/// データベースの集計メタデータ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDatabaseMetadata {
    /// 照合対象となったテーブル行数
    pub total_plants: usize,
    /// スキャンで見つかった画像数
    pub total_images: usize,
    /// 実際にレコードになった行数
    pub successfully_mapped: usize,
    pub processing_date: String,
    pub data_source: String,
    pub session_id: String,
}

/// 照合済みレコード一式（シリアライズ対象）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantDatabase {
    pub metadata: PlantDatabaseMetadata,
    /// 観測された科（Family）の一覧（重複除去・ソート済み）
    pub families: Vec<String>,
    pub plants: Vec<Plant>,
}

/// 行がレコードにならなかった理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 参照写真セルが空
    BlankReference,
    /// どの照合段階でも画像が見つからない
    NoImageMatch(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankReference => write!(f, "参照写真セルが空"),
            SkipReason::NoImageMatch(reference) => {
                write!(f, "画像が見つかりません: {}", reference)
            }
        }
    }
}

/// 行スキップの記録
#[derive(Debug, Clone)]
pub struct RowSkip {
    /// データ本体内の行番号（0始まり）
    pub row: usize,
    pub reason: SkipReason,
}

/// 照合処理の結果（データベース本体 + 行スキップ診断）
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub database: PlantDatabase,
    pub skipped: Vec<RowSkip>,
}
