//! 画像メタデータ収集モジュール
//!
//! ディレクトリ直下の画像ファイルから寸法・形式・ファイルサイズを収集する。
//! ピクセルデータは展開せず、ヘッダーだけを読む。

use crate::error::{PlantDbError, Result};
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// 画像メタデータ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub filename: String,
    /// ファイルサイズ（MB、小数2桁）
    pub size_mb: f64,
    /// (幅, 高さ) ピクセル
    pub dimensions: (u32, u32),
    /// 画像形式（JPEG/PNG/BMP/TIFF）
    pub format: String,
}

/// 対応画像形式かどうか（拡張子、大文字小文字無視）
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|e| {
            let ext = e.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|&s| s == ext)
        })
        .unwrap_or(false)
}

/// 対応画像ファイルの数を数える（メタデータは読まない）
pub fn count_images(dir: &Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_supported_image(e.path()))
        .count()
}

/// ディレクトリを走査して画像メタデータを収集する
///
/// 存在しないディレクトリは空マップを返す（エラーにしない）。
/// 読めない画像は警告を出してスキップし、走査は継続する。
/// 返り値はファイル名の辞書順で列挙され、照合の先勝ち判定を
/// プラットフォームに依らず決定的にする。
pub fn scan(dir: &Path) -> BTreeMap<String, ImageRecord> {
    let mut records = BTreeMap::new();

    if !dir.exists() {
        return records;
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_supported_image(path) {
            continue;
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match probe_image(path, &filename) {
            Ok(record) => {
                records.insert(filename, record);
            }
            Err(e) => {
                eprintln!("警告: 画像をスキップ {}: {}", filename, e);
            }
        }
    }

    records
}

/// ヘッダーだけ読んで寸法と形式を取得する
fn probe_image(path: &Path, filename: &str) -> Result<ImageRecord> {
    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(|e| PlantDbError::ImageLoad(e.to_string()))?;

    let format = reader.format();
    let dimensions = reader
        .into_dimensions()
        .map_err(|e| PlantDbError::ImageLoad(e.to_string()))?;

    let bytes = path.metadata()?.len();
    let size_mb = (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;

    Ok(ImageRecord {
        filename: filename.to_string(),
        size_mb,
        dimensions,
        format: format_name(format, path),
    })
}

/// 形式名（判別できない場合は拡張子から）
fn format_name(format: Option<ImageFormat>, path: &Path) -> String {
    match format {
        Some(ImageFormat::Jpeg) => "JPEG".to_string(),
        Some(ImageFormat::Png) => "PNG".to_string(),
        Some(ImageFormat::Bmp) => "BMP".to_string(),
        Some(ImageFormat::Tiff) => "TIFF".to_string(),
        Some(other) => format!("{:?}", other).to_uppercase(),
        None => path
            .extension()
            .map(|e| e.to_string_lossy().to_uppercase())
            .unwrap_or_default(),
    }
}
