//! セッション状態モジュール
//!
//! 処理リクエスト1件分の入力状態と出力を明示的な値として持ち回る。
//! プロセス全体で共有する登録簿は持たず、セッション同士は干渉しない。

use crate::collector::{self, ImageRecord};
use crate::error::{PlantDbError, Result};
use crate::reconciler::PlantDatabase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 1セッション分の処理状態
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_id: String,
    pub excel_path: PathBuf,
    pub images_dir: PathBuf,
    pub excel_uploaded: bool,
    pub images_uploaded: bool,
    pub image_count: usize,
    pub processing_complete: bool,
    pub output_path: Option<PathBuf>,
    pub mapped_plants: usize,
    pub created_at: String,
}

impl SessionState {
    /// 入力ファイルを検査してセッションを初期化する
    pub fn new(session_id: &str, excel_path: &Path, images_dir: &Path) -> Result<Self> {
        if !excel_path.exists() {
            return Err(PlantDbError::FileNotFound(
                excel_path.display().to_string(),
            ));
        }

        let image_count = collector::count_images(images_dir);

        Ok(Self {
            session_id: session_id.to_string(),
            excel_path: excel_path.to_path_buf(),
            images_dir: images_dir.to_path_buf(),
            excel_uploaded: true,
            images_uploaded: image_count > 0,
            image_count,
            processing_complete: false,
            output_path: None,
            mapped_plants: 0,
            created_at: chrono::Local::now().to_rfc3339(),
        })
    }

    /// 両方の入力が揃っているか
    pub fn ready(&self) -> bool {
        self.excel_uploaded && self.images_uploaded
    }

    /// 処理完了を記録する
    pub fn complete(&mut self, output_path: &Path, mapped_plants: usize) {
        self.processing_complete = true;
        self.output_path = Some(output_path.to_path_buf());
        self.mapped_plants = mapped_plants;
    }

    /// ステータスをJSONで保存する
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(format!("{}_status.json", self.session_id));
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// データベースをJSONで保存する
pub fn save_database(
    database: &PlantDatabase,
    output_dir: &Path,
    session_id: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}_plant_database.json", session_id));
    let json = serde_json::to_string_pretty(database)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// スキャン済み画像を配信用ディレクトリへ複製する
///
/// 複製先は `<output_dir>/images/<session_id>/`。
pub fn copy_images(
    images: &BTreeMap<String, ImageRecord>,
    source_dir: &Path,
    output_dir: &Path,
    session_id: &str,
) -> Result<usize> {
    let dest_dir = output_dir.join("images").join(session_id);
    std::fs::create_dir_all(&dest_dir)?;

    let mut copied = 0;
    for filename in images.keys() {
        let source = source_dir.join(filename);
        if source.is_file() {
            std::fs::copy(&source, dest_dir.join(filename))?;
            copied += 1;
        }
    }
    Ok(copied)
}
