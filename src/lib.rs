//! Plant Database Library
//!
//! 植生調査のExcelデータと写真を照合してデータベースを生成する
//!
//! コアは4操作:
//! - `extractor::extract` — 任意位置からの表データ抽出
//! - `extractor::preview` — 開始位置選択のためのプレビュー
//! - `collector::scan` — 画像メタデータ収集
//! - `reconciler::reconcile` — 行と画像の照合

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod extractor;
pub mod reconciler;
pub mod session;

pub use collector::ImageRecord;
pub use config::Config;
pub use error::{PlantDbError, Result};
pub use extractor::{extract, preview, CellValue, NormalizedTable, WorkbookPreview};
pub use reconciler::{reconcile, Plant, PlantDatabase, ReconcileOutcome};
pub use session::SessionState;
