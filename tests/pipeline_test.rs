//! 抽出 → 画像スキャン → 照合 → 保存 の一括処理テスト
//!
//! CLIのRunコマンドが行う流れをライブラリAPIで再現する

use image::RgbImage;
use plantdb_rust::reconciler::PlantDatabase;
use plantdb_rust::{collector, extractor, reconciler, session};
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("plants.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = [
        "Ref_Photo",
        "Species Name",
        " Family ",
        "Y_Proj",
        "X_Proj",
        "Altitude",
        "Slope",
        "Exposure",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }

    // 行1: 完全一致で照合
    sheet.write(1, 0, "plant_01").unwrap();
    sheet.write(1, 1, "Quercus robur").unwrap();
    sheet.write(1, 2, "Fagaceae").unwrap();
    sheet.write(1, 3, 43.61).unwrap();
    sheet.write(1, 4, 3.88).unwrap();
    sheet.write(1, 5, 812.0).unwrap();
    sheet.write(1, 6, "N/A").unwrap();
    sheet.write(1, 7, "Nord").unwrap();

    // 行2: 区切り・大文字の揺れを越えて照合
    sheet.write(2, 0, "PLANT 02").unwrap();
    sheet.write(2, 1, "Pinus nigra").unwrap();
    sheet.write(2, 2, "Pinaceae").unwrap();

    // 行3: 対応する画像がない
    sheet.write(3, 0, "fern_99").unwrap();
    sheet.write(3, 2, "Fagaceae").unwrap();

    workbook.save(&path).unwrap();
    path
}

fn write_images(dir: &TempDir) -> PathBuf {
    let images_dir = dir.path().join("images");
    std::fs::create_dir_all(&images_dir).unwrap();
    RgbImage::new(20, 10)
        .save(images_dir.join("plant_01.jpg"))
        .unwrap();
    RgbImage::new(16, 16)
        .save(images_dir.join("Plant-02.PNG"))
        .unwrap();
    std::fs::write(images_dir.join("notes.txt"), "not an image").unwrap();
    images_dir
}

#[test]
fn test_full_pipeline() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let workbook = write_workbook(&dir);
    let images_dir = write_images(&dir);

    // 1. 抽出
    let table = extractor::extract(&workbook, 0, 0, None).unwrap();
    assert_eq!(table.column_count(), 8);
    assert_eq!(table.row_count(), 3);

    // 2. 画像スキャン
    let images = collector::scan(&images_dir);
    assert_eq!(images.len(), 2);
    assert_eq!(images["plant_01.jpg"].dimensions, (20, 10));
    assert_eq!(images["plant_01.jpg"].format, "JPEG");

    // 3. 照合（列名は小文字でも解決できる）
    let outcome = reconciler::reconcile(&table, &images, "ref_photo", "sess1").unwrap();
    let database = &outcome.database;

    assert_eq!(database.metadata.total_plants, 3);
    assert_eq!(database.metadata.total_images, 2);
    assert_eq!(database.metadata.successfully_mapped, 2);
    assert_eq!(database.plants.len(), 2);
    assert_eq!(outcome.skipped.len(), 1);

    let first = &database.plants[0];
    assert_eq!(first.species_name, "Quercus robur");
    assert_eq!(first.family, "Fagaceae");
    assert_eq!(first.y_proj, Some(43.61));
    assert_eq!(first.x_proj, Some(3.88));
    assert_eq!(first.altitude, 812.0);
    assert_eq!(first.slope, None);
    assert_eq!(first.exposure, "Nord");
    assert_eq!(first.image_path, "sess1/plant_01.jpg");

    let second = &database.plants[1];
    assert_eq!(second.ref_photo, "PLANT 02");
    assert_eq!(second.image_path, "sess1/Plant-02.PNG");
    assert_eq!(second.formation, "Unknown Formation");
    assert_eq!(second.altitude, 0.0);

    // 4. 保存して読み戻し
    let output_dir = dir.path().join("processed");
    let output_path = session::save_database(database, &output_dir, "sess1").unwrap();
    let content = std::fs::read_to_string(&output_path).unwrap();
    let restored: PlantDatabase = serde_json::from_str(&content).expect("デシリアライズ失敗");

    assert_eq!(restored.families, database.families);
    assert_eq!(restored.families, vec!["Fagaceae", "Pinaceae"]);
    assert_eq!(restored.plants.len(), database.plants.len());
    assert_eq!(restored.metadata.session_id, "sess1");

    // 5. 画像の複製
    let copied = session::copy_images(&images, &images_dir, &output_dir, "sess1").unwrap();
    assert_eq!(copied, 2);
    assert!(output_dir.join("images/sess1/plant_01.jpg").is_file());
    assert!(output_dir.join("images/sess1/Plant-02.PNG").is_file());
}

#[test]
fn test_pipeline_session_state() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let workbook = write_workbook(&dir);
    let images_dir = write_images(&dir);

    let mut state = session::SessionState::new("sess2", &workbook, &images_dir).unwrap();
    assert!(state.ready());
    assert_eq!(state.image_count, 2);

    let table = extractor::extract(&workbook, 0, 0, None).unwrap();
    let images = collector::scan(&images_dir);
    let outcome = reconciler::reconcile(&table, &images, "Ref_Photo", "sess2").unwrap();

    let output_dir = dir.path().join("processed");
    let output_path =
        session::save_database(&outcome.database, &output_dir, "sess2").unwrap();
    state.complete(&output_path, outcome.database.metadata.successfully_mapped);
    let status_path = state.save(&output_dir).unwrap();

    let content = std::fs::read_to_string(&status_path).unwrap();
    assert!(content.contains("\"processingComplete\": true"));
    assert!(content.contains("\"mappedPlants\": 2"));
}

#[test]
fn test_pipeline_no_images_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let workbook = write_workbook(&dir);

    // 画像ディレクトリが存在しなくてもスキャンは空を返し、照合は全行スキップ
    let table = extractor::extract(&workbook, 0, 0, None).unwrap();
    let images = collector::scan(&dir.path().join("missing"));
    assert!(images.is_empty());

    let outcome = reconciler::reconcile(&table, &images, "Ref_Photo", "sess3").unwrap();
    assert!(outcome.database.plants.is_empty());
    assert_eq!(outcome.database.metadata.successfully_mapped, 0);
    assert_eq!(outcome.skipped.len(), 3);
}
