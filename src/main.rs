use clap::Parser;
use dialoguer::Input;
use plantdb_rust::{cli, collector, config, error, extractor, reconciler, session};

use cli::{Cli, Commands};
use config::Config;
use error::{PlantDbError, Result};
use extractor::{NormalizedTable, SheetPreview, WorkbookPreview};
use session::SessionState;
use std::path::Path;
use uuid::Uuid;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Preview { workbook, max_rows } => {
            println!("📊 plantdb - Excelプレビュー\n");
            let max_rows = max_rows.unwrap_or(config.max_preview_rows);
            let preview = extractor::preview(&workbook, max_rows)?;
            print_workbook_preview(&preview);
        }

        Commands::Images { folder } => {
            println!("📷 plantdb - 画像スキャン\n");
            let images = collector::scan(&folder);

            if images.is_empty() {
                println!("画像が見つかりません: {}", folder.display());
            } else {
                for record in images.values() {
                    println!(
                        "  {} ({}x{}, {}, {:.2}MB)",
                        record.filename,
                        record.dimensions.0,
                        record.dimensions.1,
                        record.format,
                        record.size_mb
                    );
                }
                println!("\n✔ {}枚の画像を検出", images.len());
            }
        }

        Commands::Run {
            workbook,
            images,
            start_row,
            start_col,
            ref_column,
            sheet,
            session,
            output,
            no_copy_images,
        } => {
            println!("🌿 plantdb - データベース生成\n");

            // セッション準備（入力が揃っているか検査）
            let session_id = session.unwrap_or_else(generate_session_id);
            let mut state = SessionState::new(&session_id, &workbook, &images)?;
            if !state.ready() {
                return Err(PlantDbError::NoImagesFound(images.display().to_string()));
            }

            // 開始位置（未指定なら対話選択）
            let (origin_row, origin_col) = match (start_row, start_col) {
                (Some(row), Some(col)) => (row, col),
                _ => prompt_origin(&workbook, sheet.as_deref(), &config)?,
            };

            println!("[1/4] Excelを抽出中...");
            let table = extractor::extract(&workbook, origin_row, origin_col, sheet.as_deref())?;
            println!("✔ {}列 x {}行\n", table.column_count(), table.row_count());

            let ref_column = match ref_column {
                Some(name) => name,
                None => prompt_ref_column(&table)?,
            };

            println!("[2/4] 画像をスキャン中...");
            let image_records = collector::scan(&images);
            println!("✔ {}枚の画像を検出\n", image_records.len());

            println!("[3/4] 照合中...");
            let outcome =
                reconciler::reconcile(&table, &image_records, &ref_column, &session_id)?;
            let database = &outcome.database;
            println!(
                "✔ {}/{}行をマッピング（科: {}種類）\n",
                database.metadata.successfully_mapped,
                database.metadata.total_plants,
                database.families.len()
            );

            if !outcome.skipped.is_empty() {
                eprintln!("警告: {}行が照合できませんでした", outcome.skipped.len());
                if cli.verbose {
                    for skip in &outcome.skipped {
                        eprintln!("  - 行{}: {}", skip.row, skip.reason);
                    }
                }
            }

            println!("[4/4] 結果を保存中...");
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            let output_path = session::save_database(database, &output_dir, &session_id)?;

            if config.copy_images && !no_copy_images {
                let copied =
                    session::copy_images(&image_records, &images, &output_dir, &session_id)?;
                println!("✔ {}枚の画像を複製", copied);
            }

            state.complete(&output_path, database.metadata.successfully_mapped);
            state.save(&output_dir)?;

            println!("\n✅ 完了: {}", output_path.display());
        }

        Commands::Config {
            set_output_dir,
            set_preview_rows,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(dir) = set_output_dir {
                config.output_dir = dir;
                changed = true;
            }
            if let Some(rows) = set_preview_rows {
                config.max_preview_rows = rows;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  出力ディレクトリ: {}", config.output_dir.display());
                println!("  プレビュー行数: {}", config.max_preview_rows);
                println!(
                    "  画像複製: {}",
                    if config.copy_images { "有効" } else { "無効" }
                );
            }
        }
    }

    Ok(())
}

fn generate_session_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn print_workbook_preview(preview: &WorkbookPreview) {
    for sheet in &preview.sheets {
        print_sheet_preview(sheet);
        println!();
    }
}

fn print_sheet_preview(sheet: &SheetPreview) {
    println!(
        "--- シート: {} ({}行 x {}列) ---",
        sheet.name, sheet.total_rows, sheet.total_cols
    );
    for (i, row) in sheet.rows.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|c| truncate_cell(c, 14)).collect();
        println!("  {:>4}: {}", i, cells.join(" | "));
    }
    if sheet.total_rows > sheet.rows.len() {
        println!("  ... 残り{}行", sheet.total_rows - sheet.rows.len());
    }
}

fn truncate_cell(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let head: String = value.chars().take(max_chars - 1).collect();
        format!("{}…", head)
    }
}

/// プレビューを表示して開始位置を対話的に選択する
fn prompt_origin(
    workbook: &Path,
    sheet: Option<&str>,
    config: &Config,
) -> Result<(usize, usize)> {
    let preview = extractor::preview(workbook, config.max_preview_rows)?;

    let target = match sheet {
        Some(name) => preview
            .sheet(name)
            .ok_or_else(|| PlantDbError::SheetNotFound(name.to_string()))?,
        None => preview
            .sheets
            .first()
            .ok_or_else(|| PlantDbError::SourceFormat("シートがありません".into()))?,
    };

    print_sheet_preview(target);
    println!();

    let row: usize = Input::new()
        .with_prompt("ヘッダー行の位置 (0始まり)")
        .default(0)
        .interact_text()
        .map_err(|e| PlantDbError::CliExecution(e.to_string()))?;

    let col: usize = Input::new()
        .with_prompt("ヘッダー開始列の位置 (0始まり)")
        .default(0)
        .interact_text()
        .map_err(|e| PlantDbError::CliExecution(e.to_string()))?;

    Ok((row, col))
}

/// 抽出済みヘッダーから参照写真列を対話的に選択する
fn prompt_ref_column(table: &NormalizedTable) -> Result<String> {
    println!("\n📋 参照写真列を選択してください:\n");
    for (i, name) in table.headers().iter().enumerate() {
        println!("  {}) {}", i, name);
    }
    println!();

    let input: String = Input::new()
        .with_prompt("番号または列名を入力")
        .interact_text()
        .map_err(|e| PlantDbError::CliExecution(e.to_string()))?;

    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(n) if n < table.column_count() => Ok(table.headers()[n].clone()),
        _ => Ok(trimmed.to_string()),
    }
}
