use crate::error::{PlantDbError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// データベースJSONの出力先
    pub output_dir: PathBuf,
    /// プレビューで表示する行数
    pub max_preview_rows: usize,
    /// 処理後に画像を配信用ディレクトリへ複製するか
    pub copy_images: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("processed_data"),
            max_preview_rows: 10,
            copy_images: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlantDbError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("plantdb").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("processed_data"));
        assert_eq!(config.max_preview_rows, 10);
        assert!(config.copy_images);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            output_dir: PathBuf::from("/tmp/out"),
            max_preview_rows: 25,
            copy_images: false,
        };
        let json = serde_json::to_string(&config).expect("シリアライズ失敗");
        let restored: Config = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(restored.output_dir, config.output_dir);
        assert_eq!(restored.max_preview_rows, 25);
        assert!(!restored.copy_images);
    }
}
