use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_FILE_PREFIX: &str = "rename_log_";
const LOG_FILE_SUFFIX: &str = ".json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameRecord {
    pub original_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameLog {
    pub directory: PathBuf,
    pub records: Vec<RenameRecord>,
}

pub fn save_rename_log(log: &RenameLog, log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir).with_context(|| {
        format!(
            "ログディレクトリを作成できませんでした: {}",
            log_dir.display()
        )
    })?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("{LOG_FILE_PREFIX}{timestamp}{LOG_FILE_SUFFIX}"));

    let body =
        serde_json::to_string_pretty(log).context("リネームログのシリアライズに失敗しました")?;
    fs::write(&log_path, body).with_context(|| {
        format!(
            "ログファイルを書き込めませんでした: {}",
            log_path.display()
        )
    })?;

    Ok(log_path)
}

pub fn load_latest_log(log_dir: &Path) -> Result<RenameLog> {
    let log_path = find_latest_log_file(log_dir)?;
    let raw = fs::read_to_string(&log_path)
        .with_context(|| format!("ログファイルを読めませんでした: {}", log_path.display()))?;
    let log = serde_json::from_str::<RenameLog>(&raw)
        .with_context(|| format!("ログファイルの解析に失敗しました: {}", log_path.display()))?;
    Ok(log)
}

fn find_latest_log_file(log_dir: &Path) -> Result<PathBuf> {
    let Ok(entries) = fs::read_dir(log_dir) else {
        anyhow::bail!("リネームログが見つかりません: {}", log_dir.display());
    };

    let mut names = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX) {
            names.push(name);
        }
    }

    // ファイル名のタイムスタンプ部分は辞書順で時刻順になる
    names.sort();
    match names.pop() {
        Some(name) => Ok(log_dir.join(name)),
        None => anyhow::bail!("リネームログが見つかりません: {}", log_dir.display()),
    }
}
