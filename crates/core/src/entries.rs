use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
}

pub fn list_entries(dir: &Path) -> Result<Vec<FileEntry>> {
    let mut out = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("フォルダを読めませんでした: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("エントリ読み取り失敗: {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        out.push(FileEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            path,
        });
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

pub fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}
