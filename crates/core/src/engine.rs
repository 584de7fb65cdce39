use crate::entries::{list_entries, FileEntry};
use crate::extensions::{filter_entries, ExtensionSet};
use crate::journal::{load_latest_log, save_rename_log, RenameLog, RenameRecord};
use crate::sorter::{sort_entries, SortOptions};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NumberingOptions {
    pub start: i64,
    pub width: usize,
    pub zero_pad: bool,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            start: 1,
            width: 3,
            zero_pad: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub directory: PathBuf,
    pub prefix: String,
    pub sort: SortOptions,
    pub numbering: NumberingOptions,
    pub extension_groups: String,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchStats {
    pub scanned_files: usize,
    pub matched_files: usize,
    pub renamed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFailure {
    pub from_name: String,
    pub to_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub stats: BatchStats,
    pub records: Vec<RenameRecord>,
    pub failures: Vec<RenameFailure>,
    pub journal_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoOutcome {
    pub restored: Vec<RenameRecord>,
    pub failures: Vec<RenameFailure>,
}

pub fn run_batch(options: &BatchOptions) -> Result<BatchOutcome> {
    if !options.directory.exists() {
        bail!(
            "対象ディレクトリが存在しません: {}",
            options.directory.display()
        );
    }

    let entries = list_entries(&options.directory)?;
    let scanned_files = entries.len();

    let extension_set = ExtensionSet::from_groups(&options.extension_groups);
    let mut matched = filter_entries(entries, &extension_set);
    let matched_files = matched.len();

    sort_entries(&mut matched, &options.sort);

    let (records, failures) = rename_entries(
        &matched,
        &options.directory,
        &options.prefix,
        &options.numbering,
    );

    let journal_path = if records.is_empty() {
        None
    } else {
        let log = RenameLog {
            directory: options.directory.clone(),
            records: records.clone(),
        };
        match save_rename_log(&log, &options.log_dir) {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("リネームログを保存できませんでした: {err:#}");
                None
            }
        }
    };

    Ok(BatchOutcome {
        stats: BatchStats {
            scanned_files,
            matched_files,
            renamed: records.len(),
            failed: failures.len(),
        },
        records,
        failures,
        journal_path,
    })
}

pub fn undo_last(log_dir: &Path) -> Result<UndoOutcome> {
    let log = load_latest_log(log_dir)?;
    if log.records.is_empty() {
        bail!("やり直しできるリネーム記録がありません");
    }

    let mut restored = Vec::new();
    let mut failures = Vec::new();
    for record in &log.records {
        let current_path = log.directory.join(&record.new_name);
        let original_path = log.directory.join(&record.original_name);
        match fs::rename(&current_path, &original_path) {
            Ok(()) => restored.push(record.clone()),
            Err(err) => failures.push(RenameFailure {
                from_name: record.new_name.clone(),
                to_name: record.original_name.clone(),
                reason: err.to_string(),
            }),
        }
    }

    Ok(UndoOutcome { restored, failures })
}

fn rename_entries(
    entries: &[FileEntry],
    directory: &Path,
    prefix: &str,
    numbering: &NumberingOptions,
) -> (Vec<RenameRecord>, Vec<RenameFailure>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();
    let mut number = numbering.start;

    for entry in entries {
        let extension = extension_with_dot(&entry.name);
        let new_name = format!("{}{}{}", prefix, format_number(number, numbering), extension);
        let new_path = directory.join(&new_name);

        match fs::rename(&entry.path, &new_path) {
            Ok(()) => records.push(RenameRecord {
                original_name: entry.name.clone(),
                new_name,
            }),
            Err(err) => failures.push(RenameFailure {
                from_name: entry.name.clone(),
                to_name: new_name,
                reason: err.to_string(),
            }),
        }

        // 失敗しても採番は進める
        number += 1;
    }

    (records, failures)
}

fn format_number(number: i64, numbering: &NumberingOptions) -> String {
    if numbering.zero_pad {
        format!("{:0width$}", number, width = numbering.width)
    } else {
        number.to_string()
    }
}

fn extension_with_dot(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
