use crate::entries::FileEntry;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ExtensionSet {
    extensions: HashSet<String>,
}

impl ExtensionSet {
    pub fn from_groups(groups: &str) -> Self {
        let mut extensions = HashSet::new();
        for group in groups.split(',') {
            for ext in group_extensions(&group.trim().to_ascii_lowercase()) {
                extensions.insert((*ext).to_string());
            }
        }
        Self { extensions }
    }

    pub fn matches(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| {
                let ext = format!(".{}", ext.to_string_lossy().to_ascii_lowercase());
                self.extensions.contains(&ext)
            })
            .unwrap_or(false)
    }
}

fn group_extensions(group: &str) -> &'static [&'static str] {
    match group {
        "jpeg" => &[".jpeg", ".jpg"],
        "raw" => &[".cr2", ".cr3", ".nef", ".arw", ".raf", ".rw2", ".orf", ".dng"],
        "heif" => &[".heic", ".heif"],
        _ => &[],
    }
}

pub fn filter_entries(entries: Vec<FileEntry>, set: &ExtensionSet) -> Vec<FileEntry> {
    entries
        .into_iter()
        .filter(|entry| set.matches(&entry.name))
        .collect()
}
