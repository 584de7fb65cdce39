use crate::entries::{modified_time, FileEntry};
use crate::exif_reader::{read_capture_datetime, CaptureTimeError};
use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::path::Path;
use std::time::UNIX_EPOCH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    ModTime,
    CaptureTime,
}

impl SortKey {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "time" => SortKey::ModTime,
            "exif" => SortKey::CaptureTime,
            _ => SortKey::Name,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SortOptions {
    pub key: SortKey,
    pub reverse: bool,
}

pub fn sort_entries(entries: &mut [FileEntry], options: &SortOptions) {
    sort_entries_with(entries, options, read_capture_datetime)
}

fn sort_entries_with<F>(entries: &mut [FileEntry], options: &SortOptions, read_capture: F)
where
    F: Fn(&Path) -> Result<DateTime<Local>, CaptureTimeError>,
{
    // reverse は比較結果の反転。同値は安定ソートで元の並びを保つ
    entries.sort_by(|a, b| {
        let ordering = compare_entries(a, b, options.key, &read_capture);
        if options.reverse {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn compare_entries<F>(a: &FileEntry, b: &FileEntry, key: SortKey, read_capture: &F) -> Ordering
where
    F: Fn(&Path) -> Result<DateTime<Local>, CaptureTimeError>,
{
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::ModTime => compare_modified(a, b),
        SortKey::CaptureTime => match (read_capture(&a.path), read_capture(&b.path)) {
            (Ok(time_a), Ok(time_b)) => time_a.cmp(&time_b),
            _ => compare_modified(a, b),
        },
    }
}

fn compare_modified(a: &FileEntry, b: &FileEntry) -> Ordering {
    let time_a = modified_time(&a.path).unwrap_or(UNIX_EPOCH);
    let time_b = modified_time(&b.path).unwrap_or(UNIX_EPOCH);
    time_a.cmp(&time_b)
}

#[cfg(test)]
mod tests {
    use super::{sort_entries, sort_entries_with, SortKey, SortOptions};
    use crate::entries::FileEntry;
    use crate::exif_reader::CaptureTimeError;
    use chrono::{DateTime, Local, TimeZone};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::tempdir;

    fn entry(name: &str, dir: &Path) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: dir.join(name),
        }
    }

    fn touch_with_mtime(path: &Path, secs_past_epoch: u64) {
        fs::write(path, b"x").expect("write file");
        let file = fs::File::options()
            .write(true)
            .open(path)
            .expect("open file");
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs_past_epoch))
            .expect("set mtime");
    }

    fn capture(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn parse_is_permissive() {
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("time"), SortKey::ModTime);
        assert_eq!(SortKey::parse("exif"), SortKey::CaptureTime);
        assert_eq!(SortKey::parse(" EXIF "), SortKey::CaptureTime);
        assert_eq!(SortKey::parse("garbage"), SortKey::Name);
        assert_eq!(SortKey::parse(""), SortKey::Name);
    }

    #[test]
    fn name_sort_is_ascending() {
        let dir = PathBuf::from("/tmp");
        let mut entries = vec![entry("b.jpg", &dir), entry("c.jpg", &dir), entry("a.jpg", &dir)];
        sort_entries(
            &mut entries,
            &SortOptions {
                key: SortKey::Name,
                reverse: false,
            },
        );
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn reverse_inverts_order_but_keeps_tie_order() {
        let mut entries = vec![
            FileEntry {
                name: "same.jpg".to_string(),
                path: PathBuf::from("/one/same.jpg"),
            },
            FileEntry {
                name: "same.jpg".to_string(),
                path: PathBuf::from("/two/same.jpg"),
            },
            FileEntry {
                name: "aaa.jpg".to_string(),
                path: PathBuf::from("/one/aaa.jpg"),
            },
        ];
        sort_entries(
            &mut entries,
            &SortOptions {
                key: SortKey::Name,
                reverse: true,
            },
        );
        assert_eq!(entries[0].path, PathBuf::from("/one/same.jpg"));
        assert_eq!(entries[1].path, PathBuf::from("/two/same.jpg"));
        assert_eq!(entries[2].name, "aaa.jpg");
    }

    #[test]
    fn mod_time_sort_orders_by_timestamp() {
        let temp = tempdir().expect("tempdir");
        touch_with_mtime(&temp.path().join("new.jpg"), 2_000);
        touch_with_mtime(&temp.path().join("old.jpg"), 1_000);

        let mut entries = vec![entry("new.jpg", temp.path()), entry("old.jpg", temp.path())];
        sort_entries(
            &mut entries,
            &SortOptions {
                key: SortKey::ModTime,
                reverse: false,
            },
        );
        assert_eq!(entries[0].name, "old.jpg");
        assert_eq!(entries[1].name, "new.jpg");
    }

    #[test]
    fn capture_time_sort_uses_embedded_timestamps() {
        let dir = PathBuf::from("/tmp");
        let mut entries = vec![entry("late.jpg", &dir), entry("early.jpg", &dir)];
        let reader = |path: &Path| match path.file_name().and_then(|n| n.to_str()) {
            Some("early.jpg") => Ok(capture(2023, 1, 1)),
            Some("late.jpg") => Ok(capture(2023, 6, 1)),
            _ => Err(CaptureTimeError::Missing),
        };
        sort_entries_with(
            &mut entries,
            &SortOptions {
                key: SortKey::CaptureTime,
                reverse: false,
            },
            reader,
        );
        assert_eq!(entries[0].name, "early.jpg");
        assert_eq!(entries[1].name, "late.jpg");
    }

    #[test]
    fn capture_time_falls_back_per_pair_not_per_batch() {
        // a と c は撮影日時あり (c が先)、b は読めない。
        // mtime は a < c < b。a-b と c-b の比較だけが mtime に落ちる。
        let temp = tempdir().expect("tempdir");
        touch_with_mtime(&temp.path().join("a.jpg"), 1_000);
        touch_with_mtime(&temp.path().join("c.jpg"), 2_000);
        touch_with_mtime(&temp.path().join("b.jpg"), 3_000);

        let mut entries = vec![
            entry("a.jpg", temp.path()),
            entry("b.jpg", temp.path()),
            entry("c.jpg", temp.path()),
        ];
        let reader = |path: &Path| match path.file_name().and_then(|n| n.to_str()) {
            Some("a.jpg") => Ok(capture(2023, 3, 1)),
            Some("c.jpg") => Ok(capture(2023, 1, 1)),
            _ => Err(CaptureTimeError::Missing),
        };
        sort_entries_with(
            &mut entries,
            &SortOptions {
                key: SortKey::CaptureTime,
                reverse: false,
            },
            reader,
        );

        // 全ペア mtime 落ちなら a,c,b、名前順なら a,b,c。
        // ペア単位のフォールバックだけが c,a,b を生む。
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c.jpg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn capture_time_sort_without_any_exif_degrades_to_mod_time() {
        let temp = tempdir().expect("tempdir");
        touch_with_mtime(&temp.path().join("z.jpg"), 1_000);
        touch_with_mtime(&temp.path().join("a.jpg"), 2_000);

        let mut entries = vec![entry("a.jpg", temp.path()), entry("z.jpg", temp.path())];
        sort_entries(
            &mut entries,
            &SortOptions {
                key: SortKey::CaptureTime,
                reverse: false,
            },
        );
        assert_eq!(entries[0].name, "z.jpg");
        assert_eq!(entries[1].name, "a.jpg");
    }
}
