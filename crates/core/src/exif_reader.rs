use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use exif::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureTimeError {
    #[error("撮影日時の読み込み対象を開けませんでした: {0}")]
    Open(#[source] std::io::Error),
    #[error("EXIFを解析できませんでした: {0}")]
    Decode(#[source] exif::Error),
    #[error("EXIFに撮影日時がありません")]
    Missing,
}

pub fn read_capture_datetime(path: &Path) -> Result<DateTime<Local>, CaptureTimeError> {
    let file = File::open(path).map_err(CaptureTimeError::Open)?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .map_err(CaptureTimeError::Decode)?;

    find_field_value(
        &exif,
        &["DateTimeOriginal", "DateTimeDigitized", "DateTime"],
    )
    .and_then(|raw| parse_date(&raw))
    .ok_or(CaptureTimeError::Missing)
}

fn find_field_value(exif: &exif::Exif, names: &[&str]) -> Option<String> {
    exif.fields().find_map(|field| {
        let tag_name = format!("{:?}", field.tag);
        if names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&tag_name))
        {
            Some(field.display_value().with_unit(exif).to_string())
        } else {
            None
        }
    })
}

fn parse_date(input: &str) -> Option<DateTime<Local>> {
    let normalized = input.trim();

    let candidates = [
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%.f%:z",
    ];

    for fmt in candidates {
        if let Ok(dt) = DateTime::parse_from_str(normalized, fmt) {
            return Some(dt.with_timezone(&Local));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            if let Some(local) = Local.from_local_datetime(&naive).single() {
                return Some(local);
            }
        }
    }

    None
}
