mod config;
mod engine;
mod entries;
mod exif_reader;
mod extensions;
mod journal;
mod sorter;

pub use config::{app_paths, load_config, save_config, AppConfig, AppPaths};
pub use engine::{
    run_batch, undo_last, BatchOptions, BatchOutcome, BatchStats, NumberingOptions, RenameFailure,
    UndoOutcome,
};
pub use entries::{list_entries, modified_time, FileEntry};
pub use exif_reader::{read_capture_datetime, CaptureTimeError};
pub use extensions::{filter_entries, ExtensionSet};
pub use journal::{load_latest_log, save_rename_log, RenameLog, RenameRecord};
pub use sorter::{sort_entries, SortKey, SortOptions};
