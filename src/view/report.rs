//! Report file naming.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

/// Timestamp layout used in report names.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Used when the input path has no file name.
const FALLBACK_STEM: &str = "report";

/// `<log_dir>/<stem>_<YYYYMMDD_HHMMSS>.txt` for a dump of `input` taken at `at`.
///
/// `<stem>` is the input file name without its last extension.
pub fn report_path<Tz>(input: &Path, log_dir: &Path, at: DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    log_dir.join(format!("{}_{}.txt", stem, at.format(TIMESTAMP_FORMAT)))
}
