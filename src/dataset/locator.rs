use crate::error::{Result, SiteError};
use chrono::NaiveDate;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Snapshot folders are named `DD.MM.YYYY`
const SNAPSHOT_DATE_FORMAT: &str = "%d.%m.%Y";

fn snapshot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("snapshot pattern is valid")
    })
}

/// The dated input directory a build reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Session date the snapshot represents
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// Parse a folder name as a snapshot date.
///
/// Returns `None` for names outside the strict pattern and for impossible
/// dates such as `31.02.2024`.
pub fn parse_snapshot_name(name: &str) -> Option<NaiveDate> {
    if !snapshot_pattern().is_match(name) {
        return None;
    }
    match NaiveDate::parse_from_str(name, SNAPSHOT_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(folder = name, error = %e, "Skipping snapshot folder with invalid date");
            None
        }
    }
}

/// Find the most recent `DD.MM.YYYY` subdirectory of `data_dir`.
pub fn find_latest_snapshot(data_dir: &Path) -> Result<Snapshot> {
    if !data_dir.is_dir() {
        return Err(SiteError::NoDataFound {
            path: data_dir.to_path_buf(),
            reason: "data directory does not exist".to_string(),
        });
    }

    let entries = std::fs::read_dir(data_dir).map_err(|e| SiteError::io(data_dir, e))?;

    let mut latest: Option<Snapshot> = None;
    for entry in entries {
        let entry = entry.map_err(|e| SiteError::io(data_dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(date) = parse_snapshot_name(&name.to_string_lossy()) else {
            debug!(folder = %path.display(), "Ignoring non-snapshot folder");
            continue;
        };

        if latest.as_ref().map_or(true, |current| date > current.date) {
            latest = Some(Snapshot { date, path });
        }
    }

    let snapshot = latest.ok_or_else(|| SiteError::NoDataFound {
        path: data_dir.to_path_buf(),
        reason: "no dated folder like DD.MM.YYYY".to_string(),
    })?;

    info!(date = %snapshot.date, path = %snapshot.path.display(), "Selected snapshot");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_snapshot_name() {
        assert_eq!(
            parse_snapshot_name("05.03.2024"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(parse_snapshot_name("5.3.2024"), None);
        assert_eq!(parse_snapshot_name("2024-03-05"), None);
        assert_eq!(parse_snapshot_name("05.03.2024-old"), None);
        assert_eq!(parse_snapshot_name("31.02.2024"), None);
    }

    #[test]
    fn test_selects_latest_by_date_not_name() {
        let dir = tempfile::tempdir().unwrap();
        // Lexicographically "31.12.2023" > "01.01.2024", chronologically not
        fs::create_dir(dir.path().join("31.12.2023")).unwrap();
        fs::create_dir(dir.path().join("01.01.2024")).unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("02.01.2024"), "a file, not a folder").unwrap();

        let snapshot = find_latest_snapshot(dir.path()).unwrap();
        assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(snapshot.path, dir.path().join("01.01.2024"));
    }

    #[test]
    fn test_missing_directory_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let result = find_latest_snapshot(&dir.path().join("Data"));
        assert!(matches!(result, Err(SiteError::NoDataFound { .. })));
    }

    #[test]
    fn test_no_matching_folders_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("latest")).unwrap();
        fs::create_dir(dir.path().join("31.02.2024")).unwrap();

        let result = find_latest_snapshot(dir.path());
        assert!(matches!(result, Err(SiteError::NoDataFound { .. })));
    }
}
