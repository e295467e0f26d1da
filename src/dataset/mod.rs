//! Snapshot discovery and loading.

pub mod locator;

use crate::data::{read_country_file, CountryData, RegionData};
use crate::error::{Result, SiteError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use locator::{find_latest_snapshot, parse_snapshot_name, Snapshot};

/// Entries of `dir` accepted by `keep`, sorted case-insensitively by file name
fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| SiteError::io(dir, e))? {
        let path = entry.map_err(|e| SiteError::io(dir, e))?.path();
        if keep(&path) {
            paths.push(path);
        }
    }

    paths.sort_by_cached_key(|p| {
        let name = file_name(p);
        (name.to_lowercase(), name)
    });
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_country_csv(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "csv")
}

/// Read every region directory and country CSV of a snapshot.
///
/// Regions and countries come back sorted case-insensitively by name;
/// rows keep their file order.
pub fn load_regions(snapshot: &Snapshot) -> Result<Vec<RegionData>> {
    let region_dirs = sorted_entries(&snapshot.path, |p| p.is_dir())?;

    let mut regions = Vec::with_capacity(region_dirs.len());
    for region_dir in region_dirs {
        let name = file_name(&region_dir);

        let mut countries = Vec::new();
        for csv_path in sorted_entries(&region_dir, is_country_csv)? {
            let stem = csv_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let rows = read_country_file(&csv_path)?;
            debug!(region = %name, file = %csv_path.display(), rows = rows.len(), "Loaded country");

            countries.push(CountryData {
                name: CountryData::display_name(&stem),
                rows,
            });
        }

        info!(region = %name, countries = countries.len(), "Loaded region");
        regions.push(RegionData { name, countries });
    }

    Ok(regions)
}
