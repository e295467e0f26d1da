use crate::dataset::{find_latest_snapshot, load_regions};
use crate::error::{Result, SiteError};
use crate::site::{HtmlRenderer, OutputWriter, PageRenderer, SiteTree};
use crate::utils::SiteConfig;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Paths and clock for one build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory holding the `DD.MM.YYYY` snapshot folders
    pub data_dir: PathBuf,
    /// Cleared and recreated on every build
    pub out_dir: PathBuf,
    /// Directory that may contain `styles.css`
    pub static_dir: Option<PathBuf>,
    /// Stamped into every page as the "Last build" time
    pub build_time: DateTime<Utc>,
}

impl BuildOptions {
    /// `Data/`, `dist/` and `static/` under a project root
    pub fn for_root(root: &Path, build_time: DateTime<Utc>) -> Self {
        Self {
            data_dir: root.join("Data"),
            out_dir: root.join("dist"),
            static_dir: Some(root.join("static")),
            build_time,
        }
    }
}

/// Outcome of a successful build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub snapshot_date: NaiveDate,
    pub predicted_date: NaiveDate,
    pub regions: usize,
    pub countries: usize,
    pub rows: usize,
    pub stock_pages: usize,
    pub pages_written: usize,
    pub sitemap_entries: usize,
    pub out_dir: PathBuf,
}

impl BuildReport {
    pub fn print_summary(&self) {
        println!("Snapshot date:   {}", self.snapshot_date);
        println!("Predicted date:  {}", self.predicted_date);
        println!("Regions:         {}", self.regions);
        println!("Countries:       {}", self.countries);
        println!("Rows:            {}", self.rows);
        println!("Stock pages:     {}", self.stock_pages);
        println!("Pages written:   {}", self.pages_written);
        println!("Sitemap entries: {}", self.sitemap_entries);
    }

    /// Save the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SiteError::io(path, std::io::Error::from(e)))?;
        std::fs::write(path, json).map_err(|e| SiteError::io(path, e))
    }
}

/// Build the site with the default HTML renderer
pub fn build(config: &SiteConfig, options: &BuildOptions) -> Result<BuildReport> {
    let renderer = HtmlRenderer::new(config, options.build_time);
    build_with_renderer(config, options, &renderer)
}

/// Run the full pipeline.
///
/// All input is read and the page tree assembled before the output root is
/// touched, so a missing snapshot or unreadable CSV leaves the previous
/// output in place.
pub fn build_with_renderer(
    config: &SiteConfig,
    options: &BuildOptions,
    renderer: &dyn PageRenderer,
) -> Result<BuildReport> {
    guard_output_dir(options)?;

    let snapshot = find_latest_snapshot(&options.data_dir)?;
    let regions = load_regions(&snapshot)?;
    let tree = SiteTree::build(snapshot.date, &regions, config);
    let stats = tree.stats();
    info!(
        regions = stats.regions,
        countries = stats.countries,
        rows = stats.rows,
        stock_pages = stats.stock_pages,
        "Site tree assembled"
    );

    let writer = OutputWriter::new(&options.out_dir);
    writer.reset()?;
    writer.write_stylesheet(options.static_dir.as_deref())?;

    let mut pages_written = 0;
    for page in tree.pages() {
        writer.write_page(page, &renderer.render(page))?;
        pages_written += 1;
    }
    info!(pages = pages_written, "Pages written");

    writer.write_robots(&config.base_url)?;
    let sitemap_entries = writer.write_sitemap(&config.base_url)?;

    Ok(BuildReport {
        snapshot_date: tree.session_date,
        predicted_date: tree.predicted_date,
        regions: stats.regions,
        countries: stats.countries,
        rows: stats.rows,
        stock_pages: stats.stock_pages,
        pages_written,
        sitemap_entries,
        out_dir: options.out_dir.clone(),
    })
}

/// Refuse output roots whose reset would delete the input data or stylesheet
fn guard_output_dir(options: &BuildOptions) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| SiteError::io(".", e))?;
    let absolute = |p: &Path| {
        if p.is_absolute() {
            normalize_path(p)
        } else {
            normalize_path(&cwd.join(p))
        }
    };
    let out_dir = absolute(&options.out_dir);

    let data_dir = absolute(&options.data_dir);
    if data_dir.starts_with(&out_dir) {
        return Err(SiteError::Config(format!(
            "output directory {} contains the data directory {}",
            out_dir.display(),
            data_dir.display()
        )));
    }

    if let Some(static_dir) = options.static_dir.as_deref().map(absolute) {
        if static_dir.starts_with(&out_dir) {
            return Err(SiteError::Config(format!(
                "output directory {} contains the static directory {}",
                out_dir.display(),
                static_dir.display()
            )));
        }
    }
    Ok(())
}

/// Resolve `.` and `..` lexically, without touching the filesystem
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
