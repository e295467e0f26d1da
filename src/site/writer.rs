use super::page::Page;
use super::sitemap::{collect_index_paths, render_robots, render_sitemap};
use crate::error::{Result, SiteError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Written when the project has no `static/styles.css`
pub const FALLBACK_STYLESHEET: &str = "\
body{font-family:system-ui;background:#0b1220;color:#e8f0fe;margin:0} \
.container{max-width:1100px;margin:0 auto;padding:24px} \
.card{background:#111a2b;border-radius:16px;padding:16px} \
.h1{font-size:28px} .h2{font-size:22px} .h3{font-size:18px} \
.grid{display:grid;gap:16px} \
.table{width:100%;border-collapse:collapse} \
.table td,.table th{border-bottom:1px solid #1f2a44;padding:8px} \
.small{color:#9fb3c8}";

const STYLESHEET: &str = "styles.css";

/// Owns the output root for one build
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Delete everything under the output root and recreate it empty
    pub fn reset(&self) -> Result<()> {
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root).map_err(|e| SiteError::io(&self.root, e))?;
        }
        std::fs::create_dir_all(&self.root).map_err(|e| SiteError::io(&self.root, e))?;
        info!(out_dir = %self.root.display(), "Output directory reset");
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }
        std::fs::write(path, contents).map_err(|e| SiteError::io(path, e))
    }

    /// Copy `static/styles.css` from `static_dir`, or write the fallback
    pub fn write_stylesheet(&self, static_dir: Option<&Path>) -> Result<()> {
        let dest = self.root.join("static").join(STYLESHEET);
        let source = static_dir.map(|dir| dir.join(STYLESHEET)).filter(|p| p.is_file());

        match source {
            Some(source) => {
                std::fs::create_dir_all(self.root.join("static"))
                    .map_err(|e| SiteError::io(self.root.join("static"), e))?;
                std::fs::copy(&source, &dest).map_err(|e| SiteError::io(&source, e))?;
                debug!(source = %source.display(), "Copied stylesheet");
            }
            None => {
                self.write_file(&dest, FALLBACK_STYLESHEET)?;
                debug!("Wrote fallback stylesheet");
            }
        }
        Ok(())
    }

    /// Write a rendered page to the file its path maps to
    pub fn write_page(&self, page: &Page, html: &str) -> Result<PathBuf> {
        let path = page.path.output_file(&self.root);
        self.write_file(&path, html)?;
        Ok(path)
    }

    pub fn write_robots(&self, base_url: &str) -> Result<()> {
        self.write_file(&self.root.join("robots.txt"), &render_robots(base_url))
    }

    /// Derive `sitemap.xml` from the index files on disk; returns the entry count
    pub fn write_sitemap(&self, base_url: &str) -> Result<usize> {
        let paths = collect_index_paths(&self.root)?;
        self.write_file(&self.root.join("sitemap.xml"), &render_sitemap(base_url, &paths))?;
        info!(entries = paths.len(), "Sitemap written");
        Ok(paths.len())
    }
}
