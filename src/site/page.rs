use crate::data::Ohlc;
use crate::signals::{Classification, Signal};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

/// File every page directory is written as
pub const INDEX_FILE: &str = "index.html";

/// Site-relative location of a page as slug segments; empty for home
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SitePath(Vec<String>);

impl SitePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, slug: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(slug.to_string());
        Self(segments)
    }

    /// `/` for home, `/asia/india/` below it
    pub fn url_path(&self) -> String {
        let mut path = String::from("/");
        for segment in &self.0 {
            path.push_str(segment);
            path.push('/');
        }
        path
    }

    pub fn canonical_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.url_path())
    }

    /// Link target used inside pages
    pub fn index_href(&self, base_url: &str) -> String {
        format!("{}{}{}", base_url, self.url_path(), INDEX_FILE)
    }

    /// Where the page lands under the output root
    pub fn output_file(&self, out_dir: &Path) -> PathBuf {
        let mut path = out_dir.to_path_buf();
        path.extend(&self.0);
        path.join(INDEX_FILE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub path: SitePath,
}

/// One row of a country's stock table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub sector: String,
    pub industry: String,
    pub close: Option<Decimal>,
    pub signal: Option<Signal>,
    /// Set only when the row has a detail page
    pub detail: Option<SitePath>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockDetail {
    pub name: String,
    pub symbol: String,
    pub region: String,
    pub country: String,
    pub exchange: String,
    pub session_date: NaiveDate,
    pub predicted_date: NaiveDate,
    pub ohlc: Ohlc,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Home { regions: Vec<Link> },
    Region { name: String, countries: Vec<Link> },
    Country { name: String, rows: Vec<TableRow> },
    Stock(Box<StockDetail>),
}

/// A page before rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub path: SitePath,
    pub title: String,
    pub description: String,
    pub body: PageBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_paths() {
        let root = SitePath::root();
        assert_eq!(root.url_path(), "/");
        assert_eq!(root.canonical_url("https://x.test/site"), "https://x.test/site/");
        assert_eq!(root.index_href(""), "/index.html");
        assert_eq!(root.output_file(Path::new("dist")), Path::new("dist/index.html"));
    }

    #[test]
    fn test_nested_paths() {
        let stock = SitePath::root().child("asia").child("india").child("reliance");
        assert_eq!(stock.url_path(), "/asia/india/reliance/");
        assert_eq!(
            stock.index_href("/sub"),
            "/sub/asia/india/reliance/index.html"
        );
        assert_eq!(
            stock.output_file(Path::new("dist")),
            Path::new("dist/asia/india/reliance/index.html")
        );
    }
}
