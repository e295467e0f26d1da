use super::page::INDEX_FILE;
use crate::error::{Result, SiteError};
use std::path::Path;

/// XML-escape a sitemap `loc` value
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

/// Site-relative URL paths (`/`, `/asia/`, ...) of every `index.html`
/// actually present under `out_dir`, sorted.
pub fn collect_index_paths(out_dir: &Path) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    walk(out_dir, "/", &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn walk(dir: &Path, url_prefix: &str, paths: &mut Vec<String>) -> Result<()> {
    for entry in std::fs::read_dir(dir).map_err(|e| SiteError::io(dir, e))? {
        let entry = entry.map_err(|e| SiteError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| SiteError::io(entry.path(), e))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_dir() {
            walk(&entry.path(), &format!("{url_prefix}{name}/"), paths)?;
        } else if file_type.is_file() && name == INDEX_FILE {
            paths.push(url_prefix.to_string());
        }
    }
    Ok(())
}

/// `urlset` document with one `loc` per path, prefixed with `base_url`
pub fn render_sitemap(base_url: &str, paths: &[String]) -> String {
    let urls: String = paths
        .iter()
        .map(|path| format!("<url><loc>{}</loc></url>", escape_xml(&format!("{base_url}{path}"))))
        .collect();

    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <urlset xmlns='http://www.sitemaps.org/schemas/sitemap/0.9'>{urls}</urlset>"
    )
}

pub fn render_robots(base_url: &str) -> String {
    format!("Sitemap: {base_url}/sitemap.xml\nUser-agent: *\nAllow: /\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collects_only_written_index_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("asia/india/alpha")).unwrap();
        fs::create_dir_all(root.join("static")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(root.join("asia/index.html"), "").unwrap();
        fs::write(root.join("asia/india/alpha/index.html"), "").unwrap();
        fs::write(root.join("static/styles.css"), "").unwrap();
        fs::write(root.join("asia/india/notes.html"), "").unwrap();

        let paths = collect_index_paths(root).unwrap();
        assert_eq!(paths, vec!["/", "/asia/", "/asia/india/alpha/"]);
    }

    #[test]
    fn test_render_sitemap() {
        let xml = render_sitemap(
            "https://x.test/s",
            &["/".to_string(), "/asia/".to_string()],
        );
        assert_eq!(
            xml,
            "<?xml version='1.0' encoding='UTF-8'?>\
             <urlset xmlns='http://www.sitemaps.org/schemas/sitemap/0.9'>\
             <url><loc>https://x.test/s/</loc></url>\
             <url><loc>https://x.test/s/asia/</loc></url></urlset>"
        );
    }

    #[test]
    fn test_loc_is_escaped() {
        let xml = render_sitemap("https://x.test/?a=1&b=2", &["/".to_string()]);
        assert!(xml.contains("<loc>https://x.test/?a=1&amp;b=2/</loc>"));
    }

    #[test]
    fn test_render_robots() {
        assert_eq!(
            render_robots("https://x.test"),
            "Sitemap: https://x.test/sitemap.xml\nUser-agent: *\nAllow: /\n"
        );
    }
}
