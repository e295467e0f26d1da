use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use stock_pages::{build, BuildOptions, SiteConfig, SiteError};
use tempfile::TempDir;

const HEADER: &str = "Symbol,Description,Exchange,Sector,Industry,Open,High,Low,Close\n";

fn config() -> SiteConfig {
    SiteConfig {
        base_url: "https://example.test/stocks".to_string(),
        site_title: "Stock Pages".to_string(),
        site_tagline: "Daily OHLC".to_string(),
        ..Default::default()
    }
}

fn options(root: &Path) -> BuildOptions {
    BuildOptions::for_root(root, Utc.with_ymd_and_hms(2024, 3, 8, 20, 0, 0).unwrap())
}

/// One snapshot, one region, one country: a complete row and a row missing close
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let region = dir.path().join("Data").join("08.03.2024").join("Asia");
    fs::create_dir_all(&region).unwrap();
    fs::write(
        region.join("india.csv"),
        format!(
            "{HEADER}RELI,Reliance Industries Ltd.,NSE,Energy,Oil & Gas,10,12,8,11.8\n\
             TCS,Tata Consultancy,NSE,Tech,IT Services,5,6,4,\n"
        ),
    )
    .unwrap();
    // Older snapshot must be ignored
    let old = dir.path().join("Data").join("07.03.2024").join("Europe");
    fs::create_dir_all(&old).unwrap();
    fs::write(old.join("france.csv"), format!("{HEADER}AIR,Airbus,EPA,,,1,2,1,2\n")).unwrap();
    dir
}

fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(base: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                let rel = path.strip_prefix(base).unwrap().to_path_buf();
                out.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

#[test]
fn test_end_to_end_build() {
    let dir = project();
    let opts = options(dir.path());
    let report = build(&config(), &opts).unwrap();

    assert_eq!(report.snapshot_date.to_string(), "2024-03-08");
    assert_eq!(report.predicted_date.to_string(), "2024-03-11");
    assert_eq!(report.regions, 1);
    assert_eq!(report.countries, 1);
    assert_eq!(report.rows, 2);
    assert_eq!(report.stock_pages, 1);
    assert_eq!(report.sitemap_entries, 4);

    let dist = dir.path().join("dist");
    let home = fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(home.contains("<a href='https://example.test/stocks/asia/index.html'>Asia</a>"));
    assert!(!home.contains("Europe"));

    let region = fs::read_to_string(dist.join("asia/index.html")).unwrap();
    assert!(region.contains(
        "<a href='https://example.test/stocks/asia/india/index.html'>India</a>"
    ));

    let country = fs::read_to_string(dist.join("asia/india/index.html")).unwrap();
    assert_eq!(country.matches("<tr><td>").count(), 2);
    let reli_href = "https://example.test/stocks/asia/india/reliance-industries-ltd/index.html";
    assert!(country.contains(&format!("<a href='{reli_href}'>RELI</a>")));
    assert!(country.contains("<td>Oil &amp; Gas</td><td>11.80</td><td>Bullish</td>"));
    assert!(country.contains("<tr><td>TCS</td><td>Tata Consultancy</td>"));

    let stock =
        fs::read_to_string(dist.join("asia/india/reliance-industries-ltd/index.html")).unwrap();
    assert!(stock.contains(concat!(
        r#"<link rel="canonical" "#,
        r#"href="https://example.test/stocks/asia/india/reliance-industries-ltd/">"#
    )));
    assert!(stock.contains("Prediction for 2024-03-11"));
    assert!(stock.contains("(confidence 82%)"));
    assert!(!dist.join("asia/india/tata-consultancy").exists());

    let sitemap = fs::read_to_string(dist.join("sitemap.xml")).unwrap();
    assert_eq!(sitemap.matches("<loc>").count(), 4);
    for loc in [
        "https://example.test/stocks/",
        "https://example.test/stocks/asia/",
        "https://example.test/stocks/asia/india/",
        "https://example.test/stocks/asia/india/reliance-industries-ltd/",
    ] {
        assert!(sitemap.contains(&format!("<loc>{loc}</loc>")), "missing {loc}");
    }

    let robots = fs::read_to_string(dist.join("robots.txt")).unwrap();
    assert_eq!(
        robots,
        "Sitemap: https://example.test/stocks/sitemap.xml\nUser-agent: *\nAllow: /\n"
    );
    assert!(dist.join("static/styles.css").is_file());
}

#[test]
fn test_rebuild_is_byte_identical() {
    let dir = project();
    let opts = options(dir.path());

    build(&config(), &opts).unwrap();
    let first = read_tree(&opts.out_dir);
    build(&config(), &opts).unwrap();
    let second = read_tree(&opts.out_dir);

    assert_eq!(first, second);
}

#[test]
fn test_stale_output_is_removed() {
    let dir = project();
    let opts = options(dir.path());
    let stale = opts.out_dir.join("europe/france/index.html");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "old build").unwrap();

    let report = build(&config(), &opts).unwrap();

    assert!(!stale.exists());
    assert!(!opts.out_dir.join("europe").exists());
    assert_eq!(report.sitemap_entries, 4);
}

#[test]
fn test_missing_data_leaves_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    fs::create_dir_all(&opts.out_dir).unwrap();
    fs::write(opts.out_dir.join("index.html"), "previous").unwrap();

    let err = build(&config(), &opts).unwrap_err();
    assert!(matches!(err, SiteError::NoDataFound { .. }));
    assert_eq!(
        fs::read_to_string(opts.out_dir.join("index.html")).unwrap(),
        "previous"
    );

    fs::create_dir_all(&opts.data_dir).unwrap();
    let err = build(&config(), &opts).unwrap_err();
    assert!(matches!(err, SiteError::NoDataFound { .. }));
}

#[test]
fn test_custom_stylesheet_is_copied() {
    let dir = project();
    let opts = options(dir.path());
    fs::create_dir_all(dir.path().join("static")).unwrap();
    fs::write(dir.path().join("static/styles.css"), "body{color:red}").unwrap();

    build(&config(), &opts).unwrap();

    let css = fs::read_to_string(opts.out_dir.join("static/styles.css")).unwrap();
    assert_eq!(css, "body{color:red}");
}

#[test]
fn test_empty_base_url_builds_root_relative_links() {
    let dir = project();
    let opts = options(dir.path());
    let config = SiteConfig {
        site_title: "Stocks".to_string(),
        ..Default::default()
    };

    build(&config, &opts).unwrap();

    let home = fs::read_to_string(opts.out_dir.join("index.html")).unwrap();
    assert!(home.contains("<a href='/asia/index.html'>Asia</a>"));
    let sitemap = fs::read_to_string(opts.out_dir.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>/asia/india/</loc>"));
}

#[test]
fn test_report_serializes_to_json() {
    let dir = project();
    let opts = options(dir.path());
    let report = build(&config(), &opts).unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["snapshot_date"], "2024-03-08");
    assert_eq!(value["predicted_date"], "2024-03-11");
    assert_eq!(value["stock_pages"], 1);

    let path = dir.path().join("report.json");
    report.write_json(&path).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, value);
}

#[test]
fn test_colliding_slug_keeps_last_page_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let region = dir.path().join("Data").join("08.03.2024").join("Asia");
    fs::create_dir_all(&region).unwrap();
    fs::write(
        region.join("india.csv"),
        format!(
            "{HEADER}A,Alpha Corp.,NSE,,,10,12,8,11\n\
             B,alpha-corp,NSE,,,10,12,8,9\n"
        ),
    )
    .unwrap();
    let opts = options(dir.path());

    let report = build(&config(), &opts).unwrap();
    assert_eq!(report.stock_pages, 2);

    let page = fs::read_to_string(opts.out_dir.join("asia/india/alpha-corp/index.html")).unwrap();
    assert!(page.contains("(B)"));
    assert!(!page.contains("(A)"));

    let sitemap = fs::read_to_string(opts.out_dir.join("sitemap.xml")).unwrap();
    let loc = "<loc>https://example.test/stocks/asia/india/alpha-corp/</loc>";
    assert_eq!(sitemap.matches(loc).count(), 1);
    assert_eq!(report.sitemap_entries, 4);
}
