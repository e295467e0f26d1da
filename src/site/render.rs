use super::page::{Link, Page, PageBody, SitePath, StockDetail, TableRow};
use crate::utils::SiteConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Turns page data into the text written to disk
pub trait PageRenderer {
    fn render(&self, page: &Page) -> String;
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Close price with two decimals, rounded half to even
fn format_close(close: Decimal) -> String {
    let rounded = close.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    format!("{rounded:.2}")
}

/// Default HTML renderer: one shared layout around a per-kind body
pub struct HtmlRenderer<'a> {
    config: &'a SiteConfig,
    build_time: String,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a SiteConfig, build_time: DateTime<Utc>) -> Self {
        Self {
            config,
            build_time: build_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn href(&self, path: &SitePath) -> String {
        escape_html(&path.index_href(self.base_url()))
    }

    fn link(&self, link: &Link) -> String {
        format!(
            "<li><a href='{}'>{}</a></li>",
            self.href(&link.path),
            escape_html(&link.label)
        )
    }

    fn body(&self, page: &Page) -> String {
        match &page.body {
            PageBody::Home { regions } => {
                let items: String = regions.iter().map(|l| self.link(l)).collect();
                format!(
                    "<section class='card'><h2 class='h2'>Browse Regions</h2>\
                     <ul>{items}</ul></section>"
                )
            }
            PageBody::Region { name, countries } => {
                let items: String = countries.iter().map(|l| self.link(l)).collect();
                format!(
                    "<section class='card'><h2 class='h2'>Countries in {}</h2>\
                     <ul>{items}</ul></section>",
                    escape_html(name)
                )
            }
            PageBody::Country { name, rows } => {
                let rows: Vec<String> = rows.iter().map(|r| self.table_row(r)).collect();
                format!(
                    "<section class='card'><h2 class='h2'>{} — Stocks</h2>\
                     <table class='table'><thead><tr><th>Symbol</th><th>Name</th><th>Exchange</th>\
                     <th>Sector</th><th>Industry</th><th>Close</th><th>Signal</th></tr></thead>\
                     <tbody>{}</tbody></table></section>",
                    escape_html(name),
                    rows.join("\n")
                )
            }
            PageBody::Stock(stock) => self.stock(stock),
        }
    }

    fn table_row(&self, row: &TableRow) -> String {
        let (symbol, name) = match &row.detail {
            Some(path) => {
                let href = self.href(path);
                (
                    format!("<a href='{href}'>{}</a>", escape_html(&row.symbol)),
                    format!("<a href='{href}'>{}</a>", escape_html(&row.name)),
                )
            }
            None => (escape_html(&row.symbol), escape_html(&row.name)),
        };
        let close = row.close.map(format_close).unwrap_or_default();
        let signal = row.signal.map(|s| s.as_str()).unwrap_or_default();

        format!(
            "<tr><td>{symbol}</td><td>{name}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{close}</td><td>{signal}</td></tr>",
            escape_html(&row.exchange),
            escape_html(&row.sector),
            escape_html(&row.industry),
        )
    }

    fn stock(&self, stock: &StockDetail) -> String {
        let ohlc = &stock.ohlc;
        let c = &stock.classification;
        format!(
            "\n<article class=\"card\">\n\
             \x20 <h2 class=\"h2\">{name} ({symbol})</h2>\n\
             \x20 <p class=\"small\">Region: {region} · Country: {country} \
             · Exchange: {exchange}</p>\n\
             \x20 <p class=\"small\">Session Date: {session} \
             · OHLC: O {o}, H {h}, L {l}, C {cl}</p>\n\
             \x20 <div class=\"card\">\n\
             \x20   <h3 class=\"h3\">Prediction for {predicted}</h3>\n\
             \x20   <p><strong>{signal}</strong> — {reason} (confidence {pct}%).</p>\n\
             \x20 </div>\n\
             </article>",
            name = escape_html(&stock.name),
            symbol = escape_html(&stock.symbol),
            region = escape_html(&stock.region),
            country = escape_html(&stock.country),
            exchange = escape_html(&stock.exchange),
            session = stock.session_date.format("%Y-%m-%d"),
            o = ohlc.open,
            h = ohlc.high,
            l = ohlc.low,
            cl = ohlc.close,
            predicted = stock.predicted_date.format("%Y-%m-%d"),
            signal = c.signal,
            reason = escape_html(c.reason),
            pct = c.confidence_pct(),
        )
    }
}

impl PageRenderer for HtmlRenderer<'_> {
    fn render(&self, page: &Page) -> String {
        let cfg = self.config;
        let base = self.base_url();
        let author = &cfg.author;

        format!(
            r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<link rel="canonical" href="{canonical}">
<meta name="description" content="{description}">
<meta name="keywords" content="{keywords}">
<meta name="author" content="{author_name}">
<link rel="stylesheet" href="{css}">
</head>
<body>
<div class="container">
<header class="hero card">
  <div class="breadcrumbs"><a href="{home}">Home</a></div>
  <h1 class="h1">{title}</h1>
  <p class="small">{tagline}</p>
  <div class="kv">
    <div><strong>Purpose:</strong> Transparent, reproducible SSG for daily stock pages.</div>
    <div><strong>Last build:</strong> {build_time}</div>
  </div>
</header>
<main class="grid">
{body}
</main>
<footer class="footer">
  <div>E-E-A-T: Author <strong>{author_name}</strong> · Org: {org} · Contact: <a href="mailto:{email}">{email}</a></div>
  <div>Data provenance: Uploaded CSVs (OHLC). Session date = exchange local date. Prediction = next business day (holidays not applied).</div>
</footer>
</div>
</body>
</html>"#,
            title = escape_html(&page.title),
            canonical = escape_html(&page.path.canonical_url(base)),
            description = escape_html(&page.description),
            keywords = escape_html(&cfg.keywords.join(", ")),
            author_name = escape_html(&author.name),
            css = escape_html(&format!("{base}/static/styles.css")),
            home = self.href(&SitePath::root()),
            tagline = escape_html(&cfg.site_tagline),
            build_time = self.build_time,
            body = self.body(page),
            org = escape_html(&author.org),
            email = escape_html(&author.contact_email),
        )
    }
}
