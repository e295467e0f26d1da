use super::page::{Link, Page, PageBody, SitePath, StockDetail, TableRow};
use super::slug::slug;
use crate::data::{CountryData, RegionData, StockRow};
use crate::signals::next_business_day;
use crate::utils::SiteConfig;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, warn};

const HOME_DESCRIPTION: &str = "Daily static stock prediction pages built from your uploaded CSVs.";

#[derive(Debug, Clone)]
pub struct CountryNode {
    pub page: Page,
    pub stocks: Vec<Page>,
}

#[derive(Debug, Clone)]
pub struct RegionNode {
    pub page: Page,
    pub countries: Vec<CountryNode>,
}

/// Home → Region → Country → Stock
#[derive(Debug, Clone)]
pub struct SiteTree {
    pub session_date: NaiveDate,
    pub predicted_date: NaiveDate,
    pub home: Page,
    pub regions: Vec<RegionNode>,
}

/// Page counts for a built tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub regions: usize,
    pub countries: usize,
    pub rows: usize,
    pub stock_pages: usize,
}

/// Tracks every path handed out so slug collisions get reported.
///
/// Colliding pages are still emitted; the later one overwrites the earlier
/// on disk.
#[derive(Default)]
struct PathRegistry {
    seen: HashSet<SitePath>,
}

impl PathRegistry {
    fn claim(&mut self, path: &SitePath, label: &str) {
        if !self.seen.insert(path.clone()) {
            warn!(
                path = %path.url_path(),
                name = label,
                "Slug collision: page will overwrite an earlier page"
            );
        }
    }
}

struct TreeBuilder<'a> {
    config: &'a SiteConfig,
    session_date: NaiveDate,
    predicted_date: NaiveDate,
    registry: PathRegistry,
}

impl SiteTree {
    /// Assemble every page for one snapshot.
    ///
    /// Each stock row yields exactly one table row and, when its OHLC is
    /// complete, one detail page.
    pub fn build(session_date: NaiveDate, regions: &[RegionData], config: &SiteConfig) -> Self {
        let mut builder = TreeBuilder {
            config,
            session_date,
            predicted_date: next_business_day(session_date),
            registry: PathRegistry::default(),
        };

        let home_path = SitePath::root();
        builder.registry.claim(&home_path, "home");

        let region_nodes: Vec<RegionNode> = regions
            .iter()
            .map(|region| builder.region(&home_path, region))
            .collect();

        let home = Page {
            path: home_path,
            title: format!("{} — {}", config.site_title, config.site_tagline),
            description: HOME_DESCRIPTION.to_string(),
            body: PageBody::Home {
                regions: region_nodes.iter().map(|r| link_to(&r.page)).collect(),
            },
        };

        Self {
            session_date,
            predicted_date: builder.predicted_date,
            home,
            regions: region_nodes,
        }
    }

    /// Every page, parents before children
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        std::iter::once(&self.home).chain(self.regions.iter().flat_map(|region| {
            std::iter::once(&region.page).chain(region.countries.iter().flat_map(|country| {
                std::iter::once(&country.page).chain(country.stocks.iter())
            }))
        }))
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            regions: self.regions.len(),
            ..Default::default()
        };
        for country in self.regions.iter().flat_map(|r| &r.countries) {
            stats.countries += 1;
            stats.stock_pages += country.stocks.len();
            if let PageBody::Country { rows, .. } = &country.page.body {
                stats.rows += rows.len();
            }
        }
        stats
    }
}

impl TreeBuilder<'_> {
    fn region(&mut self, parent: &SitePath, region: &RegionData) -> RegionNode {
        let path = parent.child(&slug(&region.name));
        self.registry.claim(&path, &region.name);

        let countries: Vec<CountryNode> = region
            .countries
            .iter()
            .map(|country| self.country(&path, &region.name, country))
            .collect();

        let page = Page {
            title: format!("{} Markets — {}", region.name, self.config.site_title),
            description: format!("Browse stock markets in {}.", region.name),
            body: PageBody::Region {
                name: region.name.clone(),
                countries: countries.iter().map(|c| link_to(&c.page)).collect(),
            },
            path,
        };

        RegionNode { page, countries }
    }

    fn country(
        &mut self,
        parent: &SitePath,
        region_name: &str,
        country: &CountryData,
    ) -> CountryNode {
        let path = parent.child(&slug(&country.name));
        self.registry.claim(&path, &country.name);

        let mut rows = Vec::with_capacity(country.rows.len());
        let mut stocks = Vec::new();

        for row in &country.rows {
            let (table_row, detail) = self.stock(&path, region_name, &country.name, row);
            rows.push(table_row);
            stocks.extend(detail);
        }

        debug!(
            country = %country.name,
            rows = rows.len(),
            stock_pages = stocks.len(),
            "Built country"
        );

        let page = Page {
            title: format!("{} stocks — {}", country.name, self.config.site_title),
            description: format!("Browse stocks listed in {}.", country.name),
            body: PageBody::Country {
                name: country.name.clone(),
                rows,
            },
            path,
        };

        CountryNode { page, stocks }
    }

    fn stock(
        &mut self,
        parent: &SitePath,
        region_name: &str,
        country_name: &str,
        row: &StockRow,
    ) -> (TableRow, Option<Page>) {
        let name = row.display_name().to_string();
        let path = parent.child(&slug(&name));

        let detail = row.ohlc().map(|ohlc| {
            self.registry.claim(&path, &name);
            let classification = ohlc.classify();
            Page {
                path: path.clone(),
                title: format!("{} prediction tomorrow — {}", name, self.config.site_title),
                description: format!(
                    "{} ({}) next-day prediction and OHLC snapshot.",
                    name, row.symbol
                ),
                body: PageBody::Stock(Box::new(StockDetail {
                    name: name.clone(),
                    symbol: row.symbol.clone(),
                    region: region_name.to_string(),
                    country: country_name.to_string(),
                    exchange: row.exchange.clone(),
                    session_date: self.session_date,
                    predicted_date: self.predicted_date,
                    ohlc,
                    classification,
                })),
            }
        });

        if detail.is_none() {
            debug!(symbol = %row.symbol, "Row without complete OHLC, table only");
        }

        let table_row = TableRow {
            symbol: row.symbol.clone(),
            name,
            exchange: row.exchange.clone(),
            sector: row.sector.clone(),
            industry: row.industry.clone(),
            close: row.close,
            signal: detail.as_ref().and_then(|page| match &page.body {
                PageBody::Stock(stock) => Some(stock.classification.signal),
                _ => None,
            }),
            detail: detail.as_ref().map(|_| path),
        };

        (table_row, detail)
    }
}

fn link_to(page: &Page) -> Link {
    let label = match &page.body {
        PageBody::Region { name, .. } | PageBody::Country { name, .. } => name.clone(),
        PageBody::Stock(stock) => stock.name.clone(),
        PageBody::Home { .. } => page.title.clone(),
    };
    Link {
        label,
        path: page.path.clone(),
    }
}
