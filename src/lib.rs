pub mod builder;
pub mod data;
pub mod dataset;
pub mod error;
pub mod signals;
pub mod site;
pub mod utils;

// Re-export commonly used types
pub use builder::{build, build_with_renderer, BuildOptions, BuildReport};
pub use data::{CountryData, Ohlc, RegionData, StockRow};
pub use dataset::{find_latest_snapshot, load_regions, Snapshot};
pub use error::{Result, SiteError};
pub use signals::{classify, next_business_day, Classification, Signal};
pub use site::{slug, HtmlRenderer, OutputWriter, Page, PageRenderer, SiteTree};
pub use utils::SiteConfig;
