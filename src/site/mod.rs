//! Page tree, rendering and output for the generated site.

pub mod page;
pub mod render;
pub mod sitemap;
pub mod slug;
pub mod tree;
pub mod writer;

pub use page::{Link, Page, PageBody, SitePath, StockDetail, TableRow, INDEX_FILE};
pub use render::{escape_html, HtmlRenderer, PageRenderer};
pub use slug::slug;
pub use tree::{CountryNode, RegionNode, SiteTree, TreeStats};
pub use writer::OutputWriter;
