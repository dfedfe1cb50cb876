pub mod content_source;
pub mod fallback;
pub mod resolver;
pub mod route_table;
pub mod site;
pub mod structured_data;

pub use content_source::{ContentSource, Fetched};
pub use route_table::{Route, RouteOrigin, RouteTable};
pub use site::{Page, PageBody, Site};
