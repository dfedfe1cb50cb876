pub mod adapters;
pub mod app;
pub mod config;
pub mod content;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, SiteConfig};

pub use app::{AppState, SiteExporter};
pub use content::StaticCatalog;
pub use core::{ContentSource, Fetched, Route, RouteTable, Site};
pub use utils::error::{Result, SiteError};
