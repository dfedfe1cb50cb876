pub mod contact;
pub mod export;
pub mod server;
pub mod views;

pub use export::{ExportReport, SiteExporter};
pub use server::AppState;
