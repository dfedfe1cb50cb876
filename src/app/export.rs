//! Build-time generation: every route in the table rendered to storage.

use crate::app::views;
use crate::core::{Route, RouteOrigin, Site};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SiteError};
use chrono::{NaiveDate, Utc};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const NOT_FOUND_FILE: &str = "404.html";
pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const ARCHIVE_FILE: &str = "site.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub pages: Vec<String>,
    pub skipped: Vec<String>,
    pub files: Vec<String>,
    pub archive: Option<String>,
    pub service_origin: RouteOrigin,
}

pub struct SiteExporter<S: Storage> {
    site: Site,
    storage: S,
    archive: bool,
    lastmod: NaiveDate,
}

/// `/` → `index.html`, `/about` → `about/index.html`.
pub fn page_file(route: &Route) -> String {
    let path = route.path();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else {
        format!("{}/index.html", trimmed)
    }
}

/// XML text escaping. Unlike HTML escaping it leaves `/` intact, so `<loc>`
/// values stay literal URLs.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn sitemap(site_url: &str, paths: &[String], lastmod: NaiveDate) -> String {
    let base = site_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for path in paths {
        let loc = if path == "/" {
            format!("{}/", base)
        } else {
            format!("{}{}", base, path)
        };
        xml.push_str(&format!(
            "  <url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
            xml_escape(&loc),
            lastmod.format("%Y-%m-%d")
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

impl<S: Storage> SiteExporter<S> {
    pub fn new(site: Site, storage: S, archive: bool) -> Self {
        Self {
            site,
            storage,
            archive,
            lastmod: Utc::now().date_naive(),
        }
    }

    pub fn with_lastmod(mut self, lastmod: NaiveDate) -> Self {
        self.lastmod = lastmod;
        self
    }

    pub async fn export(&self) -> Result<ExportReport> {
        let table = self.site.route_table().await;
        tracing::info!(
            "Exporting {} routes ({} service slugs from {})",
            table.routes().len(),
            table.services.len(),
            table.service_origin
        );

        let mut pages = Vec::new();
        let mut skipped = Vec::new();
        let mut files = Vec::new();

        for route in table.routes() {
            let page = match self.site.resolve(&route).await {
                Ok(page) => page,
                Err(SiteError::NotFound { path }) => {
                    tracing::warn!("Skipping {}: no CMS or static record", path);
                    skipped.push(path);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let file = page_file(&route);
            let html = views::render_page(&page);
            tracing::debug!("Writing {} ({} bytes)", file, html.len());
            self.storage.write_file(&file, html.as_bytes()).await?;
            pages.push(route.path());
            files.push(file);
        }

        let not_found = views::render_not_found(&self.site.catalog().business);
        self.storage
            .write_file(NOT_FOUND_FILE, not_found.as_bytes())
            .await?;
        files.push(NOT_FOUND_FILE.to_string());

        let sitemap = sitemap(self.site.site_url(), &pages, self.lastmod);
        self.storage.write_file(SITEMAP_FILE, sitemap.as_bytes()).await?;
        files.push(SITEMAP_FILE.to_string());

        let archive = if self.archive {
            self.write_archive(&files).await?;
            Some(ARCHIVE_FILE.to_string())
        } else {
            None
        };

        tracing::info!("Exported {} pages, {} files", pages.len(), files.len());
        Ok(ExportReport {
            pages,
            skipped,
            files,
            archive,
            service_origin: table.service_origin,
        })
    }

    /// Zips the files as they were written, read back from storage.
    async fn write_archive(&self, files: &[String]) -> Result<()> {
        let mut contents = Vec::with_capacity(files.len());
        for file in files {
            contents.push((file.as_str(), self.storage.read_file(file).await?));
        }

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, data) in &contents {
                zip.start_file::<_, ()>(*name, FileOptions::default())?;
                zip.write_all(data)?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing {} ({} bytes)", ARCHIVE_FILE, zip_data.len());
        self.storage.write_file(ARCHIVE_FILE, &zip_data).await
    }
}
