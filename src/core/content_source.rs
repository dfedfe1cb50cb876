//! The single error-containment boundary between the site and the CMS.
//!
//! Every fetch yields a [`Fetched`] outcome instead of an error. Callers
//! that only care about "CMS value or fallback" use [`Fetched::into_option`].

use crate::adapters::sanity::SanityClient;
use crate::config::toml_config::CmsConfig;
use crate::core::route_table::is_slug_segment;
use crate::domain::cms::{CmsServiceListItem, CmsServicePage, CmsSiteSettings, CmsSlug};
use crate::domain::ports::{CmsTransport, QueryParams};
use crate::utils::error::{Result, SiteError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// The read queries the site issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsQuery {
    SiteSettings,
    AllServices,
    ServiceBySlug,
    ServiceSlugs,
}

impl CmsQuery {
    pub fn name(&self) -> &'static str {
        match self {
            CmsQuery::SiteSettings => "site_settings",
            CmsQuery::AllServices => "all_services",
            CmsQuery::ServiceBySlug => "service_by_slug",
            CmsQuery::ServiceSlugs => "service_slugs",
        }
    }

    pub fn groq(&self) -> &'static str {
        match self {
            CmsQuery::SiteSettings => {
                r#"*[_type == "siteSettings"][0]{
  businessName, phone, email, address, city, state, zip,
  serviceArea, businessHours, socialLinks,
  reviews[]{ reviewerName, reviewText, rating, source, technicianName }
}"#
            }
            CmsQuery::AllServices => {
                r#"*[_type == "servicePage"] | order(orderRank asc){
  serviceName, "slug": slug.current, shortDescription, heroImage, iconName
}"#
            }
            CmsQuery::ServiceBySlug => {
                r#"*[_type == "servicePage" && slug.current == $slug][0]{
  serviceName, "slug": slug.current, metaTitle, metaDescription,
  heroHeadline, heroSubheadline, heroBody, heroImage, heroPrimaryCTA, heroPrimaryCTAUrl,
  serviceDescription,
  serviceDetails[]{ detail, description },
  processSteps[]{ stepTitle, stepDescription },
  faqItems[]{ question, answer },
  primaryKeyword, secondaryKeywords,
  schemaServiceName, schemaServiceDescription, schemaAreaServed
}"#
            }
            CmsQuery::ServiceSlugs => r#"*[_type == "servicePage"]{ "slug": slug.current }"#,
        }
    }
}

/// Outcome of a CMS read.
#[derive(Debug)]
pub enum Fetched<T> {
    Found(T),
    /// No real project id; nothing was sent.
    NotConfigured,
    /// The query ran and returned `null`.
    NotFound,
    /// Transport, status or decoding failure. Already logged.
    Failed(SiteError),
}

impl<T> Fetched<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Fetched::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Fetched::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Found(value) => Fetched::Found(f(value)),
            Fetched::NotConfigured => Fetched::NotConfigured,
            Fetched::NotFound => Fetched::NotFound,
            Fetched::Failed(err) => Fetched::Failed(err),
        }
    }
}

/// CMS access for page resolution. Cheap to clone.
#[derive(Clone)]
pub struct ContentSource {
    transport: Arc<dyn CmsTransport>,
    configured: bool,
}

impl std::fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSource")
            .field("configured", &self.configured)
            .finish_non_exhaustive()
    }
}

impl ContentSource {
    pub fn new(transport: Arc<dyn CmsTransport>, configured: bool) -> Self {
        Self {
            transport,
            configured,
        }
    }

    pub fn from_config(config: &CmsConfig) -> Result<Self> {
        let configured = config.is_configured();
        if configured {
            tracing::info!(
                "CMS configured: project {} dataset {}",
                config.project_id,
                config.dataset
            );
        } else {
            tracing::info!("CMS not configured, serving static content only");
        }
        Ok(Self::new(Arc::new(SanityClient::new(config)?), configured))
    }

    /// A source that never reaches a CMS.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoCms), false)
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub async fn fetch<T: DeserializeOwned>(&self, query: CmsQuery, params: QueryParams) -> Fetched<T> {
        if !self.configured {
            return Fetched::NotConfigured;
        }

        let value = match self.transport.query(query.groq(), &params).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    query = query.name(),
                    "CMS fetch failed, falling back to static content: {}",
                    err
                );
                return Fetched::Failed(err);
            }
        };

        if value.is_null() {
            tracing::debug!(query = query.name(), "CMS returned no document");
            return Fetched::NotFound;
        }

        match serde_json::from_value::<T>(value) {
            Ok(decoded) => Fetched::Found(decoded),
            Err(err) => {
                tracing::warn!(
                    query = query.name(),
                    "CMS response did not decode, falling back to static content: {}",
                    err
                );
                Fetched::Failed(SiteError::SerializationError(err))
            }
        }
    }

    pub async fn site_settings(&self) -> Fetched<CmsSiteSettings> {
        self.fetch(CmsQuery::SiteSettings, QueryParams::new()).await
    }

    pub async fn all_services(&self) -> Fetched<Vec<CmsServiceListItem>> {
        self.fetch(CmsQuery::AllServices, QueryParams::new()).await
    }

    pub async fn service_by_slug(&self, slug: &str) -> Fetched<CmsServicePage> {
        let mut params = QueryParams::new();
        params.insert("slug".to_string(), Value::String(slug.to_string()));
        self.fetch(CmsQuery::ServiceBySlug, params).await
    }

    pub async fn service_slugs(&self) -> Fetched<Vec<String>> {
        self.fetch::<Vec<CmsSlug>>(CmsQuery::ServiceSlugs, QueryParams::new())
            .await
            .map(|slugs| {
                slugs
                    .into_iter()
                    .filter_map(|s| s.slug)
                    .filter(|s| !s.trim().is_empty())
                    .filter(|s| {
                        let ok = is_slug_segment(s);
                        if !ok {
                            tracing::warn!("Ignoring CMS service slug {:?}: not a single path segment", s);
                        }
                        ok
                    })
                    .collect()
            })
    }
}

struct NoCms;

#[async_trait::async_trait]
impl CmsTransport for NoCms {
    async fn query(&self, _groq: &str, _params: &QueryParams) -> Result<Value> {
        Err(SiteError::ConfigError {
            message: "no CMS transport".to_string(),
        })
    }
}
