//! Request paths and the set of pages generated ahead of time.

use crate::content::StaticCatalog;
use crate::core::content_source::{ContentSource, Fetched};
use std::fmt;

/// True when `slug` stands as a single path segment: ASCII letters, digits,
/// `-` and `_` only.
pub fn is_slug_segment(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Contact,
    Services,
    Service(String),
    Pricing,
    Locations,
    Location(String),
}

impl Route {
    /// Parses a request path. A trailing slash is tolerated; anything
    /// outside the site map (including `/studio`) yields `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["about"] => Some(Route::About),
            ["contact"] => Some(Route::Contact),
            ["services"] => Some(Route::Services),
            ["services", slug] => Some(Route::Service(slug.to_string())),
            ["services-pricing"] => Some(Route::Pricing),
            ["locations"] => Some(Route::Locations),
            ["locations", slug] => Some(Route::Location(slug.to_string())),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Services => "/services".to_string(),
            Route::Service(slug) => format!("/services/{}", slug),
            Route::Pricing => "/services-pricing".to_string(),
            Route::Locations => "/locations".to_string(),
            Route::Location(slug) => format!("/locations/{}", slug),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a set of slugs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOrigin {
    Cms,
    Static,
}

impl fmt::Display for RouteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteOrigin::Cms => f.write_str("cms"),
            RouteOrigin::Static => f.write_str("static"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub services: Vec<String>,
    pub service_origin: RouteOrigin,
    pub locations: Vec<String>,
}

const FIXED_ROUTES: [Route; 6] = [
    Route::Home,
    Route::About,
    Route::Services,
    Route::Pricing,
    Route::Locations,
    Route::Contact,
];

impl RouteTable {
    /// Service slugs from the CMS when it lists any, else the static catalog.
    /// Location slugs always come from the static city list.
    pub async fn build(source: &ContentSource, catalog: &StaticCatalog) -> Self {
        let (services, service_origin) = match source.service_slugs().await {
            Fetched::Found(slugs) if !slugs.is_empty() => (slugs, RouteOrigin::Cms),
            _ => (catalog.service_slugs(), RouteOrigin::Static),
        };

        tracing::debug!(
            "Route table: {} services ({}), {} locations",
            services.len(),
            service_origin,
            catalog.locations.len()
        );

        Self {
            services,
            service_origin,
            locations: catalog.location_slugs(),
        }
    }

    pub fn routes(&self) -> Vec<Route> {
        FIXED_ROUTES
            .iter()
            .cloned()
            .chain(self.services.iter().cloned().map(Route::Service))
            .chain(self.locations.iter().cloned().map(Route::Location))
            .collect()
    }

    /// Every path generated ahead of time.
    pub fn paths(&self) -> Vec<String> {
        self.routes().iter().map(Route::path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CmsTransport, QueryParams};
    use crate::utils::error::Result;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct FixedTransport(Value);

    #[async_trait::async_trait]
    impl CmsTransport for FixedTransport {
        async fn query(&self, _groq: &str, _params: &QueryParams) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/about/"), Some(Route::About));
        assert_eq!(
            Route::parse("/services/hardscaping"),
            Some(Route::Service("hardscaping".to_string()))
        );
        assert_eq!(
            Route::parse("/locations/westlake-hills/?ref=nav"),
            Some(Route::Location("westlake-hills".to_string()))
        );
        assert_eq!(Route::parse("/studio"), None);
        assert_eq!(Route::parse("/studio/desk"), None);
        assert_eq!(Route::parse("/services/a/b"), None);
    }

    #[test]
    fn test_slug_segments() {
        assert!(is_slug_segment("landscape-design"));
        assert!(is_slug_segment("pool_builds2"));
        assert!(!is_slug_segment(""));
        assert!(!is_slug_segment("a/b"));
        assert!(!is_slug_segment(".."));
        assert!(!is_slug_segment("deck repair"));
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in [Route::Pricing, Route::Service("x".to_string())] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[tokio::test]
    async fn test_unconfigured_cms_uses_static_slugs() {
        let catalog = StaticCatalog::load().unwrap();
        let table = RouteTable::build(&ContentSource::disabled(), &catalog).await;

        assert_eq!(table.service_origin, RouteOrigin::Static);
        assert_eq!(table.services, catalog.service_slugs());
        assert_eq!(table.locations.len(), 10);

        let paths = table.paths();
        assert_eq!(paths.len(), 6 + 8 + 10);
        assert!(paths.contains(&"/services/landscape-design".to_string()));
        assert!(paths.contains(&"/locations/circle-c-ranch".to_string()));
    }

    #[tokio::test]
    async fn test_cms_slugs_replace_static_list() {
        let catalog = StaticCatalog::load().unwrap();
        let source = ContentSource::new(
            Arc::new(FixedTransport(json!([{"slug": "hardscaping"}, {"slug": "pool-builds"}]))),
            true,
        );

        let table = RouteTable::build(&source, &catalog).await;
        assert_eq!(table.service_origin, RouteOrigin::Cms);
        assert_eq!(table.services, vec!["hardscaping", "pool-builds"]);
    }

    #[test]
    fn test_empty_cms_list_falls_back() {
        let catalog = StaticCatalog::load().unwrap();
        let source = ContentSource::new(Arc::new(FixedTransport(json!([]))), true);

        let table = tokio_test::block_on(RouteTable::build(&source, &catalog));
        assert_eq!(table.service_origin, RouteOrigin::Static);
        assert_eq!(table.services.len(), 8);
    }
}
