//! Static fallback content shipped with the binary.

pub mod locations;

use crate::domain::model::{
    Business, Faq, Location, PricingCategory, Region, Review, ServiceArea, ServicePageFallback,
    ServiceSummary,
};
use crate::utils::error::{Result, SiteError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

pub const SITE_TOML: &str = include_str!("../../content/site.toml");
pub const SERVICE_PAGES_TOML: &str = include_str!("../../content/service_pages.toml");
pub const LOCATIONS_TOML: &str = include_str!("../../content/locations.toml");
pub const REVIEWS_TOML: &str = include_str!("../../content/reviews.toml");

pub const DEFAULT_SERVICE_IMAGE: &str = "/images/project-landscape.jpg";
pub const DEFAULT_HERO_IMAGE: &str = "/images/hero-drone-estate.jpg";

#[derive(Debug, Deserialize)]
struct SiteFile {
    business: Business,
    service_area: Vec<ServiceArea>,
    #[serde(default)]
    regions: Vec<Region>,
    services: Vec<ServiceSummary>,
    #[serde(default)]
    home_faqs: Vec<Faq>,
    #[serde(default)]
    about_faqs: Vec<Faq>,
    #[serde(default)]
    pricing: Vec<PricingCategory>,
    #[serde(default)]
    pricing_faqs: Vec<Faq>,
}

#[derive(Debug, Deserialize)]
struct ReviewsFile {
    reviews: Vec<Review>,
}

/// The source texts a catalog is built from.
#[derive(Debug, Clone, Copy)]
pub struct ContentSources<'a> {
    pub site: &'a str,
    pub service_pages: &'a str,
    pub locations: &'a str,
    pub reviews: &'a str,
}

impl Default for ContentSources<'static> {
    fn default() -> Self {
        Self {
            site: SITE_TOML,
            service_pages: SERVICE_PAGES_TOML,
            locations: LOCATIONS_TOML,
            reviews: REVIEWS_TOML,
        }
    }
}

/// Every fallback record, parsed and validated once at startup.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    pub business: Business,
    pub service_area: Vec<ServiceArea>,
    pub regions: Vec<Region>,
    pub services: Vec<ServiceSummary>,
    pub service_pages: HashMap<String, ServicePageFallback>,
    pub home_faqs: Vec<Faq>,
    pub about_faqs: Vec<Faq>,
    pub pricing: Vec<PricingCategory>,
    pub pricing_faqs: Vec<Faq>,
    pub reviews: Vec<Review>,
    pub locations: Vec<Location>,
}

fn parse<T: DeserializeOwned>(source_name: &str, text: &str) -> Result<T> {
    toml::from_str(text).map_err(|e| SiteError::ContentError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

impl StaticCatalog {
    /// The catalog compiled into the binary.
    pub fn load() -> Result<Self> {
        Self::from_sources(ContentSources::default())
    }

    pub fn from_sources(sources: ContentSources<'_>) -> Result<Self> {
        let site: SiteFile = parse("site.toml", sources.site)?;
        let service_pages: HashMap<String, ServicePageFallback> =
            parse("service_pages.toml", sources.service_pages)?;
        let city_meta = locations::parse_city_meta(sources.locations)?;
        let reviews: ReviewsFile = parse("reviews.toml", sources.reviews)?;

        let generated =
            locations::generate_locations(&site.service_area, &city_meta, &site.business)?;

        for service in &site.services {
            if !service_pages.contains_key(&service.slug) {
                tracing::warn!("No fallback page copy for service '{}'", service.slug);
            }
        }

        tracing::debug!(
            "Loaded static catalog: {} services, {} locations, {} reviews",
            site.services.len(),
            generated.len(),
            reviews.reviews.len()
        );

        Ok(Self {
            business: site.business,
            service_area: site.service_area,
            regions: site.regions,
            services: site.services,
            service_pages,
            home_faqs: site.home_faqs,
            about_faqs: site.about_faqs,
            pricing: site.pricing,
            pricing_faqs: site.pricing_faqs,
            reviews: reviews.reviews,
            locations: generated,
        })
    }

    pub fn service(&self, slug: &str) -> Option<&ServiceSummary> {
        self.services.iter().find(|s| s.slug == slug)
    }

    pub fn service_page(&self, slug: &str) -> Option<&ServicePageFallback> {
        self.service_pages.get(slug)
    }

    pub fn service_image(&self, slug: &str) -> &str {
        self.service(slug)
            .and_then(|s| s.image.as_deref())
            .unwrap_or(DEFAULT_SERVICE_IMAGE)
    }

    pub fn location(&self, slug: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.slug == slug)
    }

    pub fn service_slugs(&self) -> Vec<String> {
        self.services.iter().map(|s| s.slug.clone()).collect()
    }

    pub fn location_slugs(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.slug.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = StaticCatalog::load().unwrap();

        assert_eq!(catalog.business.business_name, "Outdoor Renovations");
        assert_eq!(catalog.services.len(), 8);
        assert_eq!(catalog.service_pages.len(), 8);
        assert_eq!(catalog.service_area.len(), 10);
        assert_eq!(catalog.locations.len(), 10);
        assert_eq!(catalog.reviews.len(), 12);
        assert!(!catalog.pricing.is_empty());
    }

    #[test]
    fn test_every_city_generates() {
        let catalog = StaticCatalog::load().unwrap();
        for area in &catalog.service_area {
            let slug = locations::city_slug(&area.city);
            let location = catalog.location(&slug).unwrap();
            assert_eq!(location.city, area.city);
            assert_eq!(location.county, area.county);
            assert_eq!(location.nearby_cities.len(), 9);
            assert!(!location.nearby_cities.contains(&area.city));
            assert!(!location.faqs.is_empty());
        }
    }

    #[test]
    fn test_missing_city_meta_fails_load() {
        // Drop the Lakeway table while leaving Lakeway in the city list.
        let trimmed: String = {
            let start = LOCATIONS_TOML.find("[Lakeway]").unwrap();
            let end = LOCATIONS_TOML[start..].find("\n[\"Bee Cave\"]").unwrap() + start;
            let mut text = LOCATIONS_TOML[..start].to_string();
            text.push_str(&LOCATIONS_TOML[end..]);
            text
        };
        assert!(!trimmed.contains("[Lakeway]"));

        let err = StaticCatalog::from_sources(ContentSources {
            locations: &trimmed,
            ..ContentSources::default()
        })
        .unwrap_err();

        assert!(matches!(err, SiteError::MissingCityMeta { ref city } if city == "Lakeway"));
    }

    #[test]
    fn test_service_image_defaults() {
        let catalog = StaticCatalog::load().unwrap();
        assert_eq!(catalog.service_image("hardscaping"), "/images/project-hardscape.jpg");
        assert_eq!(catalog.service_image("unknown"), DEFAULT_SERVICE_IMAGE);
    }
}
