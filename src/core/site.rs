//! Page resolution: one request in, one fully resolved [`Page`] out.
//!
//! Each page issues at most two independent CMS reads (site settings plus
//! the page's own record) and runs them concurrently.

use crate::content::{locations::city_slug, StaticCatalog};
use crate::core::content_source::ContentSource;
use crate::core::resolver;
use crate::core::route_table::{Route, RouteTable};
use crate::core::structured_data as schema;
use crate::domain::model::{
    Business, Crumb, Faq, Location, PricingCategory, Region, Review, ServicePage, ServiceSummary,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// A city on the locations index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityLink {
    pub city: String,
    pub county: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBody {
    Home {
        services: Vec<ServiceSummary>,
        faqs: Vec<Faq>,
    },
    About {
        faqs: Vec<Faq>,
    },
    Contact {
        services: Vec<ServiceSummary>,
    },
    Services {
        services: Vec<ServiceSummary>,
    },
    Service(Box<ServicePage>),
    Pricing {
        pricing: Vec<PricingCategory>,
        faqs: Vec<Faq>,
    },
    Locations {
        regions: Vec<Region>,
        cities: Vec<CityLink>,
    },
    Location(Box<Location>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub route: String,
    pub meta: PageMeta,
    pub business: Business,
    pub reviews: Vec<Review>,
    pub structured_data: Vec<Value>,
    pub body: PageBody,
}

/// Everything a page needs, injected once at startup.
#[derive(Debug, Clone)]
pub struct Site {
    source: ContentSource,
    catalog: Arc<StaticCatalog>,
    site_url: String,
}

impl Site {
    pub fn new(source: ContentSource, catalog: Arc<StaticCatalog>, site_url: Option<&str>) -> Self {
        let site_url = site_url
            .unwrap_or(&catalog.business.site_url)
            .trim_end_matches('/')
            .to_string();
        Self {
            source,
            catalog,
            site_url,
        }
    }

    /// Loads the static catalog and connects the CMS. Fails only on broken
    /// static content; CMS trouble is never fatal.
    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        let catalog = Arc::new(StaticCatalog::load()?);
        let source = ContentSource::from_config(config.cms())?;
        Ok(Self::new(source, catalog, config.site_url_override()))
    }

    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub async fn route_table(&self) -> RouteTable {
        RouteTable::build(&self.source, &self.catalog).await
    }

    pub async fn resolve_path(&self, path: &str) -> Result<Page> {
        let route = Route::parse(path).ok_or_else(|| SiteError::NotFound {
            path: path.to_string(),
        })?;
        self.resolve(&route).await
    }

    pub async fn resolve(&self, route: &Route) -> Result<Page> {
        tracing::debug!("Resolving {}", route);
        let catalog = &*self.catalog;

        match route {
            Route::Home => {
                let (settings, services) =
                    tokio::join!(self.source.site_settings(), self.source.all_services());
                let settings = settings.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                let services = resolver::resolve_services(services.into_option(), catalog);
                let structured_data = vec![
                    self.local_business(&business),
                    schema::faq_page(&catalog.home_faqs),
                ];
                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: format!(
                            "{} | Premium Landscape Design & Build — Austin, TX",
                            business.business_name
                        ),
                        description: format!(
                            "{} transforms residential and commercial properties across the Austin metro with expert landscape design, hardscaping, custom carpentry, and white-glove property management. {} years of experience. Licensed, bonded, and insured.",
                            business.business_name, business.years_experience
                        ),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    business,
                    structured_data,
                    body: PageBody::Home {
                        services,
                        faqs: catalog.home_faqs.clone(),
                    },
                })
            }
            Route::About => {
                let settings = self.source.site_settings().await.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                let structured_data = vec![
                    self.local_business(&business),
                    schema::faq_page(&catalog.about_faqs),
                ];
                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: titled("About Us | Licensed Landscape Contractor — Austin, TX", &business),
                        description: format!(
                            "Learn about {} — {} years of landscape design and build experience serving Austin's premier communities. Licensed General Contractor of Landscape, fully bonded and insured.",
                            business.business_name, business.years_experience
                        ),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    business,
                    structured_data,
                    body: PageBody::About {
                        faqs: catalog.about_faqs.clone(),
                    },
                })
            }
            Route::Contact => {
                let settings = self.source.site_settings().await.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: titled("Contact Us | Get a Consultation", &business),
                        description: format!(
                            "Contact {} for landscape design, outdoor construction, or property management. Request a consultation or call {}. Serving the Austin metro area.",
                            business.business_name, business.phone
                        ),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    business,
                    structured_data: Vec::new(),
                    body: PageBody::Contact {
                        services: catalog.services.clone(),
                    },
                })
            }
            Route::Services => {
                let (settings, services) =
                    tokio::join!(self.source.site_settings(), self.source.all_services());
                let settings = settings.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                let services = resolver::resolve_services(services.into_option(), catalog);
                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: titled("Our Services | Landscape Design, Build & Maintain", &business),
                        description: format!(
                            "{} offers full-service landscape capabilities including design, hardscaping, custom carpentry, softscaping, irrigation, lighting, metal fabrication, and property management across the Austin metro.",
                            business.business_name
                        ),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    structured_data: vec![self.local_business(&business)],
                    business,
                    body: PageBody::Services { services },
                })
            }
            Route::Service(slug) => {
                let (settings, cms_page) =
                    tokio::join!(self.source.site_settings(), self.source.service_by_slug(slug));
                let settings = settings.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                let page = resolver::resolve_service_page(slug, cms_page.into_option(), catalog, &business)
                    .ok_or_else(|| SiteError::NotFound { path: route.path() })?;

                let mut structured_data = vec![
                    schema::service(
                        &page.schema_name,
                        &page.schema_description,
                        &page.schema_area_served,
                        &business,
                        &self.site_url,
                    ),
                    schema::breadcrumbs(
                        &[
                            Crumb::new("Home", "/"),
                            Crumb::new("Services", "/services"),
                            Crumb::new(page.name.clone(), format!("/services/{}", page.slug)),
                        ],
                        &self.site_url,
                    ),
                ];
                if !page.faqs.is_empty() {
                    structured_data.push(schema::faq_page(&page.faqs));
                }

                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: titled(&page.meta_title, &business),
                        description: page.meta_description.clone(),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    business,
                    structured_data,
                    body: PageBody::Service(Box::new(page)),
                })
            }
            Route::Pricing => {
                let settings = self.source.site_settings().await.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                let structured_data = vec![
                    self.local_business(&business),
                    schema::faq_page(&catalog.pricing_faqs),
                ];
                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: titled("Landscape Services & Pricing | Transparent Project Costs", &business),
                        description: format!(
                            "Transparent landscape service pricing from {}. View typical costs for landscape design, hardscaping, carpentry, planting, irrigation, lighting, and property management across the Austin metro.",
                            business.business_name
                        ),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    business,
                    structured_data,
                    body: PageBody::Pricing {
                        pricing: catalog.pricing.clone(),
                        faqs: catalog.pricing_faqs.clone(),
                    },
                })
            }
            Route::Locations => {
                let settings = self.source.site_settings().await.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                let cities = catalog
                    .service_area
                    .iter()
                    .map(|area| CityLink {
                        city: area.city.clone(),
                        county: area.county.clone(),
                        slug: city_slug(&area.city),
                    })
                    .collect();
                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: titled("Service Areas | Landscape Services Across the Austin Metro", &business),
                        description: format!(
                            "{} provides expert landscape design, build, and maintenance services across the Austin metro area. Find outdoor renovation services in your community. Call {}.",
                            business.business_name, business.phone
                        ),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    business,
                    structured_data: Vec::new(),
                    body: PageBody::Locations {
                        regions: catalog.regions.clone(),
                        cities,
                    },
                })
            }
            Route::Location(slug) => {
                let location = catalog
                    .location(slug)
                    .cloned()
                    .ok_or_else(|| SiteError::NotFound { path: route.path() })?;
                let settings = self.source.site_settings().await.into_option();
                let business = resolver::resolve_business(settings.as_ref(), catalog);
                let structured_data = vec![
                    self.local_business(&business),
                    schema::faq_page(&location.faqs),
                    schema::breadcrumbs(
                        &[
                            Crumb::new("Home", "/"),
                            Crumb::new("Service Areas", "/locations"),
                            Crumb::new(location.city.clone(), format!("/locations/{}", location.slug)),
                        ],
                        &self.site_url,
                    ),
                ];
                Ok(Page {
                    route: route.path(),
                    meta: PageMeta {
                        title: format!(
                            "Landscape Services in {}, {} | {}",
                            location.city, location.state, business.business_name
                        ),
                        description: format!(
                            "Expert landscape design, build, and maintenance services in {}, {}. {} is a Licensed General Contractor of Landscape with {} years serving {} County. Call {}.",
                            location.city,
                            location.state,
                            business.business_name,
                            business.years_experience,
                            location.county,
                            business.phone
                        ),
                    },
                    reviews: resolver::resolve_reviews(settings.as_ref(), catalog),
                    business,
                    structured_data,
                    body: PageBody::Location(Box::new(location)),
                })
            }
        }
    }

    fn local_business(&self, business: &Business) -> Value {
        let cities: Vec<String> = self
            .catalog
            .service_area
            .iter()
            .map(|area| area.city.clone())
            .collect();
        schema::local_business(business, &self.site_url, &cities, &self.catalog.services)
    }
}

/// Appends the business name unless the title already carries it.
fn titled(title: &str, business: &Business) -> String {
    if title.ends_with(&business.business_name) {
        title.to_string()
    } else {
        format!("{} | {}", title, business.business_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        let catalog = Arc::new(StaticCatalog::load().unwrap());
        Site::new(ContentSource::disabled(), catalog, Some("https://example.com/"))
    }

    #[tokio::test]
    async fn test_every_static_route_resolves() {
        let site = site();
        let table = site.route_table().await;
        for route in table.routes() {
            let page = site.resolve(&route).await.unwrap();
            assert_eq!(page.route, route.path());
            assert!(!page.meta.title.is_empty());
            assert_eq!(page.reviews.len(), 12);
        }
    }

    #[tokio::test]
    async fn test_unknown_paths_are_not_found() {
        let site = site();
        for path in ["/services/pool-cleaning", "/locations/houston", "/studio", "/nope"] {
            let err = site.resolve_path(path).await.unwrap_err();
            assert!(matches!(err, SiteError::NotFound { .. }), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_service_page_schemas() {
        let site = site();
        let page = site.resolve_path("/services/hardscaping/").await.unwrap();

        assert_eq!(page.structured_data.len(), 3);
        assert_eq!(page.structured_data[0]["@type"], "Service");
        assert_eq!(
            page.structured_data[1]["itemListElement"][2]["item"],
            "https://example.com/services/hardscaping"
        );
        assert_eq!(page.structured_data[2]["@type"], "FAQPage");
        assert_eq!(
            page.meta.title,
            "Hardscaping | Austin Landscape Services | Outdoor Renovations"
        );
    }

    #[tokio::test]
    async fn test_location_title_is_not_doubled() {
        let site = site();
        let page = site.resolve_path("/locations/bee-cave").await.unwrap();
        assert_eq!(
            page.meta.title,
            "Landscape Services in Bee Cave, TX | Outdoor Renovations"
        );
        assert_eq!(page.structured_data.len(), 3);
    }

    #[test]
    fn test_site_url_defaults_to_business() {
        let catalog = Arc::new(StaticCatalog::load().unwrap());
        let site = Site::new(ContentSource::disabled(), catalog, None);
        assert_eq!(site.site_url(), "https://outdoor-renovations.vercel.app");
    }
}
