//! City landing pages, generated from per-city metadata.
//!
//! The city list lives in `site.toml`; the metadata table in
//! `locations.toml`. A city without metadata is a content bug and fails the
//! whole catalog load.

use crate::domain::model::{
    Business, Faq, Location, ProseSection, ResidentialSection, ResidentialService, ServiceArea,
};
use crate::utils::error::{Result, SiteError};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct CityMeta {
    pub county: String,
    pub local_flavor: String,
    pub trust_detail: String,
    pub expertise_detail: String,
    pub soil_note: String,
    pub landmarks: String,
    pub residential_services: Vec<ResidentialService>,
    pub faqs: Vec<Faq>,
}

pub type CityMetaTable = HashMap<String, CityMeta>;

const EQUIPMENT_BULLETS: [&str; 5] = [
    "Natural Stone & Flagstone — locally sourced Texas limestone, travertine, and sandstone for patios, walkways, and walls",
    "Premium Pavers — interlocking concrete pavers, porcelain pavers, and permeable paver systems from Belgard, Tremron, and Pavestone",
    "Native & Adapted Plants — drought-tolerant Texas natives, ornamental grasses, and regionally adapted species selected for year-round performance",
    "Smart Irrigation — WiFi-enabled controllers, drip systems, and high-efficiency rotary nozzles from Hunter, Rain Bird, and Rachio",
    "LED Landscape Lighting — low-voltage brass and copper fixtures from FX Luminaire, Kichler, and WAC Lighting for lasting curb appeal and safety",
];

const COMMERCIAL_SERVICES: [&str; 8] = [
    "Commercial Landscape Design & Installation",
    "HOA & Community Common Area Landscaping",
    "Retail & Restaurant Patio Construction",
    "Office Park & Corporate Campus Grounds",
    "Multi-Family & Apartment Complex Landscaping",
    "Commercial Irrigation System Design & Installation",
    "Commercial Property Maintenance Contracts",
    "Erosion Control & Stormwater Management",
];

/// `"Circle C Ranch"` → `"circle-c-ranch"`.
pub fn city_slug(city: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
    re.replace_all(&city.trim().to_lowercase(), "-").into_owned()
}

pub fn parse_city_meta(source: &str) -> Result<CityMetaTable> {
    toml::from_str(source).map_err(|e| SiteError::ContentError {
        source_name: "locations.toml".to_string(),
        message: e.to_string(),
    })
}

/// One location page per service-area city, in list order.
pub fn generate_locations(
    service_area: &[ServiceArea],
    metas: &CityMetaTable,
    business: &Business,
) -> Result<Vec<Location>> {
    service_area
        .iter()
        .map(|area| generate_location(area, service_area, metas, business))
        .collect()
}

pub fn generate_location(
    area: &ServiceArea,
    service_area: &[ServiceArea],
    metas: &CityMetaTable,
    business: &Business,
) -> Result<Location> {
    let city = area.city.as_str();
    let county = area.county.as_str();
    let meta = metas.get(city).ok_or_else(|| SiteError::MissingCityMeta {
        city: city.to_string(),
    })?;

    let name = &business.business_name;
    let years = &business.years_experience;
    let projects = &business.review_count;

    Ok(Location {
        city: city.to_string(),
        slug: city_slug(city),
        county: county.to_string(),
        state: "TX".to_string(),
        hero_headline: format!("Premium Landscape Design & Build in {}, Texas", city),
        hero_description: format!(
            "{} When you need expert landscape design, hardscaping, and outdoor living solutions in {}, trust {}. With {} years of experience and {} completed projects, we deliver craftsmanship that transforms properties across {} County.",
            meta.local_flavor, city, name, years, projects, county
        ),
        why_trust: ProseSection {
            heading: format!("Why {} Homeowners Trust {}", city, name),
            subheading: Some("Local Expertise. Proven Craftsmanship.".to_string()),
            body: vec![
                format!(
                    "{} has provided premium landscape design, construction, and maintenance services to {} homeowners for over a decade. We understand the unique demands of Central Texas outdoor living — from extreme summer heat and extended droughts to the rocky Hill Country terrain that challenges every aspect of landscape construction.",
                    name, city
                ),
                meta.trust_detail.clone(),
                format!(
                    "Every project starts with a thorough on-site consultation and an honest assessment of your property's conditions and potential. We do not upsell. We do not cut corners. We deliver thoughtful, well-built outdoor spaces that {} families enjoy for years to come.",
                    city
                ),
            ],
            bullets: vec![
                "Licensed General Contractor of Landscape in the State of Texas".to_string(),
                "Fully Bonded & Insured — complete liability and worker's comp coverage".to_string(),
                "1-Year Service Guarantee on all completed work".to_string(),
                "Transparent, itemized proposals with no hidden fees".to_string(),
                format!("{} years and {} completed projects in the Austin metro", years, projects),
                format!("Deep knowledge of {}'s terrain, soil conditions, and local regulations", city),
            ],
        },
        residential: ResidentialSection {
            heading: format!("Complete Residential Landscape Services for {} Properties", city),
            body: format!(
                "Whether your {} property needs a full landscape renovation, a custom outdoor living space, or targeted improvements like irrigation and drainage, {} has the design expertise and construction capability to deliver. We tailor every project to Central Texas conditions and your property's unique characteristics.",
                city, name
            ),
            services: meta.residential_services.clone(),
        },
        expertise: ProseSection {
            heading: format!("{} Landscape Experts Who Know Your Property", city),
            subheading: Some("Local Knowledge Makes the Difference".to_string()),
            body: vec![
                meta.expertise_detail.clone(),
                format!(
                    "{} We are familiar with {} County building codes, permit requirements, and inspection processes. Our team has worked in {} neighborhoods for years and understands what designs, materials, and plant species perform best in this specific area.",
                    meta.soil_note, county, city
                ),
            ],
            bullets: vec![
                format!("Familiar with {} building codes, HOA guidelines, and permit requirements", city),
                format!("Extensive experience with {}'s terrain, soil conditions, and microclimates", city),
                format!("Understanding of {} County inspection and approval processes", county),
                "Knowledge of Central Texas native plants, water-wise design, and drought management".to_string(),
                "Established relationships with local nurseries, quarries, and material suppliers".to_string(),
            ],
        },
        equipment: ProseSection {
            heading: "Premium Materials Built for Central Texas".to_string(),
            subheading: None,
            body: vec![format!(
                "{} sources materials from trusted suppliers with proven performance in Central Texas conditions. We specify products that withstand extreme heat, UV exposure, freeze-thaw cycles, and the unique soil chemistry of the Hill Country.",
                name
            )],
            bullets: EQUIPMENT_BULLETS.iter().map(|b| b.to_string()).collect(),
        },
        protection: ProseSection {
            heading: "Comprehensive Protection for Your Landscape Investment".to_string(),
            subheading: Some("Quality You Can Count On".to_string()),
            body: vec![format!(
                "Your outdoor living space is one of the most valuable investments in your {} home. {} ensures every project is protected with material warranties, our own workmanship guarantee, and ongoing support.",
                city, name
            )],
            bullets: vec![
                "1-Year Service Guarantee on every project — workmanship and materials".to_string(),
                "Full manufacturer warranties on all hardscape materials, irrigation components, and fixtures".to_string(),
                "Plant establishment guarantee with complimentary replacements during the warranty period".to_string(),
                "Detailed project documentation including as-built plans and material specifications".to_string(),
                format!(
                    "Responsive support — {} personally stands behind every project",
                    business.owner_name
                ),
            ],
        },
        commercial_services: COMMERCIAL_SERVICES.iter().map(|s| s.to_string()).collect(),
        nearby_cities: service_area
            .iter()
            .map(|other| other.city.clone())
            .filter(|other| !other.eq_ignore_ascii_case(city))
            .collect(),
        faqs: meta.faqs.clone(),
    })
}
