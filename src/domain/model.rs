use serde::{Deserialize, Serialize};

/// A question/answer pair. Serialized as-is for display, and through
/// `structured_data::faq_page` for schema.org output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentSection {
    pub heading: String,
    pub body: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetail {
    pub detail: String,
    pub description: String,
}

/// One entry of the service catalog, as shown on listing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub icon: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Long-form fallback copy for a service detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePageFallback {
    pub hero_subheadline: String,
    pub hero_body: String,
    pub hero_image: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub systems_list: Vec<String>,
    #[serde(default)]
    pub advantages: Vec<String>,
    pub process_steps: Vec<ProcessStep>,
    #[serde(default)]
    pub investment_section: Option<InvestmentSection>,
    #[serde(default)]
    pub why_choose_bullets: Vec<String>,
    pub faqs: Vec<Faq>,
}

/// Fully resolved service detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePage {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub hero_headline: String,
    pub hero_subheadline: String,
    pub hero_body: Option<String>,
    pub hero_image: String,
    pub cta_label: String,
    pub cta_url: String,
    /// Paragraphs of the CMS long description. When non-empty the static
    /// long-form blocks below are left empty.
    pub description: Vec<String>,
    pub sections: Vec<Section>,
    pub systems_list: Vec<String>,
    pub advantages: Vec<String>,
    pub investment_section: Option<InvestmentSection>,
    pub why_choose_bullets: Vec<String>,
    pub details: Vec<ServiceDetail>,
    pub process_steps: Vec<ProcessStep>,
    pub faqs: Vec<Faq>,
    pub primary_keyword: Option<String>,
    pub secondary_keywords: Vec<String>,
    pub schema_name: String,
    pub schema_description: String,
    pub schema_area_served: Vec<String>,
}

/// CMS-side overrides for a [`ServicePage`]; `None` means "not supplied".
#[derive(Debug, Clone, Default)]
pub struct ServicePagePatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub hero_headline: Option<String>,
    pub hero_subheadline: Option<String>,
    pub hero_body: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub description: Option<Vec<String>>,
    pub details: Option<Vec<ServiceDetail>>,
    pub process_steps: Option<Vec<ProcessStep>>,
    pub faqs: Option<Vec<Faq>>,
    pub primary_keyword: Option<String>,
    pub secondary_keywords: Option<Vec<String>>,
    pub schema_name: Option<String>,
    pub schema_description: Option<String>,
    pub schema_area_served: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub name: String,
    pub text: String,
    pub rating: u8,
    #[serde(default)]
    pub technician: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub google: Option<String>,
    #[serde(default)]
    pub yelp: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl SocialLinks {
    pub const PLACEHOLDER: &'static str = "[PLACEHOLDER]";

    /// Configured profile URLs, skipping unset and placeholder entries.
    pub fn urls(&self) -> Vec<&str> {
        [
            &self.facebook,
            &self.instagram,
            &self.google,
            &self.yelp,
            &self.linkedin,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|url| !url.trim().is_empty() && *url != Self::PLACEHOLDER)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub business_name: String,
    pub phone: String,
    pub phone_href: String,
    pub email: String,
    pub address: Address,
    pub service_area_label: String,
    #[serde(default)]
    pub business_hours: Option<String>,
    pub years_experience: String,
    pub founded_year: String,
    pub owner_name: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub review_count: String,
    pub average_rating: String,
    pub site_url: String,
    pub motto: String,
    pub tagline: String,
    #[serde(default)]
    pub social: SocialLinks,
}

/// CMS-side overrides for [`Business`].
#[derive(Debug, Clone, Default)]
pub struct BusinessPatch {
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub service_area_label: Option<String>,
    pub business_hours: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub google: Option<String>,
    pub yelp: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub city: String,
    pub county: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub name: String,
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingCategory {
    pub category: String,
    pub services: Vec<PriceLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentialService {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProseSection {
    pub heading: String,
    pub subheading: Option<String>,
    pub body: Vec<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidentialSection {
    pub heading: String,
    pub body: String,
    pub services: Vec<ResidentialService>,
}

/// A generated city landing page. Built entirely from static metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub city: String,
    pub slug: String,
    pub county: String,
    pub state: String,
    pub hero_headline: String,
    pub hero_description: String,
    pub why_trust: ProseSection,
    pub residential: ResidentialSection,
    pub expertise: ProseSection,
    pub equipment: ProseSection,
    pub protection: ProseSection,
    pub commercial_services: Vec<String>,
    pub nearby_cities: Vec<String>,
    pub faqs: Vec<Faq>,
}

/// A link in a breadcrumb trail; `url` is site-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub url: String,
}

impl Crumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
