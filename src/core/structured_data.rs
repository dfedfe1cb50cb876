//! schema.org JSON-LD objects embedded in rendered pages.

use crate::domain::model::{Business, Crumb, Faq, ServiceSummary};
use serde_json::{json, Value};

const BUSINESS_TYPE: &str = "LandscapeArchitect";

fn cities(area_served: &[String]) -> Vec<Value> {
    area_served
        .iter()
        .map(|city| json!({ "@type": "City", "name": city }))
        .collect()
}

pub fn local_business(
    business: &Business,
    site_url: &str,
    area_served: &[String],
    services: &[ServiceSummary],
) -> Value {
    let offers: Vec<Value> = services
        .iter()
        .map(|s| {
            json!({
                "@type": "Offer",
                "itemOffered": { "@type": "Service", "name": s.name },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": BUSINESS_TYPE,
        "name": business.business_name,
        "description": format!(
            "{} delivers premium landscape design, hardscaping, custom carpentry, and white-glove property management across the Austin metro. {} years of experience. Licensed, bonded, and insured.",
            business.business_name, business.years_experience
        ),
        "url": site_url,
        "telephone": business.phone,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": business.address.street,
            "addressLocality": business.address.city,
            "addressRegion": business.address.state,
            "postalCode": business.address.zip,
            "addressCountry": "US",
        },
        "areaServed": cities(area_served),
        "hasOfferCatalog": {
            "@type": "OfferCatalog",
            "name": "Landscape Services",
            "itemListElement": offers,
        },
        "sameAs": business.social.urls(),
    })
}

pub fn service(
    name: &str,
    description: &str,
    area_served: &[String],
    business: &Business,
    site_url: &str,
) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "serviceType": name,
        "provider": {
            "@type": BUSINESS_TYPE,
            "name": business.business_name,
            "url": site_url,
        },
        "areaServed": cities(area_served),
        "description": description,
    })
}

pub fn faq_page(faqs: &[Faq]) -> Value {
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": questions,
    })
}

/// Positions start at 1; item URLs are made absolute against `site_url`.
pub fn breadcrumbs(crumbs: &[Crumb], site_url: &str) -> Value {
    let base = site_url.trim_end_matches('/');
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": crumb.name,
                "item": format!("{}{}", base, crumb.url),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticCatalog;

    #[test]
    fn test_local_business_skips_placeholder_links() {
        let catalog = StaticCatalog::load().unwrap();
        let cities: Vec<String> = catalog.service_area.iter().map(|a| a.city.clone()).collect();
        let schema = local_business(
            &catalog.business,
            "https://example.com",
            &cities,
            &catalog.services,
        );

        let same_as = schema["sameAs"].as_array().unwrap();
        assert_eq!(same_as.len(), 2);
        assert!(same_as.iter().all(|v| v != "[PLACEHOLDER]"));
        assert_eq!(schema["areaServed"].as_array().unwrap().len(), 10);
        assert_eq!(
            schema["hasOfferCatalog"]["itemListElement"].as_array().unwrap().len(),
            8
        );
        assert_eq!(schema["address"]["addressCountry"], "US");
    }

    #[test]
    fn test_breadcrumbs_are_absolute_and_one_based() {
        let crumbs = [
            Crumb::new("Home", "/"),
            Crumb::new("Services", "/services"),
            Crumb::new("Hardscaping", "/services/hardscaping"),
        ];
        let schema = breadcrumbs(&crumbs, "https://example.com/");
        let items = schema["itemListElement"].as_array().unwrap();

        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[0]["item"], "https://example.com/");
        assert_eq!(items[2]["position"], 3);
        assert_eq!(items[2]["item"], "https://example.com/services/hardscaping");
    }

    #[test]
    fn test_faq_page() {
        let faqs = vec![Faq {
            question: "Are you licensed?".to_string(),
            answer: "Yes.".to_string(),
        }];
        let schema = faq_page(&faqs);
        assert_eq!(schema["mainEntity"][0]["name"], "Are you licensed?");
        assert_eq!(schema["mainEntity"][0]["acceptedAnswer"]["text"], "Yes.");
    }
}
