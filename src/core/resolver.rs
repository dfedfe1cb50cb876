//! Pure merge functions: CMS records (when any) over the static catalog.
//!
//! Nothing here performs IO. Callers fetch through `ContentSource` and pass
//! `Option`s in, so every function is testable with plain values.

use crate::content::{StaticCatalog, DEFAULT_HERO_IMAGE};
use crate::core::fallback::{prefer_opt, Overlay, Presence};
use crate::domain::cms::{CmsServiceListItem, CmsServicePage, CmsSiteSettings};
use crate::domain::model::{Business, Review, ServicePage, ServicePagePatch, ServiceSummary};

pub const DEFAULT_CTA_LABEL: &str = "Get a Consultation";
pub const DEFAULT_CTA_URL: &str = "/contact";

pub fn resolve_business(settings: Option<&CmsSiteSettings>, catalog: &StaticCatalog) -> Business {
    let business = catalog.business.clone();
    let Some(settings) = settings else {
        return business;
    };

    let mut business = business.overlay(settings.business_patch());
    // The click-to-call link must dial the number on display.
    if settings.phone.is_present() {
        business.phone_href = tel_href(&business.phone);
    }
    business
}

/// `(512) 555-0101` → `tel:+15125550101`. Ten-digit numbers get the `+1`
/// country code; numbers already carrying a leading `1` keep it.
pub fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        format!("tel:+{}", digits)
    } else {
        format!("tel:+1{}", digits)
    }
}

/// CMS reviews when the list is non-empty, else the placeholder set as-is.
pub fn resolve_reviews(settings: Option<&CmsSiteSettings>, catalog: &StaticCatalog) -> Vec<Review> {
    let from_cms = settings.map(CmsSiteSettings::display_reviews).unwrap_or_default();
    if from_cms.is_empty() {
        catalog.reviews.clone()
    } else {
        from_cms
    }
}

/// The service listing. A non-empty CMS list replaces the static one whole;
/// images always come from the static catalog by slug.
pub fn resolve_services(
    cms: Option<Vec<CmsServiceListItem>>,
    catalog: &StaticCatalog,
) -> Vec<ServiceSummary> {
    let from_cms: Vec<ServiceSummary> = cms
        .unwrap_or_default()
        .iter()
        .filter_map(CmsServiceListItem::to_summary)
        .collect();

    if from_cms.is_empty() {
        return catalog.services.clone();
    }

    from_cms
        .into_iter()
        .map(|mut summary| {
            summary.image = Some(catalog.service_image(&summary.slug).to_string());
            summary
        })
        .collect()
}

/// Resolves a service detail page. `None` when neither the CMS nor the
/// static catalog knows the slug.
pub fn resolve_service_page(
    slug: &str,
    cms: Option<CmsServicePage>,
    catalog: &StaticCatalog,
    business: &Business,
) -> Option<ServicePage> {
    let summary = catalog.service(slug);
    let page_data = catalog.service_page(slug);

    let meta = cms.as_ref().and_then(|page| {
        page.meta_title
            .clone()
            .filter(|title| !title.trim().is_empty())
            .map(|title| (title, page.meta_description.clone()))
    });

    let mut patch: ServicePagePatch = cms.as_ref().map(CmsServicePage::to_patch).unwrap_or_default();
    patch.hero_headline = prefer_opt(patch.hero_headline.take(), patch.name.clone());
    patch.schema_name = prefer_opt(patch.schema_name.take(), patch.name.clone());
    patch.schema_description =
        prefer_opt(patch.schema_description.take(), patch.hero_subheadline.clone());

    let short_description = summary
        .map(|s| s.short_description.clone())
        .unwrap_or_default();
    let static_name = summary.map(|s| s.name.clone()).unwrap_or_default();

    let base = ServicePage {
        name: static_name.clone(),
        slug: summary.map(|s| s.slug.clone()).unwrap_or_default(),
        short_description: short_description.clone(),
        meta_title: String::new(),
        meta_description: String::new(),
        hero_headline: static_name.clone(),
        hero_subheadline: page_data
            .map(|p| p.hero_subheadline.clone())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| short_description.clone()),
        hero_body: page_data.map(|p| p.hero_body.clone()),
        hero_image: page_data
            .map(|p| p.hero_image.clone())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HERO_IMAGE.to_string()),
        cta_label: DEFAULT_CTA_LABEL.to_string(),
        cta_url: DEFAULT_CTA_URL.to_string(),
        description: Vec::new(),
        sections: page_data.map(|p| p.sections.clone()).unwrap_or_default(),
        systems_list: page_data.map(|p| p.systems_list.clone()).unwrap_or_default(),
        advantages: page_data.map(|p| p.advantages.clone()).unwrap_or_default(),
        investment_section: page_data.and_then(|p| p.investment_section.clone()),
        why_choose_bullets: page_data
            .map(|p| p.why_choose_bullets.clone())
            .unwrap_or_default(),
        details: Vec::new(),
        process_steps: page_data.map(|p| p.process_steps.clone()).unwrap_or_default(),
        faqs: page_data.map(|p| p.faqs.clone()).unwrap_or_default(),
        primary_keyword: None,
        secondary_keywords: Vec::new(),
        schema_name: static_name,
        schema_description: short_description,
        schema_area_served: catalog.service_area.iter().map(|a| a.city.clone()).collect(),
    };

    let mut page = base.overlay(patch);
    if page.name.trim().is_empty() || page.slug.trim().is_empty() {
        return None;
    }

    if !page.description.is_empty() {
        page.sections.clear();
        page.systems_list.clear();
        page.advantages.clear();
        page.investment_section = None;
        page.why_choose_bullets.clear();
    }

    let (meta_title, meta_description) = match meta {
        Some((title, description)) => (
            title,
            prefer_opt(description, None).unwrap_or_else(|| {
                format!(
                    "{} services from {}. Serving the Austin metro area.",
                    page.name, business.business_name
                )
            }),
        ),
        None => (
            format!("{} | Austin Landscape Services", page.name),
            format!(
                "{} {} serves the Austin metro area. Licensed General Contractor of Landscape. Call {}.",
                page.short_description, business.business_name, business.phone
            )
            .trim_start()
            .to_string(),
        ),
    };
    page.meta_title = meta_title;
    page.meta_description = meta_description;

    Some(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cms::{CmsFaq, CmsProcessStep, CmsReview};
    use serde_json::json;

    fn catalog() -> StaticCatalog {
        StaticCatalog::load().unwrap()
    }

    #[test]
    fn test_static_service_page_without_cms() {
        let catalog = catalog();
        let page =
            resolve_service_page("landscape-design", None, &catalog, &catalog.business).unwrap();

        assert_eq!(page.name, "Landscape Design");
        assert_eq!(page.hero_headline, "Landscape Design");
        assert_eq!(page.cta_label, DEFAULT_CTA_LABEL);
        assert_eq!(page.cta_url, DEFAULT_CTA_URL);
        assert_eq!(page.faqs.len(), 6);
        assert!(!page.sections.is_empty());
        assert_eq!(page.meta_title, "Landscape Design | Austin Landscape Services");
        assert!(page.meta_description.contains(&catalog.business.phone));
        assert_eq!(page.schema_area_served.len(), 10);
    }

    #[test]
    fn test_unknown_slug_is_not_found() {
        let catalog = catalog();
        assert!(resolve_service_page("pool-cleaning", None, &catalog, &catalog.business).is_none());
    }

    #[test]
    fn test_cms_only_slug_resolves() {
        let catalog = catalog();
        let cms = CmsServicePage {
            service_name: Some("Pool Cleaning".to_string()),
            slug: Some("pool-cleaning".to_string()),
            ..CmsServicePage::default()
        };

        let page =
            resolve_service_page("pool-cleaning", Some(cms), &catalog, &catalog.business).unwrap();
        assert_eq!(page.hero_headline, "Pool Cleaning");
        assert_eq!(page.hero_image, DEFAULT_HERO_IMAGE);
        assert!(page.faqs.is_empty());
    }

    #[test]
    fn test_empty_cms_fields_fall_back_per_field() {
        let catalog = catalog();
        let cms = CmsServicePage {
            service_name: Some(String::new()),
            hero_headline: Some("Yards Worth Coming Home To".to_string()),
            hero_subheadline: Some("".to_string()),
            faq_items: Some(vec![]),
            process_steps: Some(vec![CmsProcessStep {
                step_title: Some("Walk".to_string()),
                step_description: Some("We walk the lot.".to_string()),
            }]),
            ..CmsServicePage::default()
        };

        let page =
            resolve_service_page("hardscaping", Some(cms), &catalog, &catalog.business).unwrap();
        let fallback = catalog.service_page("hardscaping").unwrap();

        assert_eq!(page.name, "Hardscaping");
        assert_eq!(page.hero_headline, "Yards Worth Coming Home To");
        assert_eq!(page.hero_subheadline, fallback.hero_subheadline);
        assert_eq!(page.faqs, fallback.faqs);
        assert_eq!(page.process_steps.len(), 1);
        assert_eq!(page.process_steps[0].title, "Walk");
    }

    #[test]
    fn test_cms_meta_and_description() {
        let catalog = catalog();
        let cms = CmsServicePage {
            service_name: Some("Hardscaping".to_string()),
            meta_title: Some("Custom Patios in Austin".to_string()),
            service_description: Some(vec![json!({
                "_type": "block",
                "children": [{"_type": "span", "text": "Stone that lasts."}]
            })]),
            faq_items: Some(vec![CmsFaq {
                question: Some("Do you pull permits?".to_string()),
                answer: Some("Yes.".to_string()),
            }]),
            ..CmsServicePage::default()
        };

        let page =
            resolve_service_page("hardscaping", Some(cms), &catalog, &catalog.business).unwrap();

        assert_eq!(page.meta_title, "Custom Patios in Austin");
        assert_eq!(
            page.meta_description,
            "Hardscaping services from Outdoor Renovations. Serving the Austin metro area."
        );
        assert_eq!(page.description, vec!["Stone that lasts."]);
        assert!(page.sections.is_empty());
        assert!(page.why_choose_bullets.is_empty());
        assert_eq!(page.faqs.len(), 1);
    }

    #[test]
    fn test_schema_description_follows_cms_subheadline() {
        let catalog = catalog();
        let cms = CmsServicePage {
            hero_subheadline: Some("Light the paths.".to_string()),
            schema_area_served: Some("Lakeway, Bee Cave".to_string()),
            ..CmsServicePage::default()
        };

        let page = resolve_service_page("landscape-lighting", Some(cms), &catalog, &catalog.business)
            .unwrap();
        assert_eq!(page.schema_description, "Light the paths.");
        assert_eq!(page.schema_area_served, vec!["Lakeway", "Bee Cave"]);
    }

    #[test]
    fn test_reviews_fall_back_when_cms_list_empty() {
        let catalog = catalog();
        let settings = CmsSiteSettings {
            reviews: Some(vec![]),
            ..CmsSiteSettings::default()
        };

        assert_eq!(resolve_reviews(Some(&settings), &catalog), catalog.reviews);
        assert_eq!(resolve_reviews(None, &catalog), catalog.reviews);
    }

    #[test]
    fn test_cms_reviews_win() {
        let catalog = catalog();
        let settings = CmsSiteSettings {
            reviews: Some(vec![CmsReview {
                reviewer_name: Some("Dana".to_string()),
                review_text: Some("Great crew.".to_string()),
                technician_name: Some("Kyle".to_string()),
                ..CmsReview::default()
            }]),
            ..CmsSiteSettings::default()
        };

        let reviews = resolve_reviews(Some(&settings), &catalog);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, 1);
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[0].technician, "Tech: Kyle");
    }

    #[test]
    fn test_services_listing() {
        let catalog = catalog();
        assert_eq!(resolve_services(None, &catalog), catalog.services);
        assert_eq!(resolve_services(Some(vec![]), &catalog), catalog.services);

        let cms = vec![
            CmsServiceListItem {
                service_name: Some("Hardscaping".to_string()),
                slug: Some("hardscaping".to_string()),
                ..CmsServiceListItem::default()
            },
            CmsServiceListItem {
                service_name: Some("Mystery".to_string()),
                slug: Some("mystery".to_string()),
                ..CmsServiceListItem::default()
            },
        ];
        let services = resolve_services(Some(cms), &catalog);
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].icon, CmsServiceListItem::DEFAULT_ICON);
        assert_eq!(services[0].image.as_deref(), Some(catalog.service_image("hardscaping")));
        assert_eq!(
            services[1].image.as_deref(),
            Some(crate::content::DEFAULT_SERVICE_IMAGE)
        );
    }

    #[test]
    fn test_business_overlay_from_settings() {
        let catalog = catalog();
        let settings = CmsSiteSettings {
            phone: Some("(512) 555-0101".to_string()),
            email: Some(" ".to_string()),
            ..CmsSiteSettings::default()
        };

        let business = resolve_business(Some(&settings), &catalog);
        assert_eq!(business.phone, "(512) 555-0101");
        assert_eq!(business.email, catalog.business.email);
        assert_eq!(resolve_business(None, &catalog), catalog.business);
    }

    #[test]
    fn test_phone_link_follows_cms_phone() {
        let catalog = catalog();
        let settings = CmsSiteSettings {
            phone: Some("(512) 555-0101".to_string()),
            ..CmsSiteSettings::default()
        };
        let business = resolve_business(Some(&settings), &catalog);
        assert_eq!(business.phone_href, "tel:+15125550101");

        let blank = CmsSiteSettings {
            phone: Some("  ".to_string()),
            ..CmsSiteSettings::default()
        };
        let business = resolve_business(Some(&blank), &catalog);
        assert_eq!(business.phone, catalog.business.phone);
        assert_eq!(business.phone_href, catalog.business.phone_href);
    }

    #[test]
    fn test_tel_href() {
        assert_eq!(tel_href("512-743-0570"), "tel:+15127430570");
        assert_eq!(tel_href("+1 (512) 743-0570"), "tel:+15127430570");
    }
}
