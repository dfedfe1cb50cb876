//! Shapes returned by the CMS query projections.
//!
//! Every field is optional: editors may leave anything blank and GROQ
//! projections return `null` for missing attributes.

use crate::domain::model::{
    BusinessPatch, Faq, ProcessStep, Review, ServiceDetail, ServicePagePatch, ServiceSummary,
};
use crate::utils::validation;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsReview {
    pub reviewer_name: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<u8>,
    pub source: Option<String>,
    pub technician_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmsSocialLinks {
    pub facebook: Option<String>,
    pub google: Option<String>,
    pub yelp: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsSiteSettings {
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub service_area: Option<String>,
    pub business_hours: Option<String>,
    pub social_links: Option<CmsSocialLinks>,
    pub reviews: Option<Vec<CmsReview>>,
}

impl CmsSiteSettings {
    /// Reviews in display shape, numbered from 1 in CMS order.
    pub fn display_reviews(&self) -> Vec<Review> {
        self.reviews
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, review)| Review {
                id: index as u32 + 1,
                name: review.reviewer_name.clone().unwrap_or_default(),
                text: review.review_text.clone().unwrap_or_default(),
                rating: review.rating.unwrap_or(5).clamp(1, 5),
                technician: review
                    .technician_name
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .map(|name| format!("Tech: {}", name))
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub fn business_patch(&self) -> BusinessPatch {
        let social = self.social_links.clone().unwrap_or_default();
        BusinessPatch {
            business_name: self.business_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            street: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
            service_area_label: self.service_area.clone(),
            business_hours: self.business_hours.clone(),
            facebook: web_link(social.facebook),
            instagram: web_link(social.instagram),
            google: web_link(social.google),
            yelp: web_link(social.yelp),
            linkedin: web_link(social.linkedin),
        }
    }
}

/// Keeps a profile link only when it is an http(s) URL.
fn web_link(url: Option<String>) -> Option<String> {
    url.filter(|url| match validation::validate_url("social_links", url) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Ignoring CMS social link: {}", e);
            false
        }
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsServiceListItem {
    pub service_name: Option<String>,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub hero_image: Option<Value>,
    pub icon_name: Option<String>,
}

impl CmsServiceListItem {
    pub const DEFAULT_ICON: &'static str = "Wrench";

    /// Listing entry; entries without a slug cannot be routed and are dropped.
    pub fn to_summary(&self) -> Option<ServiceSummary> {
        let slug = self.slug.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(ServiceSummary {
            name: self.service_name.clone().unwrap_or_default(),
            slug: slug.to_string(),
            short_description: self.short_description.clone().unwrap_or_default(),
            icon: self
                .icon_name
                .clone()
                .filter(|icon| !icon.trim().is_empty())
                .unwrap_or_else(|| Self::DEFAULT_ICON.to_string()),
            image: None,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmsServiceDetail {
    pub detail: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsProcessStep {
    pub step_title: Option<String>,
    pub step_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmsFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsServicePage {
    pub service_name: Option<String>,
    pub slug: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub hero_headline: Option<String>,
    pub hero_subheadline: Option<String>,
    pub hero_body: Option<String>,
    pub hero_image: Option<Value>,
    #[serde(rename = "heroPrimaryCTA")]
    pub hero_primary_cta: Option<String>,
    #[serde(rename = "heroPrimaryCTAUrl")]
    pub hero_primary_cta_url: Option<String>,
    pub service_description: Option<Vec<Value>>,
    pub service_details: Option<Vec<CmsServiceDetail>>,
    pub process_steps: Option<Vec<CmsProcessStep>>,
    pub faq_items: Option<Vec<CmsFaq>>,
    pub primary_keyword: Option<String>,
    pub secondary_keywords: Option<Vec<String>>,
    pub schema_service_name: Option<String>,
    pub schema_service_description: Option<String>,
    pub schema_area_served: Option<String>,
}

impl CmsServicePage {
    pub fn to_patch(&self) -> ServicePagePatch {
        ServicePagePatch {
            name: self.service_name.clone(),
            slug: self.slug.clone(),
            hero_headline: self.hero_headline.clone(),
            hero_subheadline: self.hero_subheadline.clone(),
            hero_body: self.hero_body.clone(),
            cta_label: self.hero_primary_cta.clone(),
            cta_url: self.hero_primary_cta_url.clone(),
            description: self
                .service_description
                .as_deref()
                .map(portable_text_paragraphs),
            details: self.service_details.as_ref().map(|details| {
                details
                    .iter()
                    .map(|d| ServiceDetail {
                        detail: d.detail.clone().unwrap_or_default(),
                        description: d.description.clone().unwrap_or_default(),
                    })
                    .collect()
            }),
            process_steps: self.process_steps.as_ref().map(|steps| {
                steps
                    .iter()
                    .map(|s| ProcessStep {
                        title: s.step_title.clone().unwrap_or_default(),
                        description: s.step_description.clone().unwrap_or_default(),
                    })
                    .collect()
            }),
            faqs: self.faq_items.as_ref().map(|items| {
                items
                    .iter()
                    .filter_map(|f| {
                        Some(Faq {
                            question: f.question.clone()?,
                            answer: f.answer.clone().unwrap_or_default(),
                        })
                    })
                    .collect()
            }),
            primary_keyword: self.primary_keyword.clone(),
            secondary_keywords: self.secondary_keywords.clone(),
            schema_name: self.schema_service_name.clone(),
            schema_description: self.schema_service_description.clone(),
            schema_area_served: self.schema_area_served.as_deref().map(|area| {
                area.split(',')
                    .map(str::trim)
                    .filter(|city| !city.is_empty())
                    .map(String::from)
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmsSlug {
    pub slug: Option<String>,
}

/// Flattens portable-text blocks into plain paragraphs. Non-text blocks
/// (images, embeds) are skipped.
pub fn portable_text_paragraphs(blocks: &[Value]) -> Vec<String> {
    blocks
        .iter()
        .filter(|block| block.get("_type").and_then(Value::as_str) == Some("block"))
        .filter_map(|block| {
            let text: String = block
                .get("children")?
                .as_array()?
                .iter()
                .filter_map(|span| span.get("text").and_then(Value::as_str))
                .collect();
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_business_patch_keeps_only_web_social_links() {
        let settings: CmsSiteSettings = serde_json::from_value(json!({
            "socialLinks": {
                "facebook": "javascript:alert(1)",
                "instagram": "https://instagram.com/outdoorreno",
                "yelp": "not a url"
            }
        }))
        .unwrap();

        let patch = settings.business_patch();
        assert_eq!(patch.facebook, None);
        assert_eq!(patch.instagram.as_deref(), Some("https://instagram.com/outdoorreno"));
        assert_eq!(patch.yelp, None);
    }

    #[test]
    fn test_display_reviews_numbering_and_technician() {
        let settings: CmsSiteSettings = serde_json::from_value(json!({
            "businessName": null,
            "reviews": [
                {"reviewerName": "Ana", "reviewText": "Great", "rating": 5, "technicianName": "Luis"},
                {"reviewerName": "Ben", "reviewText": "Good", "rating": 9, "technicianName": null}
            ]
        }))
        .unwrap();

        let reviews = settings.display_reviews();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, 1);
        assert_eq!(reviews[0].technician, "Tech: Luis");
        assert_eq!(reviews[1].id, 2);
        assert_eq!(reviews[1].technician, "");
        assert_eq!(reviews[1].rating, 5);
    }

    #[test]
    fn test_service_page_patch_maps_cms_names() {
        let page: CmsServicePage = serde_json::from_value(json!({
            "serviceName": "Hardscaping",
            "slug": "hardscaping",
            "heroPrimaryCTA": "Book a walkthrough",
            "processSteps": [{"stepTitle": "Survey", "stepDescription": "We measure."}],
            "faqItems": [{"question": "How long?", "answer": "Two weeks."}],
            "schemaAreaServed": "Lakeway, Bee Cave ,"
        }))
        .unwrap();

        let patch = page.to_patch();
        assert_eq!(patch.cta_label.as_deref(), Some("Book a walkthrough"));
        assert_eq!(patch.process_steps.unwrap()[0].title, "Survey");
        assert_eq!(patch.faqs.unwrap()[0].answer, "Two weeks.");
        assert_eq!(
            patch.schema_area_served.unwrap(),
            vec!["Lakeway".to_string(), "Bee Cave".to_string()]
        );
        assert!(patch.description.is_none());
    }

    #[test]
    fn test_portable_text_paragraphs() {
        let blocks = vec![
            json!({"_type": "block", "children": [{"text": "Stone "}, {"text": "patios."}]}),
            json!({"_type": "image", "asset": {"_ref": "image-1"}}),
            json!({"_type": "block", "children": [{"text": "   "}]}),
        ];
        assert_eq!(portable_text_paragraphs(&blocks), vec!["Stone patios."]);
    }

    #[test]
    fn test_list_item_without_slug_is_dropped() {
        let item = CmsServiceListItem {
            service_name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(item.to_summary().is_none());

        let item = CmsServiceListItem {
            service_name: Some("Lighting".to_string()),
            slug: Some("landscape-lighting".to_string()),
            ..Default::default()
        };
        assert_eq!(item.to_summary().unwrap().icon, "Wrench");
    }
}
