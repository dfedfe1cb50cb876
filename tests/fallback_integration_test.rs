use anyhow::Result;
use httpmock::prelude::*;
use outdoor_reno_site::core::content_source::CmsQuery;
use outdoor_reno_site::core::site::PageBody;
use outdoor_reno_site::{RouteTable, Site, SiteConfig};
use serde_json::json;

const QUERY_PATH: &str = "/v2024-01-01/data/query/production";

fn config_for(server: &MockServer) -> Result<SiteConfig> {
    let config = SiteConfig::from_toml_str(&format!(
        r#"
[cms]
project_id = "testproj"
api_host = "{}"
timeout_seconds = 2
"#,
        server.base_url()
    ))?;
    Ok(config)
}

/// 未設定 CMS 時，服務頁完全使用靜態內容
#[tokio::test]
async fn test_service_page_without_cms() -> Result<()> {
    let site = Site::from_config(&SiteConfig::from_toml_str("")?)?;
    assert!(!site.source().is_configured());

    let page = site.resolve_path("/services/landscape-design").await?;
    let PageBody::Service(service) = &page.body else {
        panic!("expected a service page");
    };

    assert_eq!(service.hero_headline, "Landscape Design");
    assert_eq!(service.faqs.len(), 6);
    assert_eq!(page.reviews.len(), 12);
    let ids: Vec<u32> = page.reviews.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<u32>>());
    Ok(())
}

/// 城市頁：縣名與鄰近城市
#[tokio::test]
async fn test_location_page_without_cms() -> Result<()> {
    let site = Site::from_config(&SiteConfig::from_toml_str("")?)?;

    let page = site.resolve_path("/locations/westlake-hills").await?;
    let PageBody::Location(location) = &page.body else {
        panic!("expected a location page");
    };

    assert_eq!(location.county, "Travis");
    assert_eq!(location.nearby_cities.len(), 9);
    assert!(!location.nearby_cities.iter().any(|c| c == "Westlake Hills"));
    assert_eq!(page.structured_data.len(), 3);
    Ok(())
}

/// CMS 有值的欄位優先，空字串欄位退回靜態內容
#[tokio::test]
async fn test_cms_values_win_per_field() -> Result<()> {
    let server = MockServer::start();

    let settings_mock = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", CmsQuery::SiteSettings.groq());
        then.status(200).json_body(json!({
            "result": {
                "phone": "(512) 555-0199",
                "email": "",
                "reviews": [
                    {"reviewerName": "Dana", "reviewText": "Great crew.", "rating": 4, "technicianName": "Kyle"}
                ]
            },
            "ms": 3
        }));
    });

    let service_mock = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", CmsQuery::ServiceBySlug.groq())
            .query_param("$slug", "\"hardscaping\"");
        then.status(200).json_body(json!({
            "result": {
                "serviceName": "Hardscaping",
                "slug": "hardscaping",
                "heroHeadline": "",
                "heroSubheadline": "Stone, pavers and walls built to last.",
                "faqItems": []
            }
        }));
    });

    let site = Site::from_config(&config_for(&server)?)?;
    let page = site.resolve_path("/services/hardscaping").await?;

    settings_mock.assert();
    service_mock.assert();

    assert_eq!(page.business.phone, "(512) 555-0199");
    assert_eq!(page.business.phone_href, "tel:+15125550199");
    assert_eq!(page.business.email, site.catalog().business.email);
    assert_eq!(page.reviews.len(), 1);
    assert_eq!(page.reviews[0].technician, "Tech: Kyle");

    let PageBody::Service(service) = &page.body else {
        panic!("expected a service page");
    };
    assert_eq!(service.hero_headline, "Hardscaping");
    assert_eq!(service.hero_subheadline, "Stone, pavers and walls built to last.");
    assert_eq!(
        service.faqs,
        site.catalog().service_page("hardscaping").unwrap().faqs
    );
    Ok(())
}

/// CMS 回傳錯誤時，頁面照常以靜態內容產生
#[tokio::test]
async fn test_cms_failure_falls_back() -> Result<()> {
    let server = MockServer::start();

    let failing = server.mock(|when, then| {
        when.method(GET).path(QUERY_PATH);
        then.status(500).body("internal error");
    });

    let site = Site::from_config(&config_for(&server)?)?;

    let page = site.resolve_path("/services/landscape-lighting").await?;
    assert!(failing.hits() >= 1);
    assert_eq!(page.business, site.catalog().business);
    assert_eq!(page.reviews, site.catalog().reviews);

    let table: RouteTable = site.route_table().await;
    assert_eq!(table.services, site.catalog().service_slugs());
    Ok(())
}

/// CMS 列出的 slug 取代靜態清單，包含僅存在於 CMS 的服務
#[tokio::test]
async fn test_cms_only_service_slug() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", CmsQuery::ServiceSlugs.groq());
        then.status(200)
            .json_body(json!({"result": [{"slug": "pool-builds"}, {"slug": "hardscaping"}]}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", CmsQuery::SiteSettings.groq());
        then.status(200).json_body(json!({"result": null}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", CmsQuery::ServiceBySlug.groq())
            .query_param("$slug", "\"pool-builds\"");
        then.status(200).json_body(json!({
            "result": {"serviceName": "Pool Builds", "slug": "pool-builds"}
        }));
    });

    let site = Site::from_config(&config_for(&server)?)?;
    let table = site.route_table().await;
    assert_eq!(table.services, vec!["pool-builds", "hardscaping"]);

    let page = site.resolve_path("/services/pool-builds").await?;
    assert_eq!(page.meta.title, "Pool Builds | Austin Landscape Services | Outdoor Renovations");
    Ok(())
}
