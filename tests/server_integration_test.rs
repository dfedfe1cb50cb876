use anyhow::Result;
use outdoor_reno_site::app::server;
use outdoor_reno_site::{AppState, ContentSource, Site, StaticCatalog};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn start_server() -> Result<String> {
    let site = Site::new(
        ContentSource::disabled(),
        Arc::new(StaticCatalog::load()?),
        Some("https://example.com"),
    );
    let state = AppState::new(site, Duration::from_secs(60), Duration::from_millis(10));

    let listener = server::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = server::run(listener, state).await;
    });
    Ok(format!("http://{}", addr))
}

/// 所有固定頁面與動態頁面皆回傳 200
#[tokio::test]
async fn test_pages_render() -> Result<()> {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/",
        "/about",
        "/contact",
        "/services",
        "/services/landscape-design",
        "/services-pricing",
        "/locations",
        "/locations/westlake-hills/",
    ] {
        let response = client.get(format!("{}{}", base, path)).send().await?;
        assert_eq!(response.status().as_u16(), 200, "{}", path);
        let body = response.text().await?;
        assert!(body.contains("<!DOCTYPE html>"), "{}", path);
    }

    let health = client.get(format!("{}/healthz", base)).send().await?;
    assert_eq!(health.text().await?, "ok");
    Ok(())
}

/// 未知 slug、管理介面路徑皆回傳 404
#[tokio::test]
async fn test_unknown_paths_are_404() -> Result<()> {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/services/pool-cleaning",
        "/locations/houston",
        "/studio",
        "/studio/structure",
        "/blog",
    ] {
        let response = client.get(format!("{}{}", base, path)).send().await?;
        assert_eq!(response.status().as_u16(), 404, "{}", path);
        assert!(response.text().await?.contains("Page Not Found"));
    }
    Ok(())
}

/// 表單驗證失敗回傳 422，成功則顯示感謝頁
#[tokio::test]
async fn test_contact_form_submission() -> Result<()> {
    let base = start_server().await?;
    let client = reqwest::Client::new();

    let invalid = client
        .post(format!("{}/contact", base))
        .form(&[("name", "Dana"), ("email", "not-an-email")])
        .send()
        .await?;
    assert_eq!(invalid.status().as_u16(), 422);
    let body = invalid.text().await?;
    assert!(body.contains("Enter a valid email"));
    assert!(body.contains("Phone number is required"));
    assert!(body.contains(r#"value="Dana""#));

    let valid = client
        .post(format!("{}/contact", base))
        .form(&[
            ("name", "Dana Reyes"),
            ("email", "dana@example.com"),
            ("phone", "512-555-0101"),
            ("zipCode", "78746"),
            ("service", "hardscaping"),
            ("timeframe", "asap"),
            ("message", "Flagstone patio."),
        ])
        .send()
        .await?;
    assert_eq!(valid.status().as_u16(), 200);
    assert!(valid.text().await?.contains("Thank You!"));
    Ok(())
}
