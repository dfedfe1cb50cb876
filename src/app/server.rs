//! HTTP delivery. Pages render on first request and are then served from
//! a per-path cache until the revalidation window lapses.

use crate::app::contact::{ContactDesk, ContactSubmission};
use crate::app::views;
use crate::core::{Route, Site};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use axum::extract::{Form, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use moka::future::Cache;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const MAX_CACHED_PAGES: u64 = 1_024;

#[derive(Clone)]
pub struct AppState {
    site: Site,
    pages: Cache<String, String>,
    contact: ContactDesk,
}

impl AppState {
    pub fn new(site: Site, revalidate: Duration, submit_delay: Duration) -> Self {
        let pages = Cache::builder()
            .max_capacity(MAX_CACHED_PAGES)
            .time_to_live(revalidate)
            .build();
        Self {
            site,
            pages,
            contact: ContactDesk::new(submit_delay),
        }
    }

    pub fn from_config(site: Site, config: &impl ConfigProvider) -> Self {
        Self::new(
            site,
            Duration::from_secs(config.revalidate_seconds()),
            config.submit_delay(),
        )
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    fn not_found(&self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Html(views::render_not_found(&self.site.catalog().business)),
        )
            .into_response()
    }

    async fn render(&self, path: &str) -> Response {
        let Some(route) = Route::parse(path) else {
            tracing::debug!("No route for {}", path);
            return self.not_found();
        };

        let key = route.path();
        if let Some(html) = self.pages.get(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Html(html).into_response();
        }

        match self.site.resolve(&route).await {
            Ok(page) => {
                let html = views::render_page(&page);
                self.pages.insert(key, html.clone()).await;
                Html(html).into_response()
            }
            Err(SiteError::NotFound { path }) => {
                tracing::debug!("Not found: {}", path);
                self.not_found()
            }
            Err(e) => {
                tracing::error!("Failed to render {}: {}", key, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::render_not_found(&self.site.catalog().business)),
                )
                    .into_response()
            }
        }
    }
}

async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    state.render(uri.path()).await
}

async fn healthz_handler() -> &'static str {
    "ok"
}

async fn contact_submit_handler(
    State(state): State<AppState>,
    Form(submission): Form<ContactSubmission>,
) -> Response {
    let page = match state.site.resolve(&Route::Contact).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Failed to resolve contact page: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let errors = submission.field_errors(&state.site.catalog().service_slugs());
    if !errors.is_empty() {
        tracing::debug!("Contact form rejected with {} field errors", errors.len());
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::render_contact_errors(&page, &submission, &errors)),
        )
            .into_response();
    }

    let receipt = state.contact.submit(&submission).await;
    Html(views::render_thank_you(&page, &receipt)).into_response()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/contact", get(page_handler).post(contact_submit_handler))
        .fallback(get(page_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until the listener fails or ctrl-c is received.
pub async fn run(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(SiteError::IoError)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
