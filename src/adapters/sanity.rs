use crate::config::toml_config::CmsConfig;
use crate::domain::ports::{CmsTransport, QueryParams};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const MAX_ERROR_BODY: usize = 512;

/// Read-only client for the Sanity HTTP query API.
#[derive(Debug, Clone)]
pub struct SanityClient {
    client: Client,
    query_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    ms: Option<u64>,
}

impl SanityClient {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("outdoor-reno-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            query_url: config.query_url(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

#[async_trait]
impl CmsTransport for SanityClient {
    async fn query(&self, groq: &str, params: &QueryParams) -> Result<Value> {
        let mut pairs = vec![("query".to_string(), groq.to_string())];
        for (name, value) in params {
            // GROQ parameters travel as JSON literals: $slug="hardscaping"
            pairs.push((format!("${}", name), serde_json::to_string(value)?));
        }

        tracing::debug!("CMS query to {} ({} params)", self.query_url, params.len());

        let mut request = self.client.get(&self.query_url).query(&pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("CMS response status: {}", status);

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(SiteError::CmsStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: QueryEnvelope = response.json().await?;
        if let Some(ms) = envelope.ms {
            tracing::debug!("CMS query took {}ms server-side", ms);
        }
        Ok(envelope.result)
    }
}
