use crate::config::toml_config::CmsConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Named GROQ parameters, e.g. `slug` for `$slug`.
pub type QueryParams = BTreeMap<String, serde_json::Value>;

/// Raw read access to the CMS. Implementations return the query's `result`
/// member verbatim, `Value::Null` included.
#[async_trait]
pub trait CmsTransport: Send + Sync {
    async fn query(&self, groq: &str, params: &QueryParams) -> Result<serde_json::Value>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn cms(&self) -> &CmsConfig;
    fn site_url_override(&self) -> Option<&str>;
    fn revalidate_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn submit_delay(&self) -> Duration;
}
