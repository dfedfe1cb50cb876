use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const PROJECT_ID_ENV: &str = "SANITY_PROJECT_ID";
pub const DATASET_ENV: &str = "SANITY_DATASET";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSection {
    /// Overrides the site URL from content/site.toml in structured data and
    /// the sitemap.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_true")]
    pub use_cdn: bool,
    /// Replaces `https://{project_id}.api(cdn).sanity.io`.
    pub api_host: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_revalidate_seconds")]
    pub revalidate_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default)]
    pub archive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

fn default_project_id() -> String {
    CmsConfig::PLACEHOLDER_PROJECT.to_string()
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_revalidate_seconds() -> u64 {
    60
}

fn default_output_path() -> String {
    "./dist".to_string()
}

fn default_submit_delay_ms() -> u64 {
    1000
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: true,
            api_host: None,
            timeout_seconds: default_timeout_seconds(),
            token: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            revalidate_seconds: default_revalidate_seconds(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            archive: false,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

impl CmsConfig {
    pub const PLACEHOLDER_PROJECT: &'static str = "placeholder";

    /// Project id and dataset from the environment, everything else default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(project_id) = std::env::var(PROJECT_ID_ENV) {
            if !project_id.trim().is_empty() {
                config.project_id = project_id.trim().to_string();
            }
        }
        if let Ok(dataset) = std::env::var(DATASET_ENV) {
            if !dataset.trim().is_empty() {
                config.dataset = dataset.trim().to_string();
            }
        }
        config
    }

    /// True when the project id is a real value. An unresolved `${VAR}`
    /// placeholder counts as unconfigured.
    pub fn is_configured(&self) -> bool {
        let id = self.project_id.trim();
        !id.is_empty() && id != Self::PLACEHOLDER_PROJECT && !id.starts_with("${")
    }

    /// Base URL of the query endpoint, without trailing slash.
    pub fn api_base_url(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let domain = if self.use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", self.project_id, domain)
            }
        }
    }

    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.api_base_url(),
            self.api_version,
            self.dataset
        )
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Defaults plus CMS settings from the environment. Used when no config
    /// file is given.
    pub fn from_env() -> Self {
        Self {
            cms: CmsConfig::from_env(),
            ..Self::default()
        }
    }

    /// 替換環境變數 (例如 ${SANITY_PROJECT_ID})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if self.cms.is_configured() {
            let project_id_ok = self
                .cms
                .project_id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !project_id_ok {
                return Err(SiteError::InvalidConfigValueError {
                    field: "cms.project_id".to_string(),
                    value: self.cms.project_id.clone(),
                    reason: "Project ids contain only a-z, 0-9 and '-'".to_string(),
                });
            }
            validation::validate_non_empty_string("cms.dataset", &self.cms.dataset)?;
            validation::validate_non_empty_string("cms.api_version", &self.cms.api_version)?;
        }

        if let Some(host) = &self.cms.api_host {
            validation::validate_url("cms.api_host", host)?;
        }
        validation::validate_range("cms.timeout_seconds", self.cms.timeout_seconds, 1, 120)?;

        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_range(
            "server.revalidate_seconds",
            self.server.revalidate_seconds,
            1,
            86_400,
        )?;

        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_range("contact.submit_delay_ms", self.contact.submit_delay_ms, 0, 30_000)?;

        if let Some(base_url) = &self.site.base_url {
            validation::validate_url("site.base_url", base_url)?;
        }

        Ok(())
    }
}

impl ConfigProvider for SiteConfig {
    fn cms(&self) -> &CmsConfig {
        &self.cms
    }

    fn site_url_override(&self) -> Option<&str> {
        self.site.base_url.as_deref()
    }

    fn revalidate_seconds(&self) -> u64 {
        self.server.revalidate_seconds
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.contact.submit_delay_ms)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
