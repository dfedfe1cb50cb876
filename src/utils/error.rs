use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("CMS request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CMS returned HTTP {status}: {body}")]
    CmsStatusError { status: u16, body: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Static content error in {source_name}: {message}")]
    ContentError {
        source_name: String,
        message: String,
    },

    #[error("No city metadata for \"{city}\"; add it to content/locations.toml")]
    MissingCityMeta { city: String },

    #[error("Page not found: {path}")]
    NotFound { path: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Content,
    Routing,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ApiError(_) | SiteError::CmsStatusError { .. } => ErrorCategory::Network,
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SiteError::SerializationError(_)
            | SiteError::ContentError { .. }
            | SiteError::MissingCityMeta { .. } => ErrorCategory::Content,
            SiteError::NotFound { .. } => ErrorCategory::Routing,
            SiteError::ValidationError { .. } => ErrorCategory::Input,
            SiteError::IoError(_) | SiteError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::NotFound { .. } | SiteError::ValidationError { .. } => ErrorSeverity::Low,
            // CMS trouble always degrades to fallback content.
            SiteError::ApiError(_)
            | SiteError::CmsStatusError { .. }
            | SiteError::SerializationError(_) => ErrorSeverity::Medium,
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            SiteError::ContentError { .. }
            | SiteError::MissingCityMeta { .. }
            | SiteError::IoError(_)
            | SiteError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SiteError::ApiError(_) | SiteError::CmsStatusError { .. } => {
                "Check SANITY_PROJECT_ID, the dataset name and network access; pages keep serving fallback content meanwhile".to_string()
            }
            SiteError::SerializationError(_) => {
                "The CMS document shape does not match the expected query projection".to_string()
            }
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or environment variables and restart".to_string()
            }
            SiteError::ContentError { source_name, .. } => {
                format!("Fix the syntax of {} and rebuild", source_name)
            }
            SiteError::MissingCityMeta { city } => {
                format!("Add a [\"{}\"] table to content/locations.toml", city)
            }
            SiteError::NotFound { .. } => "Check the URL".to_string(),
            SiteError::ValidationError { .. } => "Correct the highlighted fields".to_string(),
            SiteError::IoError(_) | SiteError::ZipError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => "Content service is unreachable".to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Content => format!("Site content is invalid: {}", self),
            ErrorCategory::Routing => "The page you requested does not exist".to_string(),
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
