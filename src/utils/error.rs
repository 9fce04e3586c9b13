use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Product source fetch failed: {message}")]
    SourceFetchError { message: String },

    #[error("Product {id} is not in the catalog")]
    ProductNotFound { id: u32 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Render context is closed")]
    RenderClosed,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Source,
    Configuration,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShopError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn source_fetch(message: impl Into<String>) -> Self {
        Self::SourceFetchError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::ProductNotFound { .. } => ErrorCategory::Input,
            Self::SourceFetchError { .. } | Self::HttpError(_) | Self::SerializationError(_) => {
                ErrorCategory::Source
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::RenderClosed | Self::IoError(_) | Self::TaskError(_) => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Source => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Provide a non-empty name and a non-negative price.",
            Self::ProductNotFound { .. } => "Select a product from the current catalog first.",
            Self::SourceFetchError { .. } | Self::HttpError(_) => {
                "Check that the product source is reachable, then reload."
            }
            Self::SerializationError(_) => {
                "Make sure the source returns a JSON array of {id, name, price} objects."
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file or CLI flags.",
            Self::IoError(_) => "Check file paths and permissions.",
            Self::RenderClosed | Self::TaskError(_) => "Restart the application.",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::ProductNotFound { .. } => "Select a product first.".to_string(),
            Self::SourceFetchError { message } => format!("Could not load products: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
