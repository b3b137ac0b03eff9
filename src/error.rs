use thiserror::Error;

use crate::workflow::WizardStep;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Wizard input or transition rejected
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
    /// Remote service call failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    /// File operation failed
    #[error("File error: {0}")]
    File(#[from] FileError),
    /// Configuration is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Wizard errors
///
/// None of these change wizard state; the caller decides whether the user
/// sees them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// No subject was selected before moving on to marks entry
    #[error("Please select at least one subject.")]
    NoSubjectsSelected,
    /// Branch is not part of the catalog
    #[error("unknown branch: {0}")]
    UnknownBranch(String),
    /// The catalog has no branches (single-catalog variant)
    #[error("this catalog has no branches")]
    NoBranches,
    /// Subject is not part of the active subject list
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
    /// Requested step is not reachable from the current step
    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: WizardStep, to: WizardStep },
    /// Operation is not valid in the current step
    #[error("not allowed in step {0}")]
    WrongStep(WizardStep),
    /// Result card index out of range
    #[error("result card {index} does not exist ({total} cards)")]
    UnknownCard { index: usize, total: usize },
    /// A roadmap for this card is already in flight
    #[error("roadmap for card {0} is already loading")]
    RoadmapInFlight(usize),
}

/// API call errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network request failed
    #[error("request to {endpoint} failed: {source}")]
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Non-success HTTP status
    #[error("{endpoint} returned HTTP {status}{}", detail(.message))]
    BadStatus {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// Body is not JSON
    #[error("{endpoint} returned invalid JSON: {source}")]
    JsonParseFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Body is JSON but not the expected shape
    #[error("{endpoint} returned an unexpected response: expected {expected}")]
    UnexpectedShape {
        endpoint: String,
        expected: &'static str,
    },
}

/// File operation errors
#[derive(Debug, Error)]
pub enum FileError {
    /// File does not exist
    #[error("file not found: {path}")]
    NotFound { path: String },
    /// Reading failed
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Writing failed
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML parsing failed
    #[error("failed to parse TOML ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Catalog file parsed but is not a usable catalog
    #[error("invalid catalog ({path}): {reason}")]
    InvalidCatalog { path: String, reason: String },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable could not be parsed
    #[error("environment variable {var_name}: value '{value}' is not a valid {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// A base URL is empty or not http(s)
    #[error("invalid base URL for {field}: '{value}'")]
    InvalidBaseUrl { field: String, value: String },
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

// ========== Convenience constructors ==========

impl ApiError {
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    pub fn json_parse_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    pub fn unexpected_shape(endpoint: impl Into<String>, expected: &'static str) -> Self {
        ApiError::UnexpectedShape {
            endpoint: endpoint.into(),
            expected,
        }
    }
}

impl FileError {
    pub fn read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn invalid_catalog(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FileError::InvalidCatalog {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
