use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GitHub GraphQL API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Pagination stopped: hasNextPage is set but endCursor is missing")]
    Pagination,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GH_PROJECTS_TOKEN (or GITHUB_TOKEN) or add token to the config file"
    )]
    MissingToken,

    #[error("Organization not specified. Pass --org, set GH_ORGANIZATION_NAME or add organization to the config file")]
    MissingOrganization,

    #[error("Project number not specified. Pass --project, set GH_PROJECT_NUMBER or add project_number to the config file")]
    MissingProjectNumber,

    #[error("Invalid project number: {0}")]
    InvalidProjectNumber(String),

    #[error("Lookback of {0} days reaches before the earliest representable date")]
    InvalidDays(u32),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Project {number} not found in organization {org}")]
    ProjectNotFound { org: String, number: u32 },

    #[error("Project field not found: {0}")]
    FieldNotFound(String),

    #[error("Field {0} is not a single-select field")]
    NotSingleSelect(String),

    #[error("Field {0} is not a number field")]
    NotNumber(String),

    #[error("Option {option:?} of field {field} does not start with a digit")]
    InvalidOptionRank { field: String, option: String },
}

pub type Result<T> = std::result::Result<T, SyncError>;
