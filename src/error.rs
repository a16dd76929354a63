use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON document: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write duty log CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("{kind} with id '{id}' does not exist")]
    EntityNotFound { kind: &'static str, id: String },

    #[error("{kind} '{key}' is already registered")]
    DuplicateEntity { kind: &'static str, key: String },

    #[error("Failed to fetch route: {0}")]
    RoutingUnavailable(String),

    #[error("Driver has reached the {limit}-hour limit for {window_days} days")]
    InsufficientHours { limit: f64, window_days: i64 },

    #[error("Trip duration of {required:.2} h exceeds the {available:.2} available hours")]
    DurationExceedsAvailability { required: f64, available: f64 },

    #[error("Invalid leg: {0}")]
    InvalidLeg(String),

    #[error("Invalid rule constants: {0}")]
    InvalidRuleConstants(String),
}

pub type Result<T> = std::result::Result<T, Error>;
