use std::fmt;

/// Errors surfaced by the optimizer and its I/O collaborators.
#[derive(Debug)]
pub enum GaError {
    /// Caller error: an operator or run precondition does not hold.
    InvalidInput(String),
    /// A configuration value is out of its allowed range.
    Config(String),
    /// The instance file is structurally invalid.
    Instance(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

pub type GaResult<T> = Result<T, GaError>;

impl fmt::Display for GaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            GaError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            GaError::Instance(msg) => write!(f, "invalid instance: {msg}"),
            GaError::Io(err) => write!(f, "io error: {err}"),
            GaError::Csv(err) => write!(f, "csv error: {err}"),
            GaError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for GaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GaError::Io(err) => Some(err),
            GaError::Csv(err) => Some(err),
            GaError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GaError {
    fn from(value: std::io::Error) -> Self {
        GaError::Io(value)
    }
}

impl From<csv::Error> for GaError {
    fn from(value: csv::Error) -> Self {
        GaError::Csv(value)
    }
}

impl From<serde_json::Error> for GaError {
    fn from(value: serde_json::Error) -> Self {
        GaError::Json(value)
    }
}
