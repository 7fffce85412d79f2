//! Centralized error handling for RuNeDiag
//!
//! All fallible operations in the crate return [`Result`], with drawing backend
//! failures flattened into [`RuNeDiagError::Plot`] so callers do not need to
//! name plotters' generic error types.

use plotters::drawing::DrawingAreaErrorKind;
use std::fmt;

/// Main error type for RuNeDiag operations
#[derive(Debug)]
pub enum RuNeDiagError {
    /// I/O operation errors (output directories, colormap and coastline files)
    IoError(std::io::Error),

    /// JSON decoding errors for jobs, parameters and metrics
    JsonError(serde_json::Error),

    /// Drawing backend errors
    Plot(String),

    /// Field data and coordinate axes disagree in length
    ShapeMismatch { field: String, message: String },

    /// `var_region` names neither hemisphere
    InvalidRegion { region: String },

    /// Colormap could not be resolved or parsed
    Colormap { name: String, message: String },

    /// Output format the rendering backends cannot produce
    UnsupportedFormat { format: String },

    /// A plot parameter is out of range
    InvalidParameter { name: String, message: String },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Generic error
    Generic(String),
}

impl fmt::Display for RuNeDiagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuNeDiagError::IoError(e) => write!(f, "I/O error: {}", e),
            RuNeDiagError::JsonError(e) => write!(f, "JSON error: {}", e),
            RuNeDiagError::Plot(msg) => write!(f, "Plot error: {}", msg),
            RuNeDiagError::ShapeMismatch { field, message } => {
                write!(f, "Shape mismatch in field '{}': {}", field, message)
            }
            RuNeDiagError::InvalidRegion { region } => write!(
                f,
                "Region '{}' does not name a pole (expected 'N' or 'S' in the region name)",
                region
            ),
            RuNeDiagError::Colormap { name, message } => {
                write!(f, "Colormap '{}': {}", name, message)
            }
            RuNeDiagError::UnsupportedFormat { format } => {
                write!(f, "Unsupported output format '{}' (expected png or svg)", format)
            }
            RuNeDiagError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter '{}': {}", name, message)
            }
            RuNeDiagError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            RuNeDiagError::ArrayError(e) => write!(f, "Array error: {}", e),
            RuNeDiagError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RuNeDiagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuNeDiagError::IoError(e) => Some(e),
            RuNeDiagError::JsonError(e) => Some(e),
            RuNeDiagError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RuNeDiagError {
    fn from(error: std::io::Error) -> Self {
        RuNeDiagError::IoError(error)
    }
}

impl From<serde_json::Error> for RuNeDiagError {
    fn from(error: serde_json::Error) -> Self {
        RuNeDiagError::JsonError(error)
    }
}

impl From<ndarray::ShapeError> for RuNeDiagError {
    fn from(error: ndarray::ShapeError) -> Self {
        RuNeDiagError::ArrayError(error)
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for RuNeDiagError
where
    E: std::error::Error + Send + Sync,
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        RuNeDiagError::Plot(error.to_string())
    }
}

impl From<String> for RuNeDiagError {
    fn from(error: String) -> Self {
        RuNeDiagError::Generic(error)
    }
}

impl From<&str> for RuNeDiagError {
    fn from(error: &str) -> Self {
        RuNeDiagError::Generic(error.to_string())
    }
}

/// Result type alias for RuNeDiag operations
pub type Result<T> = std::result::Result<T, RuNeDiagError>;
