/// Error types for measurement and layout operations
use thiserror::Error;

/// Result type alias for measurement operations
pub type MeasureResult<T> = Result<T, MeasureError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeasureError {
    /// No usable (non-origin) vertex was supplied
    #[error("insufficient data: no non-degenerate vertex to measure")]
    InsufficientData,

    /// An endpoint or its projection is not a finite number
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Geometry file could not be decoded
    #[error("parse error: {0}")]
    Parse(String),
}

impl MeasureError {
    pub fn degenerate(details: impl Into<String>) -> Self {
        Self::DegenerateInput(details.into())
    }

    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }

    pub fn parse(details: impl Into<String>) -> Self {
        Self::Parse(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeasureError::InsufficientData;
        assert!(err.to_string().contains("non-degenerate"));

        let err = MeasureError::degenerate("end one is NaN");
        assert!(err.to_string().contains("end one is NaN"));

        let err = MeasureError::invalid_params("negative width");
        assert!(err.to_string().starts_with("invalid parameters"));
    }
}
