use std::fmt::{Display, Formatter, Result as FmtResult};

/// Root error type for the chart pipeline and its fetch collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// A series with no samples reached a computation that needs at least one
    EmptySeries,
    /// A channel of the raw payload does not line up with `t`
    LengthMismatch { channel: &'static str, expected: usize, actual: usize },
    InvalidTimestamp { index: usize, value: i64 },
    /// Axis bounds that are NaN or infinite
    InvalidRange { min: f64, max: f64 },
    /// Percent change against a zero reference
    DivisionByZero,
    NonFiniteValue { name: &'static str, value: f64 },
    Fetch(FetchError),
}

/// Errors raised by the benchmark HTTP client
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    Request(String),
    HttpStatus { status: u16, status_text: String },
    MalformedPayload(String),
    NoData(String),
    Api(String),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ChartError::EmptySeries => write!(f, "Series is empty"),
            ChartError::LengthMismatch { channel, expected, actual } => write!(
                f,
                "Channel '{}' has {} samples, expected {}",
                channel, actual, expected
            ),
            ChartError::InvalidTimestamp { index, value } => {
                write!(f, "Invalid timestamp {} at index {}", value, index)
            }
            ChartError::InvalidRange { min, max } => {
                write!(f, "Invalid range [{}, {}]: bounds must be finite", min, max)
            }
            ChartError::DivisionByZero => write!(f, "Reference value is zero"),
            ChartError::NonFiniteValue { name, value } => {
                write!(f, "{} must be finite, got {}", name, value)
            }
            ChartError::Fetch(e) => write!(f, "Fetch Error: {}", e),
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FetchError::Request(msg) => write!(f, "Request failed: {}", msg),
            FetchError::HttpStatus { status, status_text } => {
                write!(f, "HTTP error: {} - {}", status, status_text)
            }
            FetchError::MalformedPayload(msg) => write!(f, "Malformed payload: {}", msg),
            FetchError::NoData(symbol) => write!(f, "No data for {}", symbol),
            FetchError::Api(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {}
impl std::error::Error for FetchError {}

impl From<FetchError> for ChartError {
    fn from(error: FetchError) -> Self {
        ChartError::Fetch(error)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::MalformedPayload(error.to_string())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_wrap_into_chart_errors() {
        let err: ChartError =
            FetchError::HttpStatus { status: 404, status_text: "Not Found".to_string() }.into();
        assert_eq!(err.to_string(), "Fetch Error: HTTP error: 404 - Not Found");
    }

    #[test]
    fn mismatch_names_the_channel() {
        let err = ChartError::LengthMismatch { channel: "c", expected: 3, actual: 2 };
        assert_eq!(err.to_string(), "Channel 'c' has 2 samples, expected 3");
    }
}
