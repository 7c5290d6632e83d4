use thiserror::Error;

#[derive(Error, Debug)]
pub enum NearMissError {
    /// Exponent outside `3 <= n < 12`.
    #[error("exponent n={0} is out of range (expected 3 <= n < 12)")]
    InvalidExponent(i64),

    /// Upper bound not strictly greater than 10.
    #[error("bound k={0} is out of range (expected k > 10)")]
    InvalidBound(i64),

    /// Text that does not parse as an integer.
    #[error("cannot parse {field} from {input:?}: not an integer")]
    Parse { field: &'static str, input: String },

    /// Input stream ended before a valid value was entered.
    #[error("input closed while waiting for {0}")]
    InputClosed(&'static str),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV log writer failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON summary serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
