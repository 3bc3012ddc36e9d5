use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a VIES VAT check.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ViesError {
    /// Unsupported country code or empty VAT number.
    /// Detected before any network call is made.
    #[error("invalid VAT input: {0}")]
    InvalidInput(String),

    /// VIES responded with an error HTTP status.
    #[error("VIES service returned HTTP {0}")]
    Http(u16),

    /// The response could not be used: XML unparseable, a SOAP fault,
    /// or the `checkVatResponse` element / its `valid` field absent.
    #[error("invalid VIES response: {0}")]
    InvalidResponse(String),

    /// The response had the right shape but wrong field types.
    #[error("malformed VIES response: {0}")]
    MalformedResponse(String),

    /// No response within the configured duration; the in-flight
    /// request was aborted.
    #[error("VIES request timed out after {0:?}")]
    Timeout(Duration),

    /// Low-level network failure (DNS, connection reset, TLS).
    #[error("VIES transport error: {0}")]
    Transport(#[source] reqwest::Error),
}
