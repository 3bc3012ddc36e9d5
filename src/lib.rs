//! # vies
//!
//! Async client for the EU [VIES](https://ec.europa.eu/taxation_customs/vies/)
//! VAT number validation service, speaking its SOAP `checkVat` operation.
//!
//! One lookup is one HTTPS round trip: input is validated locally, the
//! SOAP envelope is rendered with proper XML escaping, and the reply is
//! parsed into a typed [`VatCheckResult`] or a classified [`ViesError`].
//! Nothing is retried, cached, or persisted — the only process-wide data
//! is the read-only EU country table.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vies::check_vat;
//!
//! // One-shot (async, requires network)
//! let result = check_vat("DE", "123456789").await?;
//! println!("valid: {}, name: {}", result.valid, result.name);
//!
//! // Reusable client with a custom timeout
//! let client = vies::ViesClient::builder()
//!     .timeout(std::time::Duration::from_secs(5))
//!     .build()?;
//! let result = client.check_vat("el", "123456789").await?;
//! ```
//!
//! Greece is queried as "EL", never "GR" — see [`countries::EU_VAT_COUNTRIES`]
//! for the full set VIES accepts.

pub mod countries;

mod client;
mod envelope;
mod error;

pub use client::{VatCheckResult, VatQuery, ViesClient, ViesClientBuilder, check_vat};
pub use error::ViesError;
