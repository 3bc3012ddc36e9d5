//! Async VIES client for the SOAP `checkVat` operation.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::countries::is_eu_vat_country;
use crate::envelope::{self, RawCheckVat};
use crate::error::ViesError;

const VIES_URL: &str = "https://ec.europa.eu/taxation_customs/vies/services/checkVatService";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const CLIENT_USER_AGENT: &str = concat!("vies/", env!("CARGO_PKG_VERSION"));

/// A normalized, validated VAT lookup query.
///
/// Construction uppercases the country code and trims the VAT number;
/// invalid input is rejected here, before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatQuery {
    country_code: String,
    vat_number: String,
}

impl VatQuery {
    /// Build a query from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`ViesError::InvalidInput`] if the country code is not one
    /// VIES accepts (see [`crate::countries::EU_VAT_COUNTRIES`]) or the
    /// VAT number is empty.
    pub fn new(country_code: &str, vat_number: &str) -> Result<Self, ViesError> {
        let country_code = country_code.trim().to_uppercase();
        if !is_eu_vat_country(&country_code) {
            return Err(ViesError::InvalidInput(format!(
                "unsupported country code '{country_code}'"
            )));
        }
        let vat_number = vat_number.trim();
        if vat_number.is_empty() {
            return Err(ViesError::InvalidInput(
                "VAT number must not be empty".into(),
            ));
        }
        Ok(Self {
            country_code,
            vat_number: vat_number.to_string(),
        })
    }

    /// The uppercased 2-letter country code ("EL" for Greece).
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// The VAT number without country prefix.
    pub fn vat_number(&self) -> &str {
        &self.vat_number
    }
}

/// Result of a VIES VAT number check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatCheckResult {
    /// Country code as confirmed by VIES.
    pub country_code: String,
    /// VAT number as confirmed by VIES.
    pub vat_number: String,
    /// Whether the VAT number is currently valid.
    pub valid: bool,
    /// Registered company name; empty when the member state withholds it.
    pub name: String,
    /// Registered address; empty when the member state withholds it.
    pub address: String,
    /// Date the check was performed, as reported by VIES.
    pub request_date: String,
}

/// Client for the EU VIES SOAP service.
///
/// Holds no per-lookup state — concurrent checks through one client are
/// independent. Each call makes exactly one attempt; retries are the
/// caller's decision.
#[derive(Debug, Clone)]
pub struct ViesClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

/// Builder for [`ViesClient`].
#[derive(Debug, Clone)]
pub struct ViesClientBuilder {
    endpoint: String,
    timeout: Duration,
}

impl Default for ViesClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: VIES_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ViesClientBuilder {
    /// Override the service URL, e.g. to point tests at a local mock.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Bound for the whole request/response cycle (default 10 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ViesError::Transport`] if the underlying HTTP client
    /// cannot be constructed (e.g. no TLS backend available).
    pub fn build(self) -> Result<ViesClient, ViesError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ViesError::Transport)?;
        Ok(ViesClient {
            http,
            endpoint: self.endpoint,
            timeout: self.timeout,
        })
    }
}

impl ViesClient {
    /// Create a client with the production VIES endpoint and defaults.
    pub fn new() -> Result<Self, ViesError> {
        Self::builder().build()
    }

    /// Start configuring a client.
    pub fn builder() -> ViesClientBuilder {
        ViesClientBuilder::default()
    }

    /// Check a VAT number against VIES.
    ///
    /// `country_code` is case-insensitive; `vat_number` is the number part
    /// without the country prefix. Suspends until the round trip completes,
    /// fails, or hits the configured timeout.
    ///
    /// # Errors
    ///
    /// Every failure path is classified — see [`ViesError`].
    pub async fn check_vat(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<VatCheckResult, ViesError> {
        let query = VatQuery::new(country_code, vat_number)?;
        self.check(&query).await
    }

    /// Like [`check_vat`](Self::check_vat) with a per-call timeout
    /// overriding the client-wide one.
    pub async fn check_vat_with_timeout(
        &self,
        country_code: &str,
        vat_number: &str,
        timeout: Duration,
    ) -> Result<VatCheckResult, ViesError> {
        let query = VatQuery::new(country_code, vat_number)?;
        self.send(&query, timeout).await
    }

    /// Check a pre-validated query.
    pub async fn check(&self, query: &VatQuery) -> Result<VatCheckResult, ViesError> {
        self.send(query, self.timeout).await
    }

    async fn send(&self, query: &VatQuery, timeout: Duration) -> Result<VatCheckResult, ViesError> {
        let body = envelope::build_check_vat(query.country_code(), query.vat_number());

        // Content-Length is derived from the sized body by the HTTP layer.
        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header("SOAPAction", "")
            .body(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport(e, timeout))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| transport(e, timeout))?;

        if status.is_client_error() || status.is_server_error() {
            return Err(ViesError::Http(status.as_u16()));
        }

        interpret(envelope::scan_check_vat(&text)?)
    }
}

/// One-shot check with a default client against the production endpoint.
///
/// Convenience for callers that do not need to reuse a [`ViesClient`].
///
/// # Errors
///
/// See [`ViesClient::check_vat`].
pub async fn check_vat(country_code: &str, vat_number: &str) -> Result<VatCheckResult, ViesError> {
    ViesClient::new()?.check_vat(country_code, vat_number).await
}

fn transport(e: reqwest::Error, timeout: Duration) -> ViesError {
    if e.is_timeout() {
        ViesError::Timeout(timeout)
    } else {
        ViesError::Transport(e)
    }
}

/// Classify a scanned reply into a result or a shape error.
///
/// Absent response node or absent `valid` means the reply is unusable
/// ([`ViesError::InvalidResponse`]); fields present but ill-typed mean
/// [`ViesError::MalformedResponse`]. A result is only produced when
/// `valid` is a well-typed boolean and `countryCode` a non-empty string.
fn interpret(raw: RawCheckVat) -> Result<VatCheckResult, ViesError> {
    if let Some(fault) = raw.fault {
        return Err(ViesError::InvalidResponse(format!("SOAP fault: {fault}")));
    }
    if !raw.saw_response {
        return Err(ViesError::InvalidResponse(
            "missing checkVatResponse element".into(),
        ));
    }
    let Some(valid_text) = raw.valid else {
        return Err(ViesError::InvalidResponse("missing 'valid' field".into()));
    };
    let valid = match valid_text.trim() {
        "true" => true,
        "false" => false,
        other => {
            return Err(ViesError::MalformedResponse(format!(
                "'valid' is not a boolean: '{other}'"
            )));
        }
    };
    let country_code = match raw.country_code {
        Some(cc) if !cc.is_empty() => cc,
        _ => {
            return Err(ViesError::MalformedResponse(
                "missing or empty 'countryCode'".into(),
            ));
        }
    };
    let Some(vat_number) = raw.vat_number else {
        return Err(ViesError::MalformedResponse("missing 'vatNumber'".into()));
    };

    Ok(VatCheckResult {
        country_code,
        vat_number,
        valid,
        name: clean_optional(raw.name),
        address: clean_optional(raw.address),
        request_date: raw.request_date.unwrap_or_default(),
    })
}

/// Trim an optional field; VIES reports withheld values as "---".
fn clean_optional(value: Option<String>) -> String {
    match value {
        Some(s) => {
            let t = s.trim();
            if t == "---" { String::new() } else { t.to_string() }
        }
        None => String::new(),
    }
}
