//! EU member state codes accepted by VIES.
//!
//! VIES uses ISO 3166-1 alpha-2 codes with one exception: Greece is
//! queried as "EL", not "GR".

/// Check whether `code` is a country code VIES will accept.
/// Matching is exact — callers normalize to uppercase first.
pub fn is_eu_vat_country(code: &str) -> bool {
    EU_VAT_COUNTRIES.binary_search(&code).is_ok()
}

/// The 27 country codes VIES accepts (sorted for binary search).
pub static EU_VAT_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "HR", "HU", "IE", "IT",
    "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];
