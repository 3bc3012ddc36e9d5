//! SOAP 1.1 wire format for the VIES `checkVat` operation.
//!
//! The request envelope is rendered with XML-escaped field values, and the
//! response is scanned with a streaming reader, namespace prefixes stripped.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

use crate::error::ViesError;

const CHECK_VAT_NS: &str = "urn:ec.europa.eu:taxud:vies:services:checkVat:types";

/// Render the `checkVat` request envelope.
///
/// `country_code` and `vat_number` are escaped, so reserved XML
/// characters in caller input cannot break out of their elements.
pub(crate) fn build_check_vat(country_code: &str, vat_number: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <checkVat xmlns="{CHECK_VAT_NS}">
      <countryCode>{}</countryCode>
      <vatNumber>{}</vatNumber>
    </checkVat>
  </soap:Body>
</soap:Envelope>"#,
        escape(country_code),
        escape(vat_number),
    )
}

/// Raw field-level view of a `checkVatResponse`, before any shape
/// classification. `Some("")` means the element was present but empty.
#[derive(Debug, Default)]
pub(crate) struct RawCheckVat {
    pub saw_response: bool,
    pub country_code: Option<String>,
    pub vat_number: Option<String>,
    /// Lexical text of the `valid` element, unparsed.
    pub valid: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub request_date: Option<String>,
    /// `faultstring` of a SOAP fault, if the reply carried one.
    pub fault: Option<String>,
}

fn local_name(qname: &[u8]) -> String {
    let name = std::str::from_utf8(qname).unwrap_or("");
    name.rsplit(':').next().unwrap_or(name).to_string()
}

/// Scan a VIES reply for the `checkVatResponse` fields.
///
/// Only collects — absent fields stay `None`; deciding what absence or a
/// bad lexical value means is the caller's job.
pub(crate) fn scan_check_vat(xml: &str) -> Result<RawCheckVat, ViesError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut raw = RawCheckVat::default();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "checkVatResponse" {
                    raw.saw_response = true;
                } else if path.last().is_some_and(|p| p == "checkVatResponse") {
                    // Mark the field present; text events fill it in.
                    if let Some(field) = raw.field_mut(&name) {
                        field.get_or_insert_with(String::new);
                    }
                }
                path.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "checkVatResponse" {
                    raw.saw_response = true;
                } else if path.last().is_some_and(|p| p == "checkVatResponse") {
                    if let Some(field) = raw.field_mut(&name) {
                        field.get_or_insert_with(String::new);
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default();
                if text.is_empty() {
                    continue;
                }
                match path.last().map(String::as_str) {
                    Some("faultstring") => {
                        raw.fault.get_or_insert_with(String::new).push_str(&text);
                    }
                    Some(name)
                        if path.len() >= 2 && path[path.len() - 2] == "checkVatResponse" =>
                    {
                        if let Some(field) = raw.field_mut(name) {
                            field.get_or_insert_with(String::new).push_str(&text);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ViesError::InvalidResponse(format!(
                    "failed to parse XML: {e}"
                )));
            }
        }
    }

    Ok(raw)
}

impl RawCheckVat {
    fn field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "countryCode" => Some(&mut self.country_code),
            "vatNumber" => Some(&mut self.vat_number),
            "valid" => Some(&mut self.valid),
            "name" => Some(&mut self.name),
            "address" => Some(&mut self.address),
            "requestDate" => Some(&mut self.request_date),
            _ => None,
        }
    }
}
