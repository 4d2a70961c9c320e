//! Request-body checks. Each function reports the first failing rule.

use super::error::ApiError;
use serde::Deserialize;
use serde_json::Value;

pub fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !s.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

pub fn is_pincode(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit())
}

/// A required, non-blank string field.
pub fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(message)),
    }
}

/// A strictly positive integer that fits a `u32`, given as a JSON number.
pub fn positive_quantity(value: Option<&Value>) -> Result<u32, ApiError> {
    value
        .and_then(Value::as_u64)
        .filter(|q| *q > 0)
        .and_then(|q| u32::try_from(q).ok())
        .ok_or_else(|| ApiError::bad_request("Quantity must be a positive integer"))
}

/// A positive amount, as a JSON number or a numeric string.
pub fn positive_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Address fields shared by the address book and order shipping.
#[derive(Debug, Default, Deserialize)]
pub struct AddressFields {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub country: Option<String>,
}

/// Validated address text, trimmed.
pub struct CheckedAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

impl AddressFields {
    pub fn check(&self) -> Result<CheckedAddress, ApiError> {
        let street = required(&self.street, "Street is required")?;
        let city = required(&self.city, "City is required")?;
        let state = required(&self.state, "State is required")?;
        let country = required(&self.country, "Country is required")?;
        let pincode = required(&self.pincode, "Pincode is required")?;
        if !is_pincode(pincode) {
            return Err(ApiError::bad_request("Pincode must be exactly 6 digits"));
        }
        Ok(CheckedAddress {
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            pincode: pincode.to_string(),
            country: country.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_shapes() {
        assert!(is_email("asha@example.com"));
        assert!(is_email("a.b+c@mail.example.in"));
        assert!(!is_email("asha.example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("asha@example"));
        assert!(!is_email("asha@@example.com"));
        assert!(!is_email("as ha@example.com"));
    }

    #[test]
    fn pincodes_are_six_digits() {
        assert!(is_pincode("411001"));
        assert!(!is_pincode("41100"));
        assert!(!is_pincode("4110011"));
        assert!(!is_pincode("41100a"));
    }

    #[test]
    fn quantities_must_be_positive_integers() {
        assert_eq!(positive_quantity(Some(&json!(3))).unwrap(), 3);
        for bad in [json!(0), json!(-1), json!(1.5), json!("2"), json!(u64::MAX)] {
            assert!(positive_quantity(Some(&bad)).is_err(), "{bad}");
        }
        assert!(positive_quantity(None).is_err());
    }

    #[test]
    fn amounts_accept_numeric_strings() {
        assert_eq!(positive_amount(&json!("200")), Some(200.0));
        assert_eq!(positive_amount(&json!(99.5)), Some(99.5));
        assert_eq!(positive_amount(&json!(0)), None);
        assert_eq!(positive_amount(&json!("abc")), None);
    }

    #[test]
    fn address_reports_first_failure() {
        let fields = AddressFields {
            street: Some("1 MG Road".into()),
            city: Some(" ".into()),
            pincode: Some("12".into()),
            ..Default::default()
        };
        assert_eq!(fields.check().err().unwrap().to_string(), "City is required");
    }
}
