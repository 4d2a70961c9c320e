use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the marketplace accepts. Products default to INR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        })
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            other => Err(format!("unsupported currency {other:?}")),
        }
    }
}

/// An amount in major units (rupees, dollars).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: Currency,
}

impl Price {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Amount in minor units (paise, cents) as payment gateways expect it.
    pub fn to_minor_units(&self) -> u64 {
        (self.amount * 100.0).round().max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_wire_format() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!("INR".parse::<Currency>().unwrap(), Currency::Inr);
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn minor_units_round_to_nearest() {
        assert_eq!(Price::new(499.99, Currency::Inr).to_minor_units(), 49_999);
        assert_eq!(Price::new(0.1 + 0.2, Currency::Usd).to_minor_units(), 30);
    }
}
