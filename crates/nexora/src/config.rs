//! Process configuration, read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `NEXORA_PORT` | `3000` |
//! | `JWT_SECRET_KEY` | required |
//! | `TOKEN_TTL_SECS` | `86400` |
//! | `ACTOR_BUFFER` | `32` |
//! | `RAZORPAY_KEY_ID` + `RAZORPAY_KEY_SECRET` | unset: sandbox gateway |
//! | `IMAGEKIT_PRIVATE_KEY` | unset: in-memory image store |

use std::env;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Secret the sandbox gateway's checkout signatures are made with.
pub const SANDBOX_KEY_SECRET: &str = "nexora_sandbox_secret";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET must be set together")]
    PartialGatewayKeys,
}

#[derive(Clone, PartialEq)]
pub struct RazorpayKeys {
    pub key_id: String,
    pub key_secret: String,
}

impl fmt::Debug for RazorpayKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayKeys")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub actor_buffer: usize,
    pub razorpay: Option<RazorpayKeys>,
    pub imagekit_private_key: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("token_ttl", &self.token_ttl)
            .field("actor_buffer", &self.actor_buffer)
            .field("razorpay", &self.razorpay)
            .field("imagekit", &self.imagekit_private_key.is_some())
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("JWT_SECRET_KEY").ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;
        let port: u16 = try_load(&var, "NEXORA_PORT", "3000")?;
        let ttl_secs: u64 = try_load(&var, "TOKEN_TTL_SECS", "86400")?;
        let actor_buffer: usize = try_load(&var, "ACTOR_BUFFER", "32")?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "ACTOR_BUFFER",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        let razorpay = match (var("RAZORPAY_KEY_ID"), var("RAZORPAY_KEY_SECRET")) {
            (Some(key_id), Some(key_secret)) => Some(RazorpayKeys { key_id, key_secret }),
            (None, None) => {
                warn!("Razorpay keys not set, using the sandbox gateway");
                None
            }
            _ => return Err(ConfigError::PartialGatewayKeys),
        };

        let imagekit_private_key = var("IMAGEKIT_PRIVATE_KEY");
        if imagekit_private_key.is_none() {
            warn!("IMAGEKIT_PRIVATE_KEY not set, product images stay in memory");
        }

        Ok(Self {
            port,
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            actor_buffer,
            razorpay,
            imagekit_private_key,
        })
    }

    /// Secret used to check checkout signatures for the configured gateway.
    pub fn gateway_secret(&self) -> &str {
        self.razorpay
            .as_ref()
            .map_or(SANDBOX_KEY_SECRET, |keys| keys.key_secret.as_str())
    }
}

fn try_load<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = Config::from_lookup(lookup(&[("JWT_SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.actor_buffer, 32);
        assert!(config.razorpay.is_none());
        assert!(config.imagekit_private_key.is_none());
        assert_eq!(config.gateway_secret(), SANDBOX_KEY_SECRET);
    }

    #[test]
    fn jwt_secret_is_required() {
        let err = Config::from_lookup(lookup(&[("NEXORA_PORT", "8080")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET_KEY"));

        let blank = Config::from_lookup(lookup(&[("JWT_SECRET_KEY", "  ")])).unwrap_err();
        assert_eq!(blank, ConfigError::Missing("JWT_SECRET_KEY"));
    }

    #[test]
    fn bad_numbers_are_errors() {
        let err = Config::from_lookup(lookup(&[
            ("JWT_SECRET_KEY", "s"),
            ("NEXORA_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "NEXORA_PORT", .. }));

        let err = Config::from_lookup(lookup(&[("JWT_SECRET_KEY", "s"), ("ACTOR_BUFFER", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ACTOR_BUFFER", .. }));
    }

    #[test]
    fn gateway_keys_come_in_pairs() {
        let err = Config::from_lookup(lookup(&[
            ("JWT_SECRET_KEY", "s"),
            ("RAZORPAY_KEY_ID", "rzp_test_1"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::PartialGatewayKeys);

        let config = Config::from_lookup(lookup(&[
            ("JWT_SECRET_KEY", "s"),
            ("RAZORPAY_KEY_ID", "rzp_test_1"),
            ("RAZORPAY_KEY_SECRET", "rzp_secret"),
        ]))
        .unwrap();
        assert_eq!(config.gateway_secret(), "rzp_secret");
        assert!(!format!("{config:?}").contains("rzp_secret"));
    }
}
