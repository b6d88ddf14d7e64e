//! Messaging provider abstraction for emergency notifications.
//!
//! Credentials are read from the environment once, into an explicit
//! [`SmsConfig`] value, and injected where a provider is constructed. An
//! absent configuration is a supported state: callers fall back to the
//! simulated send path so environments without provisioned credentials
//! behave identically apart from the outcome channel.

mod twilio;

pub use twilio::TwilioSmsProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Messaging provider errors
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The provider rejected the message (bad number, auth failure, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider could not be reached (network failure or timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Credentials for the SMS provider
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Provider account identifier
    pub account_sid: String,

    /// Provider auth token
    pub auth_token: String,

    /// Sender phone number in E.164 format
    pub from_number: String,
}

impl SmsConfig {
    /// Read provider credentials from the environment.
    ///
    /// Returns `None` unless all three variables are present and non-empty,
    /// so the simulated path triggers deterministically when the provider
    /// is not provisioned.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    /// Tests pass a closure over fixed values instead of mutating the
    /// process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let account_sid = lookup("TWILIO_ACCOUNT_SID")?;
        let auth_token = lookup("TWILIO_AUTH_TOKEN")?;
        let from_number = lookup("TWILIO_FROM_NUMBER")?;

        if account_sid.trim().is_empty()
            || auth_token.trim().is_empty()
            || from_number.trim().is_empty()
        {
            return None;
        }

        Some(Self {
            account_sid,
            auth_token,
            from_number,
        })
    }
}

/// A send capability for SMS messages.
///
/// Implementations return the provider's message reference on success.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Send `body` to the `to` phone number
    async fn send(&self, to: &str, body: &str) -> Result<String, MessagingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_over(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_requires_all_variables() {
        assert!(SmsConfig::from_lookup(lookup_over(&[])).is_none());

        assert!(SmsConfig::from_lookup(lookup_over(&[("TWILIO_ACCOUNT_SID", "ACxxxx")])).is_none());

        let complete = lookup_over(&[
            ("TWILIO_ACCOUNT_SID", "ACxxxx"),
            ("TWILIO_AUTH_TOKEN", "token"),
            ("TWILIO_FROM_NUMBER", "+15550006666"),
        ]);
        let config = SmsConfig::from_lookup(complete).unwrap();
        assert_eq!(config.account_sid, "ACxxxx");
        assert_eq!(config.from_number, "+15550006666");
    }

    #[test]
    fn test_config_rejects_blank_variables() {
        let blank_token = lookup_over(&[
            ("TWILIO_ACCOUNT_SID", "ACxxxx"),
            ("TWILIO_AUTH_TOKEN", "   "),
            ("TWILIO_FROM_NUMBER", "+15550006666"),
        ]);
        assert!(SmsConfig::from_lookup(blank_token).is_none());
    }
}
