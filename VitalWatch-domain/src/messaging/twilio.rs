use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use super::{MessagingError, SmsConfig, SmsProvider};

/// Timeout for the provider call. A hung provider must not hang the whole
/// request; a timeout is treated the same as a provider failure.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Successful message creation response from the provider
#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Error body returned by the provider on rejected requests
#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: Option<String>,
    code: Option<i64>,
}

/// SMS provider backed by the Twilio Messages API
pub struct TwilioSmsProvider {
    client: reqwest::Client,
    config: SmsConfig,
}

impl TwilioSmsProvider {
    /// Create a provider from explicit credentials
    pub fn new(config: SmsConfig) -> Result<Self, MessagingError> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| MessagingError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.config.account_sid
        )
    }
}

#[async_trait]
impl SmsProvider for TwilioSmsProvider {
    async fn send(&self, to: &str, body: &str) -> Result<String, MessagingError> {
        debug!("Sending SMS to {}", to);

        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("SMS transport failure: {}", e);
                MessagingError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let message: TwilioMessageResponse = response
                .json()
                .await
                .map_err(|e| MessagingError::Provider(format!("Unreadable response: {}", e)))?;
            debug!("SMS accepted by provider, sid {}", message.sid);
            Ok(message.sid)
        } else {
            let detail = match response.json::<TwilioErrorResponse>().await {
                Ok(err) => format!(
                    "{} (status {}, code {})",
                    err.message.unwrap_or_else(|| "unknown provider error".to_string()),
                    status,
                    err.code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
                ),
                Err(_) => format!("Provider returned status {}", status),
            };
            error!("SMS rejected by provider: {}", detail);
            Err(MessagingError::Provider(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SmsConfig {
        SmsConfig {
            account_sid: "AC0000000000000000000000000000000a".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15550006666".to_string(),
        }
    }

    #[test]
    fn test_messages_url_includes_account_sid() {
        let provider = TwilioSmsProvider::new(test_config()).unwrap();
        let url = provider.messages_url();
        assert!(url.starts_with("https://api.twilio.com/2010-04-01/Accounts/"));
        assert!(url.contains("AC0000000000000000000000000000000a"));
        assert!(url.ends_with("/Messages.json"));
    }
}
