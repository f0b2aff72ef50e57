//! Session configuration.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Default chat ingest endpoint.
pub const DEFAULT_ENDPOINT: &str = "wss://irc-ws.chat.twitch.tv:443";

/// Default keepalive probe period. Kept below typical server-side idle
/// timeouts.
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(300);

/// Connection parameters for one chat session.
///
/// Values are not validated when set; [`ClientConfig::validate`] runs at
/// connect time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Twitch login name. Stored lowercase.
    pub username: String,
    /// OAuth token, in the `oauth:...` form the PASS line expects.
    pub token: String,
    /// Channel to join, without the `#`. Stored lowercase.
    pub channel: String,
    /// WebSocket endpoint URL.
    pub endpoint: String,
    /// Period of the client-initiated keepalive probe.
    pub keepalive_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: String::new(),
            channel: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
        }
    }
}

impl ClientConfig {
    /// Check that the credential fields required for a handshake are set.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(ClientError::MissingConfig("username"));
        }
        if self.token.is_empty() {
            return Err(ClientError::MissingConfig("token"));
        }
        if self.channel.is_empty() {
            return Err(ClientError::MissingConfig("channel"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "wss://irc-ws.chat.twitch.tv:443");
        assert_eq!(config.keepalive_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut config = ClientConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ClientError::MissingConfig("username"))
        ));

        config.username = "bot".into();
        assert!(matches!(
            config.validate(),
            Err(ClientError::MissingConfig("token"))
        ));

        config.token = "oauth:x".into();
        assert!(matches!(
            config.validate(),
            Err(ClientError::MissingConfig("channel"))
        ));

        config.channel = "ch".into();
        assert!(config.validate().is_ok());
    }
}
