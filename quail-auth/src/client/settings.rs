use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CLIENT_ID: &str = "e9139b6e-298a-43e4-91f0-fc97960e281a";
pub const DEFAULT_CALLBACK_PORT: u16 = 63812;
pub const DEFAULT_CALLBACK_PATH: &str = "/oauth/code";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OAuthSettings {
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Loopback port the redirect lands on; `0` picks a free port.
    #[serde(default = "default_callback_port")]
    pub callback_port: u16,

    #[serde(default = "default_callback_path")]
    pub callback_path: String,

    /// `None` waits for the browser indefinitely.
    #[serde(default = "default_login_timeout")]
    pub login_timeout_secs: Option<u64>,
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

fn default_callback_port() -> u16 {
    DEFAULT_CALLBACK_PORT
}

fn default_callback_path() -> String {
    DEFAULT_CALLBACK_PATH.to_string()
}

fn default_login_timeout() -> Option<u64> {
    Some(300)
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            callback_port: default_callback_port(),
            callback_path: default_callback_path(),
            login_timeout_secs: default_login_timeout(),
        }
    }
}

impl OAuthSettings {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn login_timeout(&self) -> Option<Duration> {
        self.login_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.is_empty() {
            return Err("oauth.client_id is required".to_string());
        }
        if !self.callback_path.starts_with('/') {
            return Err("oauth.callback_path must start with '/'".to_string());
        }
        Ok(())
    }
}
