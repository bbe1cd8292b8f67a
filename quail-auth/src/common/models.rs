use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens are treated as expired this long before their actual expiry.
const EXPIRY_BUFFER: Duration = Duration::minutes(5);

/// Token pair issued by the authorization server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl TokenPair {
    /// A token without a known expiry is always considered expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry <= now + EXPIRY_BUFFER,
            None => true,
        }
    }

    /// Fill in fields a refresh response left blank from the pair it replaces.
    pub fn inherit_missing(mut self, previous: &TokenPair) -> Self {
        if self.token_type.trim().is_empty() {
            self.token_type = previous.token_type.clone();
        }
        if self.refresh_token.trim().is_empty() {
            self.refresh_token = previous.refresh_token.clone();
        }
        self
    }
}

/// Raw body of a token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// `None` when the response carries no access token.
    pub fn into_token_pair(self, now: DateTime<Utc>) -> Option<TokenPair> {
        if self.access_token.is_empty() {
            return None;
        }

        let expiry = self
            .expiry
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));

        Some(TokenPair {
            access_token: self.access_token,
            refresh_token: self.refresh_token.unwrap_or_default(),
            token_type: self.token_type.unwrap_or_default(),
            expiry,
        })
    }
}
