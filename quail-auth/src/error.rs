use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The callback carried no usable authorization code (state mismatch,
    /// denied consent, or a missing `code` parameter).
    #[error("failed to get authorization code")]
    NoCode,

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Bad response from token endpoint: {0}")]
    BadResponse(String),

    #[error("Timed out waiting for the authorization callback")]
    Timeout,

    #[error("Callback listener error: {0}")]
    Listener(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
