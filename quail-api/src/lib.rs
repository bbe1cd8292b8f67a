pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::{ErrorDetail, QuailApiError};
use repositories::*;
pub use tower_api_client::{Request as ApiRequest, RequestData};
use tower_api_client::Client as ApiClient;

pub const DEFAULT_API_BASE: &str = "https://api.quail.ink";

/// Bearer-authenticated JSON client for the Quail API.
pub struct Client {
    inner: ApiClient,
}

impl Client {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url.trim_end_matches('/')).bearer_auth(access_token),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, QuailApiError>
    where
        R: ApiRequest,
    {
        tracing::debug!(method = %R::METHOD, endpoint = %request.endpoint(), "Sending API request");

        self.inner.send(request).await.map_err(|e| {
            let err = QuailApiError::from(e);
            tracing::warn!(error = %err, "API request failed");
            err
        })
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn posts() -> PostRepository {
        PostRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }
}
