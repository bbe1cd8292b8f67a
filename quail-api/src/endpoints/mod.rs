pub mod posts;
pub mod users;

use tower_api_client::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// Requests without a body still declare a JSON content type
pub(crate) fn json_content_type() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
