mod models;

pub use models::TokenPair;
pub(crate) use models::TokenResponse;
