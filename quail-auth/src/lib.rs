// Token types shared by the flow and its callers
pub mod common;

mod client;
mod error;

// Loopback listener that captures the authorization redirect
pub mod server;

pub use client::{
    AuthSession, OAuthClient, OAuthSettings, DEFAULT_AUTH_BASE, DEFAULT_CALLBACK_PATH,
    DEFAULT_CALLBACK_PORT, DEFAULT_CLIENT_ID,
};
pub use common::TokenPair;
pub use error::AuthError;
