use std::path::Path;

use chrono::{DateTime, Utc};
use quail_auth::{OAuthClient, TokenPair};

use crate::settings::Settings;

/// Return the token to authenticate API calls with.
///
/// An expired token is refreshed, merged with the stored pair and written back
/// to `path`. When the refresh fails the stored token is returned unchanged and
/// the API reports the failure.
pub async fn ensure_fresh(
    settings: &mut Settings,
    path: &Path,
    client: &OAuthClient,
    now: DateTime<Utc>,
) -> TokenPair {
    if !settings.app.is_expired(now) {
        return settings.app.clone();
    }

    if settings.app.refresh_token.is_empty() {
        tracing::warn!("Access token expired and no refresh token is stored, run `quail-cli login`");
        return settings.app.clone();
    }

    tracing::info!(expiry = ?settings.app.expiry, "Access token expired, refreshing");

    match client.refresh_token(&settings.app.refresh_token).await {
        Ok(renewed) => {
            settings.app = renewed.inherit_missing(&settings.app);
            if let Err(e) = settings.save(path) {
                tracing::warn!(error = %e, path = %path.display(), "Failed to persist refreshed token");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Token refresh failed, using stored token");
        }
    }

    settings.app.clone()
}
