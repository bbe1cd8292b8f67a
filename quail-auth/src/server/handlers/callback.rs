use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
};

use crate::client::AuthSession;
use crate::server::{
    models::{CallbackOutcome, CallbackParams},
    CallbackState,
};

const SUCCESS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Authorization Successful</title>
    <style>
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: #F9FAFB;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        .container {
            background: white;
            border-radius: 12px;
            padding: 48px;
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.08);
            text-align: center;
            max-width: 400px;
        }
        h1 { color: #1F2937; font-size: 24px; font-weight: 600; }
        p { color: #6B7280; line-height: 1.5; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Authorization successful!</h1>
        <p>You can close this window and return to your terminal.</p>
    </div>
</body>
</html>"#;

const ERROR_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Authorization Error</title>
    <style>
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: #FEF2F2;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        .container {
            background: white;
            border-radius: 12px;
            padding: 48px;
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.08);
            text-align: center;
            max-width: 400px;
        }
        h1 { color: #1F2937; font-size: 24px; font-weight: 600; }
        p { color: #6B7280; line-height: 1.5; }
        .error-details {
            background: #FEE2E2;
            border-radius: 8px;
            padding: 16px;
            color: #991B1B;
            font-family: monospace;
            font-size: 14px;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Authorization failed</h1>
        <div class="error-details">Error: {ERROR}</div>
        <p>Please close this window and run the login command again.</p>
    </div>
</body>
</html>"#;

const ALREADY_HANDLED_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Already Handled</title></head>
<body>
    <p>This login attempt has already been handled. You can close this window.</p>
</body>
</html>"#;

pub async fn oauth_callback(
    State(state): State<CallbackState>,
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> Html<String> {
    // Only the first request gets to use the sender
    let Some(sender) = state.sender.lock().await.take() else {
        tracing::debug!("Ignoring callback, login already handled");
        return Html(ALREADY_HANDLED_HTML.to_string());
    };

    let outcome = match params {
        Ok(Query(params)) => evaluate_callback(&state.session, params),
        Err(rejection) => {
            tracing::error!(error = %rejection, "malformed callback query");
            CallbackOutcome::Rejected("malformed callback query".to_string())
        }
    };
    let page = match &outcome {
        CallbackOutcome::Code(_) => {
            tracing::info!("Authorization code received");
            SUCCESS_HTML.to_string()
        }
        CallbackOutcome::Rejected(reason) => {
            tracing::warn!(reason = %reason, "Authorization callback rejected");
            ERROR_HTML_TEMPLATE.replace("{ERROR}", &escape_html(reason))
        }
    };

    // The login flow may have timed out and dropped the receiver
    if sender.send(outcome).is_err() {
        tracing::debug!("Login flow no longer waiting for the callback");
    }

    Html(page)
}

pub(crate) fn evaluate_callback(session: &AuthSession, params: CallbackParams) -> CallbackOutcome {
    let returned_state = params.state.unwrap_or_default();
    if !session.matches_state(&returned_state) {
        tracing::error!(
            expected = %session.state(),
            got = %returned_state,
            "state mismatch"
        );
        return CallbackOutcome::Rejected("state mismatch".to_string());
    }

    if let Some(error) = params.error {
        return CallbackOutcome::Rejected(error);
    }

    match params.code {
        Some(code) if !code.is_empty() => CallbackOutcome::Code(code),
        _ => CallbackOutcome::Rejected("missing authorization code".to_string()),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
