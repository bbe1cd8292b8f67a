pub mod handlers;
pub mod models;

pub use models::{CallbackOutcome, CallbackParams};

use axum::{routing::get, Router};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch, Mutex};
use tower_http::trace::TraceLayer;

use crate::client::AuthSession;
use crate::error::AuthError;

#[derive(Clone)]
pub struct CallbackState {
    pub session: Arc<AuthSession>,
    pub sender: Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>,
}

/// Loopback HTTP listener that captures exactly one OAuth redirect.
///
/// The redirect names `localhost`, so the listener takes the same port on
/// both `127.0.0.1` and `::1` when IPv6 is available.
pub struct CallbackListener {
    listeners: Vec<TcpListener>,
    path: String,
}

impl CallbackListener {
    pub async fn bind(port: u16, path: impl Into<String>) -> Result<Self, AuthError> {
        let v4 = TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await?;
        let bound_port = v4.local_addr()?.port();
        let mut listeners = vec![v4];

        match TcpListener::bind((Ipv6Addr::LOCALHOST, bound_port)).await {
            Ok(v6) => listeners.push(v6),
            Err(e) => {
                tracing::debug!(error = %e, port = bound_port, "IPv6 loopback unavailable")
            }
        }

        Ok(Self {
            listeners,
            path: path.into(),
        })
    }

    /// Address of the IPv4 loopback listener.
    pub fn local_addr(&self) -> Result<SocketAddr, AuthError> {
        match self.listeners.first() {
            Some(listener) => Ok(listener.local_addr()?),
            None => Err(AuthError::Configuration("callback listener is not bound".to_string())),
        }
    }

    pub fn redirect_uri(&self) -> Result<String, AuthError> {
        Ok(format!(
            "http://localhost:{}{}",
            self.local_addr()?.port(),
            self.path
        ))
    }

    /// Build the router serving the callback route for `session`.
    pub fn router(path: &str, state: CallbackState) -> Router {
        Router::new()
            .route(path, get(handlers::oauth_callback))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serve until the first callback arrives and return its authorization code.
    ///
    /// Any rejected callback (state mismatch, denied consent, missing code)
    /// fails the attempt with [`AuthError::NoCode`]. The listener shuts down
    /// once a value has been received or the wait is abandoned.
    pub async fn wait_for_code(
        self,
        session: Arc<AuthSession>,
        timeout: Option<Duration>,
    ) -> Result<String, AuthError> {
        let Self { listeners, path } = self;

        let (code_tx, code_rx) = oneshot::channel();
        let state = CallbackState {
            session,
            sender: Arc::new(Mutex::new(Some(code_tx))),
        };
        let app = Self::router(&path, state);

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        for listener in listeners {
            let app = app.clone();
            let mut shutdown_rx = shutdown_rx.clone();
            tokio::spawn(async move {
                let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                });
                if let Err(e) = server.await {
                    tracing::warn!(error = %e, "Callback listener stopped with an error");
                }
            });
        }

        tracing::debug!(path = %path, "Waiting for authorization callback");

        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, code_rx)
                .await
                .map_err(|_| AuthError::Timeout)?,
            None => code_rx.await,
        };

        // Dropping the sender would stop the listener too; send to be explicit
        let _ = shutdown_tx.send(());

        match received {
            Ok(CallbackOutcome::Code(code)) => Ok(code),
            Ok(CallbackOutcome::Rejected(_)) | Err(_) => Err(AuthError::NoCode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn callback_state(session: Arc<AuthSession>) -> (CallbackState, oneshot::Receiver<CallbackOutcome>) {
        let (tx, rx) = oneshot::channel();
        let state = CallbackState {
            session,
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (state, rx)
    }

    #[tokio::test]
    async fn first_callback_signals_the_code() {
        let session = Arc::new(AuthSession::new());
        let (state, rx) = callback_state(session.clone());
        let app = CallbackListener::router("/oauth/code", state);

        let uri = format!("/oauth/code?code=the-code&state={}", session.state());
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(rx.await.unwrap(), CallbackOutcome::Code("the-code".to_string()));
    }

    #[tokio::test]
    async fn second_callback_is_a_no_op() {
        let session = Arc::new(AuthSession::new());
        let (state, rx) = callback_state(session.clone());
        let app = CallbackListener::router("/oauth/code", state);

        let first = format!("/oauth/code?code=first&state={}", session.state());
        let second = format!("/oauth/code?code=second&state={}", session.state());

        app.clone()
            .oneshot(Request::get(first).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let response = app
            .oneshot(Request::get(second).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(rx.await.unwrap(), CallbackOutcome::Code("first".to_string()));
    }

    #[tokio::test]
    async fn malformed_query_signals_rejection() {
        let session = Arc::new(AuthSession::new());
        let (state, rx) = callback_state(session.clone());
        let app = CallbackListener::router("/oauth/code", state);

        let uri = format!(
            "/oauth/code?code=the-code&state={}&state=other",
            session.state()
        );
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            rx.await.unwrap(),
            CallbackOutcome::Rejected("malformed callback query".to_string())
        );
    }

    #[tokio::test]
    async fn other_paths_are_not_served() {
        let session = Arc::new(AuthSession::new());
        let (state, _rx) = callback_state(session);
        let app = CallbackListener::router("/oauth/code", state);

        let response = app
            .oneshot(Request::get("/elsewhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wait_times_out_without_callback() {
        let listener = CallbackListener::bind(0, "/oauth/code").await.unwrap();
        let result = listener
            .wait_for_code(Arc::new(AuthSession::new()), Some(Duration::from_millis(50)))
            .await;

        assert!(matches!(result, Err(AuthError::Timeout)));
    }

    #[tokio::test]
    async fn ipv6_loopback_shares_the_port() {
        let listener = CallbackListener::bind(0, "/oauth/code").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        for bound in &listener.listeners[1..] {
            let addr = bound.local_addr().unwrap();
            assert!(addr.ip().is_loopback());
            assert_eq!(addr.port(), port);
        }
    }

    #[tokio::test]
    async fn redirect_uri_uses_bound_port() {
        let listener = CallbackListener::bind(0, "/oauth/code").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        assert_eq!(
            listener.redirect_uri().unwrap(),
            format!("http://localhost:{}/oauth/code", port)
        );
    }
}
