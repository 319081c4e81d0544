#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test helpers: a stub identity service served by axum on an
//! ephemeral local port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use g5_auth::{Authenticator, AuthenticatorConfig, Protocol};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const MAGIC: &str = "bacon";

/// Mutable behaviour of the stub, shared with the test body.
pub struct StubState {
    pub me_status: Mutex<StatusCode>,
    pub me_body: Mutex<String>,
    pub me_delay: Mutex<Duration>,
    pub me_calls: AtomicUsize,
    pub last_authorization: Mutex<Option<String>>,

    pub token_status: Mutex<StatusCode>,
    pub token_body: Mutex<String>,
    pub token_calls: AtomicUsize,
    pub last_token_form: Mutex<Option<HashMap<String, String>>>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            me_status: Mutex::new(StatusCode::OK),
            me_body: Mutex::new(r#"{"email":"test@getg5.com"}"#.to_string()),
            me_delay: Mutex::new(Duration::ZERO),
            me_calls: AtomicUsize::new(0),
            last_authorization: Mutex::new(None),
            token_status: Mutex::new(StatusCode::OK),
            token_body: Mutex::new(
                r#"{"access_token":"12345","token_type":"Bearer","expires_in":7200}"#.to_string(),
            ),
            token_calls: AtomicUsize::new(0),
            last_token_form: Mutex::new(None),
        }
    }
}

pub struct StubIdentityService {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubIdentityService {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/v1/me", get(me))
            .route("/oauth/token", post(token))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// `host:port`, as the authenticator expects it.
    pub fn hostname(&self) -> String {
        self.addr.to_string()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_me(&self, status: StatusCode, body: &str) {
        *self.state.me_status.lock().unwrap() = status;
        *self.state.me_body.lock().unwrap() = body.to_string();
    }

    pub fn set_me_delay(&self, delay: Duration) {
        *self.state.me_delay.lock().unwrap() = delay;
    }

    pub fn set_token(&self, status: StatusCode, body: &str) {
        *self.state.token_status.lock().unwrap() = status;
        *self.state.token_body.lock().unwrap() = body.to_string();
    }

    pub fn me_calls(&self) -> usize {
        self.state.me_calls.load(Ordering::SeqCst)
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }

    pub fn last_token_form(&self) -> Option<HashMap<String, String>> {
        self.state.last_token_form.lock().unwrap().clone()
    }

    /// Authenticator config pointed at this stub over plain http.
    pub fn config(&self) -> AuthenticatorConfig {
        AuthenticatorConfig::new(self.hostname())
            .with_protocol(Protocol::Http)
            .with_timeout(Duration::from_millis(500))
            .with_magic_token(Some(MAGIC))
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.config()).unwrap()
    }
}

impl Drop for StubIdentityService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn me(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let delay = *state.me_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let status = *state.me_status.lock().unwrap();
    let body = state.me_body.lock().unwrap().clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn token(
    State(state): State<Arc<StubState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_token_form.lock().unwrap() = Some(form);

    let status = *state.token_status.lock().unwrap();
    let body = state.token_body.lock().unwrap().clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// An address on which nothing is listening.
pub async fn closed_hostname() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

/// A server that answers every request with `200 OK` and a body cut short of
/// its `Content-Length`, then hangs up.
///
/// Returns the `host:port` and the accept loop handle (abort it when done).
pub async fn truncated_body_hostname() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = "HTTP/1.1 200 OK\r\n\
                    content-type: application/json\r\n\
                    content-length: 100\r\n\
                    \r\n\
                    {\"email\":\"te";
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr.to_string(), handle)
}
