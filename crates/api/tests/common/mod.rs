#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use outreach_api::auth::jwt::{generate_session_token, JwtConfig};
use outreach_api::auth::password::hash_password;
use outreach_api::auth::session::SESSION_COOKIE;
use outreach_api::config::ServerConfig;
use outreach_api::router::build_app_router;
use outreach_api::state::AppState;
use outreach_cloud::MemoryUploader;
use outreach_core::gate::GateMode;
use outreach_db::store::MemoryContentStore;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";
pub const CDN: &str = "http://cdn.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(gate_mode: GateMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_mins: 60,
        },
        admin_password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
        gate_mode,
        assets_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets")),
        secure_cookies: false,
    }
}

/// The full router over in-memory collaborators, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub config: Arc<ServerConfig>,
    pub store: Arc<MemoryContentStore>,
    pub uploader: Arc<MemoryUploader>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_gate(GateMode::Edge)
    }

    pub fn with_gate(gate_mode: GateMode) -> Self {
        let config = Arc::new(test_config(gate_mode));
        let store = Arc::new(MemoryContentStore::new());
        let uploader = Arc::new(MemoryUploader::new(CDN));
        let state = AppState {
            config: Arc::clone(&config),
            store: store.clone(),
            uploader: uploader.clone(),
        };
        let router = build_app_router(state, &config);
        Self {
            router,
            config,
            store,
            uploader,
        }
    }

    /// `Cookie` header value carrying a freshly minted session.
    pub fn session_cookie(&self) -> String {
        let (token, _) = generate_session_token(&self.config.jwt).unwrap();
        format!("{SESSION_COOKIE}={token}")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        form: MultipartForm,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let (content_type, body) = form.finish();
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, content_type);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }
}

/// Minimal `multipart/form-data` encoder.
pub struct MultipartForm {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: "outreach-test-boundary",
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
