#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use payment_methods::config::MethodConfig;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Provider {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

pub struct FakeProvider {
    pub url: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeProvider {
    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }
}

async fn record(State(p): State<Provider>, uri: Uri, headers: HeaderMap, body: String) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    };
    p.seen.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    });
    (p.status, p.body.clone()).into_response()
}

/// Answers every request with `status` and the raw `body`.
pub async fn spawn_provider(status: u16, body: &str) -> FakeProvider {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(record).with_state(Provider {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        seen: seen.clone(),
    });
    let url = serve(app).await;
    FakeProvider { url, seen }
}

pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn method_config(provider_url: &str) -> MethodConfig {
    MethodConfig {
        merchant_id: "1201".to_string(),
        username: "test".to_string(),
        password: "test".to_string(),
        api_key: "jtest123".to_string(),
        success_url: "https://shop.example.com/ok".to_string(),
        error_url: "https://shop.example.com/fail".to_string(),
        notify_url: "https://shop.example.com/notify".to_string(),
        sandbox: true,
        timeout_ms: 2_000,
        base_url: Some(format!("{provider_url}/api/v1")),
        status_base_url: Some(provider_url.to_string()),
    }
}
