#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode as AxumStatus;
use axum::routing::post;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use resignation_relay::config::Config;
use resignation_relay::models::SanitizedSubmission;
use resignation_relay::notifier::{Notifier, NotifyError};
use resignation_relay::rate_limit::SubmissionRateLimiter;
use resignation_relay::state::{AppState, SharedState};

pub const BROWSER_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

/// Records every report instead of sending it anywhere.
#[derive(Default)]
pub struct RecordingNotifier {
    pub reports: Mutex<Vec<SanitizedSubmission>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SanitizedSubmission> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn id(&self) -> &str {
        "recording"
    }

    async fn send(&self, report: &SanitizedSubmission) -> Result<(), NotifyError> {
        self.reports.lock().unwrap().push(report.clone());
        if self.fail {
            return Err(NotifyError::Delivery {
                status: Some(502),
                detail: "upstream down".to_string(),
            });
        }
        Ok(())
    }
}

/// Panics on send, standing in for an unexpected failure mid-request.
pub struct PanickingNotifier;

#[async_trait]
impl Notifier for PanickingNotifier {
    fn id(&self) -> &str {
        "panicking"
    }

    async fn send(&self, _report: &SanitizedSubmission) -> Result<(), NotifyError> {
        panic!("notifier exploded");
    }
}

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a JSON report from the given client address, return (body, status).
    pub async fn submit_from(&self, ip: &str, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/"))
            .header("x-forwarded-for", ip)
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        self.submit_from("203.0.113.7", data).await
    }
}

pub fn test_config() -> Config {
    Config {
        discord_webhook_url: None,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        ..Config::default()
    }
}

/// Spawn a test app with the given notifier (or none) and a fresh in-memory limiter.
pub async fn spawn_app_with(notifier: Option<Arc<dyn Notifier>>) -> TestApp {
    let config = test_config();
    let limiter = SubmissionRateLimiter::in_memory(config.rate_limit, config.rate_limit_window);
    let state: SharedState = Arc::new(AppState::new(config, notifier, limiter));
    spawn_router(state).await
}

pub async fn spawn_router(state: SharedState) -> TestApp {
    let app = resignation_relay::build_router(state.clone());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder().user_agent(BROWSER_UA).build().unwrap();

    TestApp {
        addr,
        client,
        state,
    }
}

/// A report that passes every check.
pub fn valid_submission() -> Value {
    json!({
        "discordId": "123456789012345678",
        "nameStatic": "Rick Valenkov | 289877",
        "rank": "5",
        "department": "CID",
        "tabletScreenshot": "https://imgur.com/a/tablet.png",
        "inventoryScreenshot": "https://imgur.com/a/inventory.png",
        "reason": "Moving to another city",
        "fillTime": 45000,
        "website": ""
    })
}

/// In-process stand-in for a Discord webhook.
pub struct MockWebhook {
    pub url: String,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl MockWebhook {
    pub fn payloads(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockState {
    status: AxumStatus,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn receive(State(state): State<MockState>, Json(body): Json<Value>) -> AxumStatus {
    state.received.lock().unwrap().push(body);
    state.status
}

/// Spawn a webhook receiver that records payloads and answers with `status`.
pub async fn spawn_webhook(status: u16) -> MockWebhook {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: AxumStatus::from_u16(status).unwrap(),
        received: received.clone(),
    };

    let app = axum::Router::new()
        .route("/webhook", post(receive))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock webhook failed");
    });

    MockWebhook {
        url: format!("http://{addr}/webhook"),
        received,
    }
}
