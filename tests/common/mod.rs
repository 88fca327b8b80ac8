//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use waitlist_gateway::{GatewayConfig, HttpServer, Shutdown};

/// Requests received by the mock email API.
pub type Deliveries = Arc<Mutex<Vec<Value>>>;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    deliveries: Deliveries,
}

async fn receive_email(State(state): State<MockState>, Json(body): Json<Value>) -> StatusCode {
    state.deliveries.lock().unwrap().push(body);
    state.status
}

/// Start a mock email API answering `POST /email` with `status`.
pub async fn start_mock_email_api(status: StatusCode) -> (SocketAddr, Deliveries) {
    let deliveries = Deliveries::default();
    let state = MockState {
        status,
        deliveries: deliveries.clone(),
    };
    let app = Router::new()
        .route("/email", post(receive_email))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, deliveries)
}

/// Config pointing at the mock email API.
pub fn gateway_config(email_api: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.cors.allowed_origin = "https://www.anjunalabs.ai".into();
    config.email.enabled = true;
    config.email.base_url = format!("http://{email_api}");
    config.email.sender = "noreply@anjunalabs.ai".into();
    config.email.authorization_token = "test-token".into();
    config.notification.recipient = "team@anjunalabs.ai".into();
    config.timeouts.email_secs = 2;
    config
}

/// A running gateway. Dropping it does not stop the server; call `stop`.
pub struct TestGateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self) -> String {
        format!("http://{}/submit", self.addr)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    TestGateway { addr, shutdown }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
