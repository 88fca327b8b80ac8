//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the submission and preflight handlers
//! - Wire up middleware (CORS origin, timeout, request ID, tracing)
//! - Build the notifier from config
//! - Bind server to listener and stop on shutdown signal

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::submit::submit_handler;
use crate::notify::{
    DeliveryError, EmailSender, HttpEmailClient, LogEmailSender, NotificationTemplate, Notifier,
};
use crate::security::headers::{allow_origin_layer, preflight};
use crate::security::{AdmissionGate, SlidingWindowLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<dyn AdmissionGate>,
    pub notifier: Notifier,
    pub trust_forwarded_for: bool,
    pub max_body_bytes: usize,
}

/// Error building the server from config.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error("failed to build email client: {0}")]
    EmailClient(#[from] DeliveryError),
}

/// HTTP server for the waitlist gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server, choosing the email sender from config.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let sender: Arc<dyn EmailSender> = if config.email.enabled {
            Arc::new(HttpEmailClient::new(
                &config.email.base_url,
                config.email.sender.clone(),
                config.email.authorization_token.clone(),
                Duration::from_secs(config.timeouts.email_secs),
            )?)
        } else {
            tracing::warn!("Email delivery disabled; notifications will only be logged");
            Arc::new(LogEmailSender)
        };

        Self::with_sender(config, sender)
    }

    /// Create a server that delivers through `sender`, with an in-memory ledger.
    pub fn with_sender(
        config: GatewayConfig,
        sender: Arc<dyn EmailSender>,
    ) -> Result<Self, ServerError> {
        Self::with_parts(config, sender, Arc::new(SlidingWindowLimiter::new()))
    }

    /// Create a server from explicit collaborators.
    ///
    /// `limiter` is shared by every request this server handles; pass a
    /// limiter over a shared [`LedgerStore`](crate::security::LedgerStore)
    /// to rate limit across instances.
    pub fn with_parts(
        config: GatewayConfig,
        sender: Arc<dyn EmailSender>,
        limiter: Arc<dyn AdmissionGate>,
    ) -> Result<Self, ServerError> {
        let template = NotificationTemplate::new(
            config.notification.subject.clone(),
            config.notification.site.clone(),
        );
        let notifier = Notifier::new(config.notification.recipient.clone(), template, sender);

        let state = AppState {
            limiter,
            notifier,
            trust_forwarded_for: config.listener.trust_forwarded_for,
            max_body_bytes: config.security.max_body_bytes,
        };

        let origin = HeaderValue::from_str(&config.cors.allowed_origin)
            .map_err(|_| ServerError::InvalidOrigin(config.cors.allowed_origin.clone()))?;

        let router = Self::build_router(&config, origin, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, origin: HeaderValue, state: AppState) -> Router {
        Router::new()
            .route("/", post(submit_handler).options(preflight))
            .route("/{*path}", post(submit_handler).options(preflight))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(allow_origin_layer(origin))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            allowed_origin = %self.config.cors.allowed_origin,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

}
