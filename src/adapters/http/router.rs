//! Top-level router: merges the channel routers and applies the shared
//! tower layers.

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::chat::{chat_router, ChatAppState};
use super::voice::{voice_router, VoiceAppState};
use super::whatsapp::{whatsapp_router, WhatsAppAppState};

/// Per-module state needed to build the full router.
#[derive(Clone)]
pub struct HttpServices {
    pub chat: ChatAppState,
    pub whatsapp: WhatsAppAppState,
    pub voice: VoiceAppState,
}

/// GET /health - Liveness check.
pub async fn health() -> &'static str {
    "ok"
}

/// Builds the application router.
///
/// Development without configured origins gets a permissive CORS policy;
/// otherwise only the configured origins are allowed.
pub fn create_router(services: HttpServices, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(chat_router().with_state(services.chat))
        .merge(whatsapp_router().with_state(services.whatsapp))
        .merge(voice_router().with_state(services.voice))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([
            header::HeaderName::from_static("x-voice-used"),
            header::HeaderName::from_static("x-fallback"),
            header::HeaderName::from_static("x-language"),
        ])
}
