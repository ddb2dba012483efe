//! # TutorSync API
//!
//! The API crate provides the web server for the TutorSync lesson booking
//! service: slot registration for tutors, availability browsing for
//! students, and the booking endpoint itself.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Decode requests and call the engine services
//! - **Middleware**: Map engine failures to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! All business decisions live in `tutorsync-core`; the handlers only
//! translate between HTTP and the engine. The engine's capabilities (store,
//! lock coordinator, clock) are injected through [`ApiState`], so tests run
//! the full router against in-memory implementations.

/// Configuration module for API settings
pub mod config;
/// Request handlers bridging HTTP and the engine services
pub mod handlers;
/// Middleware for error mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use tutorsync_core::availability::AvailabilityService;
use tutorsync_core::booking::BookingService;
use tutorsync_core::clock::{Clock, SystemClock};
use tutorsync_core::slots::SlotService;
use tutorsync_core::store::SlotStore;
use tutorsync_db::store::PgSlotStore;
use tutorsync_lock::{InMemoryLockCoordinator, LockCoordinator};

/// Shared application state: the engine services every handler calls into.
pub struct ApiState {
    pub slots: SlotService,
    pub availability: AvailabilityService,
    pub booking: BookingService,
}

impl ApiState {
    pub fn new(
        store: Arc<dyn SlotStore>,
        locks: Arc<dyn LockCoordinator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            slots: SlotService::new(Arc::clone(&store), Arc::clone(&clock)),
            availability: AvailabilityService::new(Arc::clone(&store), clock),
            booking: BookingService::new(store, locks),
        }
    }
}

/// Build the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Tutor slot management endpoints
        .merge(routes::slots::routes())
        // Student availability browsing endpoints
        .merge(routes::availability::routes())
        // Lesson booking endpoints
        .merge(routes::lessons::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database
/// connection.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Wire the engine to its production capabilities. The lock coordinator
    // is in-process, which assumes a single server instance; a multi-node
    // deployment substitutes a distributed LockCoordinator here.
    let state = Arc::new(ApiState::new(
        Arc::new(PgSlotStore::new(db_pool)),
        Arc::new(InMemoryLockCoordinator::new()),
        Arc::new(SystemClock),
    ));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
