//! Appointment-booking backend for a small dental practice.
//!
//! Registers users, lists treatments, computes per-date slot availability,
//! deduplicates bookings, charges payments through a payment-intent
//! collaborator, and mails confirmations best-effort. Persistent state lives
//! in MongoDB; the store handle is opened once at startup and passed down
//! through [`state::AppState`].

use std::time::Duration;

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{delete, get, post, put},
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod availability;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod ledger;
pub mod mailer;
pub mod models;
pub mod payments;
pub mod routes;
pub mod state;

use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    catalog::seed_defaults(&state.db)
        .await
        .expect("Catalog seed failed!");

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/", get(routes::root))
        .route("/services", get(routes::services))
        .route("/available", get(routes::available))
        .route("/user/{email}", put(routes::upsert_user))
        .route("/users", get(routes::list_users))
        .route("/admin/{email}", get(routes::admin_status))
        .route("/doctor", post(routes::add_doctor).get(routes::list_doctors))
        .route("/doctor/{email}", delete(routes::remove_doctor))
        .route("/create-payment-intent", post(routes::create_payment_intent))
        .route(
            "/booking",
            get(routes::patient_bookings).post(routes::submit_booking),
        )
        .route(
            "/booking/{id}",
            get(routes::booking_by_id).patch(routes::confirm_booking_payment),
        )
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
