//! Backend for an academic-writing marketplace.
//!
//! The deep part of this crate is the order lifecycle and payment-capture
//! workflow: a client obtains a payment intent from the provider, approves
//! it in the provider's UI, then asks this service to capture it. On a
//! completed capture an order document is persisted and a confirmation is
//! dispatched best-effort. Everything external (payment provider, email,
//! storage) sits behind the traits in [`domain::ports`].

use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::info;

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

use application::checkout::CheckoutEngine;
use config::Config;
use interfaces::http::{AppState, router};

/// Binds the HTTP interface and serves until SIGINT/SIGTERM.
pub async fn serve(config: Config, engine: CheckoutEngine) -> std::io::Result<()> {
    let app = router(AppState::new(engine));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let interrupt = async {
        ctrl_c().await.expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
