//! HTTP front end for the todo document model.
//!
//! # Overview
//! Maps `/todos` requests onto a [`TodoModel`] and model results onto status
//! codes. The model is injected, so the same router runs against
//! [`todo_core::MemoryModel`] in the binary and against stubs in tests.
//!
//! # Design
//! - Handlers live in [`controller`] and hold no state of their own.
//! - Model failures are rendered in one place, [`error::ApiError`].
//! - Requests are traced with `tower-http`'s `TraceLayer`.

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;

use std::sync::Arc;

use axum::{routing::get, Router};
use todo_core::TodoModel;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use controller::{create_todo, delete_todo, get_todo, list_todos, update_todo};

pub use config::Config;
pub use error::{ApiError, ErrorBody};

pub fn app(model: Arc<dyn TodoModel>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo)
                .patch(update_todo)
                .put(update_todo)
                .delete(delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(model)
}

/// Serves `app(model)` on `listener` until the process is told to stop.
pub async fn run(listener: TcpListener, model: Arc<dyn TodoModel>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(model))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
