//! Expenseur is a small web service for tracking personal expenses.
//!
//! This library provides a JSON REST API over a single expense file: expenses can be
//! created, listed, updated, deleted, and summed, each tagged with a description, an
//! amount, and a category from a fixed set.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
pub mod endpoints;
pub mod expense;
mod logging;
mod not_found;
mod routing;

pub use app_state::AppState;
pub use expense::{Category, Expense, ExpenseId, ExpensePayload, ExpenseStore, NewExpense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more of the expense fields is missing or empty.
    #[error("description, amount and category are all required")]
    MissingFields,

    /// The expense amount is not a number greater than zero.
    #[error("the amount must be a positive number")]
    InvalidAmount,

    /// The expense description is not a string of 1 to 40 characters.
    #[error("the description must be between 1 and 40 characters")]
    InvalidDescription,

    /// The expense category is not one of the fixed category set.
    #[error("invalid category")]
    InvalidCategory,

    /// The requested expense could not be found.
    ///
    /// The client should check that the ID in the request path refers to an expense
    /// that has been created and not since deleted.
    #[error("Not found")]
    NotFound,

    /// The expense file exists but could not be read or parsed.
    ///
    /// A missing file is not an error (it means no expenses have been recorded yet),
    /// but a file that is present and unreadable must not be silently treated as
    /// empty, otherwise the next write would wipe it.
    #[error("the expense file could not be read: {0}")]
    CorruptExpenseFile(String),

    /// The expense file could not be written.
    #[error("the expense file could not be written: {0}")]
    SaveExpenses(String),

    /// Could not acquire the expense store lock.
    #[error("could not acquire the expense store lock")]
    StoreLock,
}

impl Error {
    /// The HTTP status code this error is reported with.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingFields
            | Error::InvalidAmount
            | Error::InvalidDescription
            | Error::InvalidCategory => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::CorruptExpenseFile(_) | Error::SaveExpenses(_) | Error::StoreLock => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
