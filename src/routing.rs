//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_categories_endpoint,
        get_summary_endpoint, list_expenses_endpoint, update_expense_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::EXPENSES_SUMMARY, get(get_summary_endpoint))
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("public/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
