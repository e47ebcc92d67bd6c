//! Expense and category listing endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    expense::{Category, ExpenseStore},
};

/// The state needed for listing expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    /// The store for the expense file.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Handle listing all expenses. No filtering, no pagination.
pub async fn list_expenses_endpoint(State(state): State<ListExpensesState>) -> Response {
    let store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire the expense store lock: {error}");
            return Error::StoreLock.into_response();
        }
    };

    match store.load_all() {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handle listing the fixed category set. Pure, no I/O.
pub async fn get_categories_endpoint() -> Response {
    Json(Category::ALL).into_response()
}
