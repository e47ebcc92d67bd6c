//! Expense creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    expense::{ExpensePayload, ExpenseStore, store::next_id},
};

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The store for the expense file.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Handle expense creation. Returns the created expense with its assigned ID.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Json(payload): Json<ExpensePayload>,
) -> Response {
    // Validation gates persistence: an invalid payload must never reach the file.
    let new_expense = match payload.validate() {
        Ok(new_expense) => new_expense,
        Err(error) => return error.into_response(),
    };

    let store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire the expense store lock: {error}");
            return Error::StoreLock.into_response();
        }
    };

    let mut expenses = match store.load_all() {
        Ok(expenses) => expenses,
        Err(error) => return error.into_response(),
    };

    let expense = new_expense.into_expense(next_id(&expenses));
    expenses.push(expense.clone());
    expenses.sort_by_key(|expense| expense.id);

    match store.save_all(&expenses) {
        Ok(()) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");
            error.into_response()
        }
    }
}
