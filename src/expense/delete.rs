//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState, Error,
    expense::{ExpenseId, ExpenseStore},
};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The store for the expense file.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Handle expense deletion. Returns `{"success": true}` on success.
///
/// The path segment is parsed as an integer and compared to stored IDs by numeric
/// value, the same as the update endpoint.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<String>,
    State(state): State<DeleteExpenseState>,
) -> Response {
    let expense_id: ExpenseId = match expense_id.trim().parse() {
        Ok(id) => id,
        Err(_) => return Error::NotFound.into_response(),
    };

    let store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire the expense store lock: {error}");
            return Error::StoreLock.into_response();
        }
    };

    let expenses = match store.load_all() {
        Ok(expenses) => expenses,
        Err(error) => return error.into_response(),
    };

    if !expenses.iter().any(|expense| expense.id == expense_id) {
        return Error::NotFound.into_response();
    }

    let remaining: Vec<_> = expenses
        .into_iter()
        .filter(|expense| expense.id != expense_id)
        .collect();

    match store.save_all(&remaining) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting expense {expense_id}: {error}"
            );
            error.into_response()
        }
    }
}
