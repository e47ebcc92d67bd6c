//! Expense update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    expense::{ExpenseId, ExpensePayload, ExpenseStore},
};

/// The state needed for updating an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    /// The store for the expense file.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Handle updating an expense. Replaces every field except the ID.
///
/// The path segment is parsed as an integer and compared to stored IDs by numeric
/// value. A segment that is not a number cannot match any expense and is reported as
/// not found.
pub async fn update_expense_endpoint(
    Path(expense_id): Path<String>,
    State(state): State<UpdateExpenseState>,
    Json(payload): Json<ExpensePayload>,
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

    let mut expenses = match store.load_all() {
        Ok(expenses) => expenses,
        Err(error) => return error.into_response(),
    };

    let Some(index) = expenses.iter().position(|expense| expense.id == expense_id) else {
        return Error::NotFound.into_response();
    };

    // Validation gates persistence: a bad payload leaves the stored record as it was.
    let new_expense = match payload.validate() {
        Ok(new_expense) => new_expense,
        Err(error) => return error.into_response(),
    };

    expenses[index] = new_expense.into_expense(expenses[index].id);
    let updated = expenses[index].clone();

    match store.save_all(&expenses) {
        Ok(()) => Json(updated).into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating expense {expense_id}: {error}"
            );
            error.into_response()
        }
    }
}
