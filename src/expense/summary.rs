//! Expense summary endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, expense::ExpenseStore};

/// The total of all expense amounts currently stored.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum over the whole collection. Zero when no expenses are stored.
    pub total: f64,
}

/// The state needed for summarizing expenses.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The store for the expense file.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Handle summing all expense amounts. No currency conversion, no per-category
/// breakdown.
pub async fn get_summary_endpoint(State(state): State<SummaryState>) -> Response {
    let store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire the expense store lock: {error}");
            return Error::StoreLock.into_response();
        }
    };

    match store.load_all() {
        Ok(expenses) => {
            let total = expenses.iter().map(|expense| expense.amount).sum();
            Json(Summary { total }).into_response()
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod summary_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use tempfile::{TempDir, tempdir};

    use crate::expense::{Category, Expense, ExpenseStore};

    use super::{Summary, SummaryState, get_summary_endpoint};

    fn get_summary_state(expenses: &[Expense]) -> (TempDir, SummaryState) {
        let dir = tempdir().expect("Could not create temporary directory");
        let store = ExpenseStore::new(dir.path().join("expenses.json"));
        store.save_all(expenses).expect("Could not seed expenses");

        (
            dir,
            SummaryState {
                expense_store: Arc::new(Mutex::new(store)),
            },
        )
    }

    async fn get_summary(response: axum::response::Response) -> Summary {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).expect("response body is not a summary")
    }

    #[tokio::test]
    async fn empty_collection_sums_to_zero() {
        let (_dir, state) = get_summary_state(&[]);

        let response = get_summary_endpoint(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_summary(response).await, Summary { total: 0.0 });
    }

    #[tokio::test]
    async fn sums_all_amounts() {
        let expenses = [
            Expense {
                id: 1,
                description: "Lunch".to_string(),
                amount: 10.0,
                category: Category::Food,
            },
            Expense {
                id: 2,
                description: "Plasters".to_string(),
                amount: 2.5,
                category: Category::Health,
            },
        ];
        let (_dir, state) = get_summary_state(&expenses);

        let response = get_summary_endpoint(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_summary(response).await, Summary { total: 12.5 });
    }
}
