//! Implements a struct that holds the state of the REST server.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::expense::ExpenseStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store for the expense file.
    ///
    /// The mutex serializes each handler's load-mutate-save cycle so that two
    /// concurrent mutating requests cannot overwrite each other's changes.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl AppState {
    /// Create a new [AppState] with an expense store backed by the file at
    /// `expense_file`.
    ///
    /// The file does not need to exist yet; it is created on the first write.
    pub fn new(expense_file: impl Into<PathBuf>) -> Self {
        Self {
            expense_store: Arc::new(Mutex::new(ExpenseStore::new(expense_file))),
        }
    }
}
