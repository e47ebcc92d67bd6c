//! The expense feature: domain types, the file-backed store, and the endpoints for
//! listing, creating, updating, deleting, and summarizing expenses.

mod create;
mod delete;
mod domain;
mod list;
pub(crate) mod store;
mod summary;
mod update;

pub use create::{CreateExpenseState, create_expense_endpoint};
pub use delete::{DeleteExpenseState, delete_expense_endpoint};
pub use domain::{
    Category, Expense, ExpenseId, ExpensePayload, MAX_DESCRIPTION_LENGTH, NewExpense,
};
pub use list::{ListExpensesState, get_categories_endpoint, list_expenses_endpoint};
pub use store::{ExpenseStore, next_id};
pub use summary::{Summary, SummaryState, get_summary_endpoint};
pub use update::{UpdateExpenseState, update_expense_endpoint};
