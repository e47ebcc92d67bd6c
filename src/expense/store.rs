//! File-backed storage for the expense collection.
//!
//! The expense file is the single source of truth: handlers load the full collection
//! at the start of a request and write the full collection back at the end. The store
//! itself holds no expenses in memory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    Error,
    expense::{Expense, ExpenseId},
};

/// Loads and persists the expense collection to a JSON file.
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store backed by the JSON file at `path`.
    ///
    /// The file is not created until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing expense file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full expense collection from the backing file.
    ///
    /// A missing file means no expenses have been recorded yet and yields an empty
    /// collection. A file that exists but cannot be read or parsed is an error, so
    /// that a corrupt file is never mistaken for an empty one and wiped on the next
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [Error::CorruptExpenseFile] if the file exists but could not be read
    /// or does not parse as an expense collection.
    pub fn load_all(&self) -> Result<Vec<Expense>, Error> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(Error::CorruptExpenseFile(error.to_string())),
        };

        serde_json::from_str(&contents)
            .map_err(|error| Error::CorruptExpenseFile(error.to_string()))
    }

    /// Overwrite the backing file with the full expense collection, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns [Error::SaveExpenses] if the file could not be written, for example
    /// when the disk is full or the path is not writable.
    pub fn save_all(&self, expenses: &[Expense]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|error| Error::SaveExpenses(error.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(expenses)
            .map_err(|error| Error::SaveExpenses(error.to_string()))?;

        fs::write(&self.path, contents).map_err(|error| Error::SaveExpenses(error.to_string()))
    }
}

/// The ID the next created expense should get: one more than the largest existing ID,
/// or 1 for an empty collection.
///
/// The ID is not reserved. Callers must persist the new expense while still holding
/// the store lock, otherwise two writers could be handed the same ID.
pub fn next_id(expenses: &[Expense]) -> ExpenseId {
    expenses
        .iter()
        .map(|expense| expense.id)
        .max()
        .map_or(1, |id| id + 1)
}

#[cfg(test)]
mod expense_store_tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::{
        Error,
        expense::{Category, Expense, store::ExpenseStore},
    };

    pub fn test_expense(id: i64) -> Expense {
        Expense {
            id,
            description: format!("Expense {id}"),
            amount: id as f64,
            category: Category::Others,
        }
    }

    #[test]
    fn load_all_returns_empty_for_missing_file() {
        let dir = tempdir().unwrap();
        let store = ExpenseStore::new(dir.path().join("expenses.json"));

        let expenses = store.load_all().expect("Could not load expenses");

        assert!(expenses.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = ExpenseStore::new(dir.path().join("expenses.json"));
        let expenses = vec![test_expense(1), test_expense(2)];

        store.save_all(&expenses).expect("Could not save expenses");
        let loaded = store.load_all().expect("Could not load expenses");

        assert_eq!(loaded, expenses);
    }

    #[test]
    fn save_all_pretty_prints_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.json");
        let store = ExpenseStore::new(&path);

        store
            .save_all(&[test_expense(1)])
            .expect("Could not save expenses");

        let contents = fs::read_to_string(&path).expect("Could not read expense file");
        assert!(contents.contains('\n'), "file is not pretty-printed");
        assert!(contents.trim_start().starts_with('['));
    }

    #[test]
    fn save_all_creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let store = ExpenseStore::new(dir.path().join("data").join("expenses.json"));

        store
            .save_all(&[test_expense(1)])
            .expect("Could not save expenses");

        assert_eq!(store.load_all().unwrap(), vec![test_expense(1)]);
    }

    #[test]
    fn load_all_surfaces_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, "{ not json ]").unwrap();
        let store = ExpenseStore::new(&path);

        let result = store.load_all();

        assert!(matches!(result, Err(Error::CorruptExpenseFile(_))));
    }

    #[test]
    fn load_all_accepts_string_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(
            &path,
            r#"[{"id": "7", "description": "Coffee", "amount": 3.5, "category": "Food"}]"#,
        )
        .unwrap();
        let store = ExpenseStore::new(&path);

        let expenses = store.load_all().expect("Could not load expenses");

        assert_eq!(expenses[0].id, 7);
    }

    #[test]
    fn save_all_fails_on_unwritable_path() {
        let dir = tempdir().unwrap();
        // The parent "path" is a regular file, so the write cannot succeed.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = ExpenseStore::new(blocker.join("expenses.json"));

        let result = store.save_all(&[test_expense(1)]);

        assert!(matches!(result, Err(Error::SaveExpenses(_))));
    }
}
