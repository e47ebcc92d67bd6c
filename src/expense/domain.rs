//! Core expense domain types and payload validation.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// Identifier for an expense.
pub type ExpenseId = i64;

/// The longest allowed expense description, measured in grapheme clusters.
pub const MAX_DESCRIPTION_LENGTH: usize = 40;

/// The fixed, closed set of expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, restaurants, takeaways.
    Food,
    /// Entertainment, hobbies, trips.
    Leisure,
    /// Gadgets and appliances.
    Electronics,
    /// Subscriptions, utilities, fees.
    Services,
    /// Clothes and footwear.
    Clothing,
    /// Medical and wellbeing costs.
    Health,
    /// Anything that fits nowhere else.
    Others,
}

impl Category {
    /// Every category, in the order they are presented to clients.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Leisure,
        Category::Electronics,
        Category::Services,
        Category::Clothing,
        Category::Health,
        Category::Others,
    ];

    /// The category label as it appears on the wire and in the expense file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Leisure => "Leisure",
            Category::Electronics => "Electronics",
            Category::Services => "Services",
            Category::Clothing => "Clothing",
            Category::Health => "Health",
            Category::Others => "Others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(Error::InvalidCategory)
    }
}

/// A single expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The store-assigned identifier. Immutable after creation.
    #[serde(deserialize_with = "deserialize_expense_id")]
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent. Always greater than zero.
    pub amount: f64,
    /// Which category the expense belongs to.
    pub category: Category,
}

/// Accept an expense ID as either a JSON number or a numeric string.
///
/// Hand-edited expense files sometimes carry `"id": "3"`. IDs are compared
/// numerically everywhere, so the representation is normalized here at the parse
/// boundary.
fn deserialize_expense_id<'de, D>(deserializer: D) -> Result<ExpenseId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(ExpenseId),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(id) => Ok(id),
        NumberOrText::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// The raw JSON body of a create or update request.
///
/// All fields deserialize as optional [Value]s so that presence and JSON type can be
/// checked explicitly by [ExpensePayload::validate] rather than rejected up front by
/// serde with a generic message.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpensePayload {
    /// The claimed amount, if any.
    #[serde(default)]
    pub amount: Option<Value>,
    /// The claimed description, if any.
    #[serde(default)]
    pub description: Option<Value>,
    /// The claimed category, if any.
    #[serde(default)]
    pub category: Option<Value>,
}

/// A validated expense body, ready to be given an ID and persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// Which category the expense belongs to.
    pub category: Category,
}

impl NewExpense {
    /// Attach a store-assigned ID, producing a persistable [Expense].
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
        }
    }
}

impl ExpensePayload {
    /// Check the payload against the expense rules, in order, first failure wins.
    ///
    /// # Errors
    ///
    /// - [Error::MissingFields] if any of the three fields is absent, null, or an
    ///   empty string.
    /// - [Error::InvalidAmount] if the amount is not a number greater than zero.
    /// - [Error::InvalidDescription] if the description is not a string of 1 to 40
    ///   characters.
    /// - [Error::InvalidCategory] if the category is not one of [Category::ALL].
    pub fn validate(&self) -> Result<NewExpense, Error> {
        let (amount, description, category) =
            match (&self.amount, &self.description, &self.category) {
                (Some(amount), Some(description), Some(category))
                    if !is_blank(amount) && !is_blank(description) && !is_blank(category) =>
                {
                    (amount, description, category)
                }
                _ => return Err(Error::MissingFields),
            };

        let amount = amount
            .as_f64()
            .filter(|&amount| amount > 0.0)
            .ok_or(Error::InvalidAmount)?;

        let description = description.as_str().ok_or(Error::InvalidDescription)?;
        let length = description.graphemes(true).count();
        if length == 0 || length > MAX_DESCRIPTION_LENGTH {
            return Err(Error::InvalidDescription);
        }

        let category = category
            .as_str()
            .ok_or(Error::InvalidCategory)?
            .parse::<Category>()?;

        Ok(NewExpense {
            description: description.to_owned(),
            amount,
            category,
        })
    }
}

fn is_blank(value: &Value) -> bool {
    value.is_null() || value.as_str().is_some_and(str::is_empty)
}


#[cfg(test)]
mod expense_id_tests {
    use crate::expense::Expense;

    #[test]
    fn id_deserializes_from_number() {
        let expense: Expense = serde_json::from_str(
            r#"{"id": 3, "description": "Coffee", "amount": 3.5, "category": "Food"}"#,
        )
        .unwrap();

        assert_eq!(expense.id, 3);
    }

    #[test]
    fn id_deserializes_from_numeric_string() {
        let expense: Expense = serde_json::from_str(
            r#"{"id": "3", "description": "Coffee", "amount": 3.5, "category": "Food"}"#,
        )
        .unwrap();

        assert_eq!(expense.id, 3);
    }

    #[test]
    fn id_rejects_non_numeric_string() {
        let result = serde_json::from_str::<Expense>(
            r#"{"id": "three", "description": "Coffee", "amount": 3.5, "category": "Food"}"#,
        );

        assert!(result.is_err());
    }
}
