//! Controlled form state for the category and expense modals.
//!
//! A form is built from optional initial data (edit mode when present,
//! create mode otherwise) and turned into a submission record. Forms never
//! talk to the backend.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::display::{self, DateError};
use crate::{Category, CategoryRequest, Expense, ExpenseRequest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Numeric input that is either empty or a finite number, never NaN
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AmountInput {
    #[default]
    Empty,
    Value(f64),
}

impl AmountInput {
    /// Anything that is not a finite number becomes `Empty`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => AmountInput::Value(value),
            _ => AmountInput::Empty,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            AmountInput::Empty => None,
            AmountInput::Value(value) => Some(*value),
        }
    }

    /// Text for the `value` attribute of the amount input
    pub fn input_value(&self) -> String {
        match self {
            AmountInput::Empty => String::new(),
            AmountInput::Value(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryForm {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub monthly_stats: BTreeMap<String, f64>,
}

impl CategoryForm {
    pub fn from_initial(initial: Option<&Category>) -> Self {
        match initial {
            Some(category) => Self {
                id: Some(category.id),
                name: category.name.clone(),
                description: category.description.clone(),
                monthly_stats: category.monthly_stats.clone(),
            },
            None => Self::default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_request(&self) -> Result<CategoryRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required("name"));
        }

        Ok(CategoryRequest {
            id: self.id,
            name: name.to_string(),
            description: self.description.clone(),
            monthly_stats: self.monthly_stats.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub id: Option<i64>,
    /// Owning category, only known in edit mode
    pub category_id: Option<i64>,
    pub name: String,
    pub amount: AmountInput,
    /// `YYYY-MM-DD`, the value of the date input
    pub date: String,
    pub description: String,
}

impl ExpenseForm {
    /// `today` fills the date in create mode and replaces an unreadable
    /// stored date in edit mode.
    pub fn from_initial(initial: Option<&Expense>, today: NaiveDate) -> Self {
        match initial {
            Some(expense) => Self {
                id: Some(expense.id),
                category_id: Some(expense.category_id),
                name: expense.name.clone(),
                amount: AmountInput::Value(expense.amount),
                date: display::timestamp_to_input_date(&expense.date, today),
                description: expense.description.clone(),
            },
            None => Self {
                id: None,
                category_id: None,
                name: String::new(),
                amount: AmountInput::Empty,
                date: display::input_date(today),
                description: String::new(),
            },
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.amount = AmountInput::parse(raw);
    }

    /// Assemble the submission record, converting the date to a timestamp.
    pub fn to_draft(&self) -> Result<ExpenseDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required("name"));
        }
        let amount = self.amount.value().ok_or(FormError::Required("amount"))?;
        if self.date.trim().is_empty() {
            return Err(FormError::Required("date"));
        }
        let date = display::to_iso_timestamp(&self.date)?;

        Ok(ExpenseDraft {
            id: self.id,
            category_id: self.category_id,
            name: name.to_string(),
            amount,
            date,
            description: self.description.clone(),
        })
    }
}

/// What the expense form emits on submit; the owner decides the category
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub id: Option<i64>,
    pub category_id: Option<i64>,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub description: String,
}

impl ExpenseDraft {
    pub fn into_request(self, category_id: i64) -> ExpenseRequest {
        ExpenseRequest {
            id: self.id,
            category_id,
            name: self.name,
            amount: self.amount,
            date: self.date,
            description: self.description,
        }
    }
}
