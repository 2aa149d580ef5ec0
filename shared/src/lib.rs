use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub mod api;
pub mod commands;
pub mod display;
pub mod forms;
pub mod state;
pub mod statistics;

pub use api::{ApiError, ExpenseApi};
pub use display::DisplayLocale;
pub use forms::{AmountInput, CategoryForm, ExpenseDraft, ExpenseForm, FormError};
pub use state::{reduce, Action, ActiveView, AppState, Notification, NotificationLevel};
pub use statistics::{CategoryFilter, ChartRow, Series, StatisticsView};

/// Status value the backend puts in every successful envelope
pub const SUCCESS_STATUS: &str = "success";

/// Currency suffix used for every rendered amount
pub const CURRENCY_SYMBOL: &str = "₽";

/// Reads `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named grouping of expenses with server-computed aggregates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Optional free text, empty when the backend has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Sum of all expenses in this category
    #[serde(default)]
    pub total_amount: f64,
    /// Expenses attached by the backend; only the count is displayed
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub expenses: Vec<Expense>,
    /// Spending per `YYYY-MM` month key
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_stats: BTreeMap<String, f64>,
}

impl Category {
    /// Number of expense records shown on the category card
    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }
}

/// A single dated spending record under one category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub amount: f64,
    /// RFC 3339 timestamp as sent by the backend
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Per-category slice of the statistics snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_stats: BTreeMap<String, f64>,
}

impl CategoryStat {
    /// Amount of the most recent month present in `monthly_stats`, 0 when empty
    pub fn latest_month_amount(&self) -> f64 {
        self.monthly_stats
            .iter()
            .next_back()
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    }

    /// Amount for one `YYYY-MM` key, 0 when the category had no spending
    pub fn amount_for_month(&self, month: &str) -> f64 {
        self.monthly_stats.get(month).copied().unwrap_or(0.0)
    }
}

/// Server-computed aggregates, consumed read-only.
///
/// `Default` is the snapshot shown when the statistics request fails:
/// zero totals, no category stats and no months.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub current_month_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_stats: Vec<CategoryStat>,
    /// Month total keyed by `YYYY-MM`; key order is chronological order
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_totals: BTreeMap<String, f64>,
}

impl Statistics {
    pub fn category_stat(&self, category_id: i64) -> Option<&CategoryStat> {
        self.category_stats.iter().find(|stat| stat.id == category_id)
    }
}

/// The `{status, message, data}` wrapper every API response uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Unwrap the envelope, turning a non-success status into an error.
    /// Successful envelopes may still carry no data (mutations, empty lists).
    pub fn into_data(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                status: self.status,
                message: self.message.filter(|m| !m.is_empty()),
            })
        }
    }
}

/// Body of `POST /categories` and `PUT /categories/{id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub monthly_stats: BTreeMap<String, f64>,
}

/// Body of `POST /expenses` and `PUT /expenses/{id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub category_id: i64,
    pub name: String,
    pub amount: f64,
    /// Full ISO timestamp, e.g. `2024-01-10T00:00:00.000Z`
    pub date: String,
    pub description: String,
}
