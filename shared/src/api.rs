//! Backend contract: endpoint paths, the error taxonomy and the `ExpenseApi`
//! trait the command layer is written against.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{ApiResponse, Category, CategoryRequest, Expense, ExpenseRequest, Statistics};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never got a response
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx HTTP status
    #[error("server error {status}: {message}")]
    Status { status: u16, message: String },
    /// Reachable backend answered with a non-success envelope
    #[error("request rejected with status `{status}`: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: String,
        message: Option<String>,
    },
    #[error("failed to serialize request: {0}")]
    Encode(String),
    #[error("failed to parse response: {0}")]
    Decode(String),
    /// Successful envelope without the payload the endpoint must return
    #[error("response for {0} carried no data")]
    MissingData(&'static str),
}

/// Everything the client needs from the backend.
///
/// Futures are not `Send`: the browser implementation runs on the single
/// event-loop thread.
#[async_trait(?Send)]
pub trait ExpenseApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn get_statistics(&self) -> Result<Statistics, ApiError>;
    async fn list_expenses(&self, category_id: i64) -> Result<Vec<Expense>, ApiError>;
    async fn create_category(&self, request: &CategoryRequest) -> Result<(), ApiError>;
    async fn update_category(&self, id: i64, request: &CategoryRequest) -> Result<(), ApiError>;
    async fn delete_category(&self, id: i64) -> Result<(), ApiError>;
    async fn create_expense(&self, request: &ExpenseRequest) -> Result<(), ApiError>;
    async fn update_expense(&self, id: i64, request: &ExpenseRequest) -> Result<(), ApiError>;
    async fn delete_expense(&self, id: i64) -> Result<(), ApiError>;
}

/// URL builder for the REST resources under one base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn categories(&self) -> String {
        format!("{}/categories", self.base_url)
    }

    pub fn category(&self, id: i64) -> String {
        format!("{}/categories/{}", self.base_url, id)
    }

    pub fn expenses(&self) -> String {
        format!("{}/expenses", self.base_url)
    }

    pub fn expenses_for_category(&self, category_id: i64) -> String {
        format!("{}/expenses?categoryId={}", self.base_url, category_id)
    }

    pub fn expense(&self, id: i64) -> String {
        format!("{}/expenses/{}", self.base_url, id)
    }

    pub fn statistics(&self) -> String {
        format!("{}/statistics", self.base_url)
    }
}

/// Decode an HTTP response body into the envelope payload.
///
/// Non-2xx statuses become `ApiError::Status`, using the envelope message
/// when the body carries one.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        return Err(ApiError::Status { status, message });
    }

    let envelope: ApiResponse<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    envelope.into_data()
}
