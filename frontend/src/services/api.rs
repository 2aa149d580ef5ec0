use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{decode_response, Endpoints};
use shared::{
    ApiError, Category, CategoryRequest, Expense, ExpenseApi, ExpenseRequest, Statistics,
};

/// API client for communicating with the backend server
#[derive(Debug, Clone, PartialEq)]
pub struct HttpApiClient {
    endpoints: Endpoints,
}

impl HttpApiClient {
    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        self.endpoints.base_url()
    }

    async fn read<T: DeserializeOwned>(
        sent: Result<Response, gloo::net::Error>,
    ) -> Result<Option<T>, ApiError> {
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode_response(status, &body)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, ApiError> {
        Self::read(Request::get(url).send().await).await
    }

    async fn delete(&self, url: &str) -> Result<(), ApiError> {
        Self::read::<serde_json::Value>(Request::delete(url).send().await).await?;
        Ok(())
    }

    async fn post<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        let request = Request::post(url)
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        Self::read::<serde_json::Value>(request.send().await).await?;
        Ok(())
    }

    async fn put<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        let request = Request::put(url)
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        Self::read::<serde_json::Value>(request.send().await).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl ExpenseApi for HttpApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        // The backend sends `data: null` for an empty table
        Ok(self
            .get::<Vec<Category>>(&self.endpoints.categories())
            .await?
            .unwrap_or_default())
    }

    async fn get_statistics(&self) -> Result<Statistics, ApiError> {
        self.get::<Statistics>(&self.endpoints.statistics())
            .await?
            .ok_or(ApiError::MissingData("statistics"))
    }

    async fn list_expenses(&self, category_id: i64) -> Result<Vec<Expense>, ApiError> {
        Ok(self
            .get::<Vec<Expense>>(&self.endpoints.expenses_for_category(category_id))
            .await?
            .unwrap_or_default())
    }

    async fn create_category(&self, request: &CategoryRequest) -> Result<(), ApiError> {
        self.post(&self.endpoints.categories(), request).await
    }

    async fn update_category(&self, id: i64, request: &CategoryRequest) -> Result<(), ApiError> {
        self.put(&self.endpoints.category(id), request).await
    }

    async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.category(id)).await
    }

    async fn create_expense(&self, request: &ExpenseRequest) -> Result<(), ApiError> {
        self.post(&self.endpoints.expenses(), request).await
    }

    async fn update_expense(&self, id: i64, request: &ExpenseRequest) -> Result<(), ApiError> {
        self.put(&self.endpoints.expense(id), request).await
    }

    async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.expense(id)).await
    }
}
