//! HTTP gateway for network-based backend calls

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::gateway::BackendGateway;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::models::{Category, DiningTable, MenuItem, QuickActionDef, TableStatus};
use shared::order::{Order, OrderCreate, QuickRequest, QuickRequestCreate};
use shared::{OrderStatus, RequestStatus};

/// Unified API response envelope
///
/// All backend responses follow this format:
/// ```json
/// {
///     "code": "OK",
///     "message": "Success",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// HTTP gateway over the hosted backend's REST API
///
/// This is the single deserialization boundary: malformed records are
/// rejected here instead of propagating half-parsed values into
/// rendering code.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpGateway {
    /// Create a new HTTP gateway from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.api_key.as_ref().map(|k| format!("Bearer {}", k))
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let mut request = self.client.patch(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request where the response carries no data
    async fn patch_unit<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let mut request = self.client.patch(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map error status codes, returning the response untouched on success
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Unavailable(format!("{}: {}", status, text))),
            };
        }

        Ok(response)
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let envelope: ApiResponse<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }
}

#[derive(Serialize)]
struct StatusUpdate<S: Serialize> {
    status: S,
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/api/categories").await
    }

    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.get("/api/menu-items").await
    }

    async fn list_quick_action_defs(&self) -> ClientResult<Vec<QuickActionDef>> {
        self.get("/api/quick-actions").await
    }

    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>> {
        self.get("/api/tables").await
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> ClientResult<Vec<Order>> {
        match status {
            Some(status) => self.get(&format!("/api/orders?status={}", status)).await,
            None => self.get("/api/orders").await,
        }
    }

    async fn create_order(&self, order: OrderCreate) -> ClientResult<Order> {
        self.post("/api/orders", &order).await
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        self.patch(&format!("/api/orders/{}/status", id), &StatusUpdate { status })
            .await
    }

    async fn list_quick_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> ClientResult<Vec<QuickRequest>> {
        match status {
            Some(status) => {
                self.get(&format!("/api/quick-requests?status={}", status))
                    .await
            }
            None => self.get("/api/quick-requests").await,
        }
    }

    async fn create_quick_request(
        &self,
        request: QuickRequestCreate,
    ) -> ClientResult<QuickRequest> {
        self.post("/api/quick-requests", &request).await
    }

    async fn update_quick_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> ClientResult<QuickRequest> {
        self.patch(
            &format!("/api/quick-requests/{}/status", id),
            &StatusUpdate { status },
        )
        .await
    }

    async fn update_table_status(
        &self,
        table_number: &str,
        status: TableStatus,
    ) -> ClientResult<()> {
        self.patch_unit(
            &format!("/api/tables/{}/status", table_number),
            &StatusUpdate { status },
        )
        .await
    }
}
