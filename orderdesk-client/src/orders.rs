//! HTTP client for the remote order service.

use std::time::Duration;

use async_trait::async_trait;

use orderdesk_core::{FetchError, Order, OrderReader, OrderWriter, SubmitError};

use crate::wire::{CreateOrderRequest, CreatedOrderDto, Envelope, OrderDto};

/// Client for the order service REST API. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Clone)]
pub struct OrdersClient {
    http: reqwest::Client,
    base_url: String,
}

impl OrdersClient {
    /// Creates a client against `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Probes the service health endpoint. Any 2xx answer counts as healthy.
    pub async fn check_health(&self) -> Result<(), FetchError> {
        let url = format!("{}/health", self.base_url);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(())
    }

    async fn get_data<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|err| FetchError::Parse(err.to_string()))?;

        envelope
            .data
            .ok_or_else(|| FetchError::Parse("response envelope has no `data` payload".to_string()))
    }
}

#[async_trait]
impl OrderReader for OrdersClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        let url = format!("{}/orders", self.base_url);
        let dtos: Vec<OrderDto> = self.get_data(&url).await?;
        Ok(dtos.into_iter().map(Order::from).collect())
    }

    async fn fetch_order(&self, id: i64) -> Result<Order, FetchError> {
        let url = format!("{}/orders/{}", self.base_url, id);
        let dto: OrderDto = self.get_data(&url).await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl OrderWriter for OrdersClient {
    async fn submit_order(&self, item_count: u32) -> Result<Option<i64>, SubmitError> {
        let url = format!("{}/orders", self.base_url);
        tracing::debug!("POST {} ({} items)", url, item_count);

        let response = self
            .http
            .post(&url)
            .json(&CreateOrderRequest {
                number_of_items: item_count,
            })
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        // The created id is a convenience; a service that answers 2xx with
        // an empty or unreadable body still counts as success.
        let created = match response.json::<Envelope<CreatedOrderDto>>().await {
            Ok(envelope) => envelope.data.map(|dto| dto.id),
            Err(_) => None,
        };
        Ok(created)
    }
}
