use async_trait::async_trait;

use crate::error::{FetchError, SubmitError};
use crate::models::Order;

/// Read access to the remote order service.
#[async_trait]
pub trait OrderReader: Send + Sync {
    /// Fetches the full order collection, in server order.
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError>;

    /// Fetches a single order by id. An unknown id surfaces as
    /// `FetchError::Status(404)`.
    async fn fetch_order(&self, id: i64) -> Result<Order, FetchError>;
}

/// Write access to the remote order service.
#[async_trait]
pub trait OrderWriter: Send + Sync {
    /// Creates one order for `item_count` items. A single attempt, no retry.
    /// Returns the created order's id when the service includes one in its
    /// response; the body is not required.
    async fn submit_order(&self, item_count: u32) -> Result<Option<i64>, SubmitError>;
}
