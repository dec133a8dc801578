//! Wire types for the remote order service.
//!
//! Every response is wrapped in a `{ data, message, error }` envelope; only
//! the fields the console consumes are modelled and unknown fields are
//! ignored.

use serde::{Deserialize, Serialize};

use orderdesk_core::models::{Order, ShippingAllocation};

/// Response envelope. `data` carries the payload; a missing or null `data`
/// is treated as a malformed payload by the read path.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderDto {
    pub id: i64,
    pub number_of_items: u32,
    pub created_at: String,
    /// Omitted or null when the order has no packaging breakdown.
    #[serde(default)]
    pub shipping: Option<Vec<ShippingAllocationDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingAllocationDto {
    pub pack_size: u32,
    #[serde(rename = "shipping_pack_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderRequest {
    pub number_of_items: u32,
}

/// Body of a successful creation, when the service sends one.
#[derive(Debug, Deserialize)]
pub struct CreatedOrderDto {
    pub id: i64,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Order {
            id: dto.id,
            number_of_items: dto.number_of_items,
            created_at: dto.created_at,
            shipping: dto
                .shipping
                .unwrap_or_default()
                .into_iter()
                .map(ShippingAllocation::from)
                .collect(),
        }
    }
}

impl From<ShippingAllocationDto> for ShippingAllocation {
    fn from(dto: ShippingAllocationDto) -> Self {
        ShippingAllocation {
            pack_size: dto.pack_size,
            quantity: dto.quantity,
        }
    }
}
