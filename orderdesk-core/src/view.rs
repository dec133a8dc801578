use chrono::DateTime;

use crate::models::{Order, ShippingAllocation};

/// Timestamp layout used by the order table, e.g. "Apr 09, 2024 10:30".
const CREATED_AT_FORMAT: &str = "%b %d, %Y %H:%M";

/// One renderable line of the order table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: i64,
    pub item_count: u32,
    pub created_at_display: String,
    /// One entry per shipping allocation, server order preserved;
    /// `["-"]` when the order has none.
    pub packaging_summary: Vec<String>,
}

/// Derives the renderable rows for the order table.
///
/// Pure: no IO, no shared state, and the same input sequence always yields
/// the same rows.
pub fn render_rows(orders: &[Order]) -> Vec<OrderRow> {
    orders
        .iter()
        .map(|order| OrderRow {
            id: order.id,
            item_count: order.number_of_items,
            created_at_display: format_created_at(&order.created_at),
            packaging_summary: packaging_summary(&order.shipping),
        })
        .collect()
}

/// Formats an ISO-8601 timestamp for display. Anything that does not parse
/// is shown raw rather than dropped.
fn format_created_at(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(created_at) => created_at.format(CREATED_AT_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

fn packaging_summary(shipping: &[ShippingAllocation]) -> Vec<String> {
    if shipping.is_empty() {
        return vec!["-".to_string()];
    }
    shipping
        .iter()
        .map(|allocation| format!("{} X {}", allocation.quantity, allocation.pack_size))
        .collect()
}
