use serde::{Deserialize, Serialize};

/// A customer request for a quantity of items, as held by the remote order
/// service. Identifier and timestamp are server-assigned and immutable.
///
/// `created_at` is kept as the raw wire string: formatting it is a display
/// concern (see [`crate::view`]), and an unparseable timestamp must still be
/// renderable as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub number_of_items: u32,
    pub created_at: String,
    /// Packaging breakdown computed server-side; may be empty. The server's
    /// ordering is display-relevant and preserved.
    pub shipping: Vec<ShippingAllocation>,
}

impl Order {
    pub fn new(id: i64, number_of_items: u32, created_at: impl Into<String>) -> Self {
        Self {
            id,
            number_of_items,
            created_at: created_at.into(),
            shipping: Vec::new(),
        }
    }
}

/// One packaging line: how many packs of a given size fulfil part of an
/// order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingAllocation {
    pub pack_size: u32,
    pub quantity: u32,
}

impl ShippingAllocation {
    pub fn new(pack_size: u32, quantity: u32) -> Self {
        Self { pack_size, quantity }
    }
}
