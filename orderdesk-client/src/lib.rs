pub mod orders;
pub mod wire;

pub use orders::OrdersClient;
