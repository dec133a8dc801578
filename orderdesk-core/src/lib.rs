pub mod error;
pub mod gateway;
pub mod models;
pub mod view;

pub use error::{FetchError, FetchErrorKind, SubmitError};
pub use gateway::{OrderReader, OrderWriter};
pub use models::{Order, ShippingAllocation};
pub use view::{render_rows, OrderRow};
