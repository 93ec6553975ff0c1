//! Newtype wrappers shared across ShopHub crates.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use category::Category;
pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, UserId};
pub use price::{Price, PriceError};
pub use status::{OrderStatus, Role};
