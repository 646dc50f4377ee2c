//! Shopping cart module.
//!
//! Cart lines built from product-page payloads, totals, and per-user
//! persistence.

mod cart;
mod pricing;
mod repository;

pub use cart::{AddToCartRequest, Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing};
pub use repository::CartRepository;
