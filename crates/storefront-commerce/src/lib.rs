//! Storefront domain types and logic.
//!
//! - **Catalog**: variants, option dimensions, selection resolution, price
//!   projection and the product-details session
//! - **Cart**: line items built from product pages, totals, persistence
//! - **Address**: saved shipping addresses with validation
//! - **Favorites**: per-user saved products
//! - **Store**: the key-value seam the above persist through
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let inr = |cents| Money::new(cents, Currency::INR);
//! let variants = vec![
//!     Variant::new("v-s", "ring", inr(1000)).with_option(OptionSlot::Option1, "S"),
//!     Variant::new("v-m", "ring", inr(1200))
//!         .with_option(OptionSlot::Option1, "M")
//!         .with_sale_price(inr(900)),
//! ];
//!
//! let mut details =
//!     ProductDetails::with_catalog(ProductSummary::new("ring", "Silver Ring", inr(0)), variants);
//! details.select_option("Size", "M");
//!
//! let price = details.price();
//! assert!(price.is_discounted);
//! assert_eq!(price.display_price.display(), "₹9.00");
//!
//! let mut cart = Cart::new(Currency::INR);
//! cart.add(details.add_to_cart_request().unwrap()).unwrap();
//! assert_eq!(cart.calculate_pricing().unwrap().grand_total, inr(900));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod address;
pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Commonly used types.
pub mod prelude {
    pub use crate::address::{Address, AddressBook, AddressInput};
    pub use crate::cart::{AddToCartRequest, Cart, CartPricing, CartRepository, LineItem};
    pub use crate::catalog::{
        DetailsEvent, OptionDimension, OptionSlot, PriceProjection, ProductDetails,
        ProductSummary, SelectionPhase, Selections, UpdateQueue, Variant,
    };
    pub use crate::error::CommerceError;
    pub use crate::favorites::{Favorite, Favorites};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::store::{JsonFileStore, KvStore, MemoryStore};
}
