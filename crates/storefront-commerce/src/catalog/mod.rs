//! Product catalog module.
//!
//! Variant records, option extraction, selection resolution, price
//! projection and the product-details session that ties them together.

mod details;
mod options;
mod pricing;
mod selection;
mod variant;

pub use details::{DetailsEvent, ProductDetails, SelectionPhase, UpdateQueue};
pub use options::{extract, OptionDimension, OptionSlot};
pub use pricing::{project, PriceProjection};
pub use selection::{matches, resolve, resolve_position, seed_defaults, Selections};
pub use variant::{ProductSummary, Variant};
