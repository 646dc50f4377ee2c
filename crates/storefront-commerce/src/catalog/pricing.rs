//! Displayed price for the active variant.

use crate::catalog::Variant;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Price values the details screen renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceProjection {
    /// Regular price. Zero means there is no price to show.
    pub base_price: Money,
    /// Price the customer pays: the sale price when discounted.
    pub display_price: Money,
    pub is_discounted: bool,
}

impl PriceProjection {
    /// Whether a price should be rendered at all.
    pub fn is_displayable(&self) -> bool {
        self.base_price.is_positive()
    }

    /// Amount saved against the regular price.
    pub fn savings(&self) -> Option<Money> {
        if !self.is_discounted {
            return None;
        }
        Some(Money::new(
            self.base_price.amount_cents - self.display_price.amount_cents,
            self.base_price.currency,
        ))
    }
}

/// Compute the displayed price for `resolved`, falling back to product-level
/// prices when the variant has none.
///
/// Non-positive regular prices count as absent at both levels. The product
/// sale price stands in only when the variant's is missing or zero; a
/// negative variant sale price disables the discount.
pub fn project(
    resolved: Option<&Variant>,
    fallback_price: Money,
    fallback_sale_price: Option<Money>,
) -> PriceProjection {
    let base_price = resolved
        .map(|v| v.price)
        .filter(Money::is_positive)
        .or_else(|| Some(fallback_price).filter(Money::is_positive))
        .unwrap_or_else(|| Money::zero(fallback_price.currency));

    let sale_price = match resolved.and_then(|v| v.sale_price) {
        Some(sale) if !sale.is_zero() => Some(sale),
        _ => fallback_sale_price,
    }
    .filter(Money::is_positive);

    match sale_price {
        Some(sale) if sale < base_price => PriceProjection {
            base_price,
            display_price: sale,
            is_discounted: true,
        },
        _ => PriceProjection {
            base_price,
            display_price: base_price,
            is_discounted: false,
        },
    }
}
