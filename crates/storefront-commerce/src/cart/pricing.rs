//! Cart totals.

use crate::ids::LineItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Amount due. Equal to the subtotal; shipping and tax are not modelled.
    pub grand_total: Money,
    /// Sum of quantities.
    pub item_count: i64,
    pub line_items: Vec<LineItemPricing>,
}

/// Pricing for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub line_item_id: LineItemId,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub total: Money,
}

impl CartPricing {
    /// Grand total formatted for the checkout button.
    pub fn display_total(&self) -> String {
        self.grand_total.display()
    }
}
