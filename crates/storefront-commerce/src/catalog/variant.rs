//! Product and purchasable item (variant) records.

use crate::catalog::OptionSlot;
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product-level data shown on the details screen.
///
/// The price fields are fallbacks used when no variant resolves or the
/// resolved variant carries no usable price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    /// Fallback regular price. Zero means "no price".
    pub price: Money,
    /// Fallback sale price.
    #[serde(default)]
    pub sale_price: Option<Money>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Primary image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductSummary {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            sale_price: None,
            sku: None,
            image: None,
        }
    }
}

/// A purchasable item of a product.
///
/// Option values live in three positional slots; see [`OptionSlot`] for
/// the fixed labels they map to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    pub price: Money,
    /// Only an active discount when positive and below `price`.
    #[serde(default)]
    pub sale_price: Option<Money>,
    #[serde(default)]
    pub sku: Option<String>,
}

impl Variant {
    pub fn new(id: impl Into<VariantId>, product_id: impl Into<ProductId>, price: Money) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            option1: None,
            option2: None,
            option3: None,
            price,
            sale_price: None,
            sku: None,
        }
    }

    /// Set the value held in `slot`.
    pub fn with_option(mut self, slot: OptionSlot, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match slot {
            OptionSlot::Option1 => self.option1 = value,
            OptionSlot::Option2 => self.option2 = value,
            OptionSlot::Option3 => self.option3 = value,
        }
        self
    }

    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Value held in `slot`; empty strings count as unpopulated.
    pub fn option(&self, slot: OptionSlot) -> Option<&str> {
        let value = match slot {
            OptionSlot::Option1 => &self.option1,
            OptionSlot::Option2 => &self.option2,
            OptionSlot::Option3 => &self.option3,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Whether any slot is populated.
    pub fn has_options(&self) -> bool {
        OptionSlot::ALL.iter().any(|slot| self.option(*slot).is_some())
    }

    /// Display name built from populated slots, e.g. "M / Red".
    pub fn build_name(&self) -> String {
        let parts: Vec<&str> = OptionSlot::ALL
            .iter()
            .filter_map(|slot| self.option(*slot))
            .collect();
        if parts.is_empty() {
            "Default".to_string()
        } else {
            parts.join(" / ")
        }
    }
}
