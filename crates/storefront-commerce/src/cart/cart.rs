//! Cart and line item types.

use crate::cart::{CartPricing, LineItemPricing};
use crate::catalog::Selections;
use crate::error::CommerceError;
use crate::ids::{current_timestamp, LineItemId, ProductId, UserId, VariantId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Payload produced by the product-details screen on "add to cart".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    /// The resolved variant.
    pub item_id: VariantId,
    /// Product title, denormalized for display.
    pub title: String,
    /// Display price at the time of adding (sale price when discounted).
    pub unit_price: Money,
    pub quantity: i64,
    /// Variant SKU, else product SKU, else empty.
    pub sku: String,
    pub image: Option<String>,
    /// Options chosen when adding.
    pub options: Selections,
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Owner of the cart, if signed in.
    pub user_id: Option<UserId>,
    pub items: Vec<LineItem>,
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            user_id: None,
            items: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn for_user(user_id: UserId, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        cart.user_id = Some(user_id);
        cart
    }

    /// Add the payload from a product page.
    ///
    /// Adding an item already in the cart with the same options increases
    /// its quantity. Fails on non-positive quantities, quantities above
    /// [`MAX_QUANTITY_PER_ITEM`], a price in another currency, or overflow.
    pub fn add(&mut self, request: AddToCartRequest) -> Result<LineItemId, CommerceError> {
        if request.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(request.quantity));
        }
        if request.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: request.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.item_id == request.item_id && i.options == request.options)
        {
            let new_quantity = existing
                .quantity
                .checked_add(request.quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            existing.update_total()?;
            let id = existing.id.clone();
            info!(item_id = %request.item_id, quantity = new_quantity, "increased cart line quantity");
            self.updated_at = current_timestamp();
            return Ok(id);
        }

        if request.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                request.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = LineItem::from_request(request)?;
        let id = item.id.clone();
        info!(item_id = %item.item_id, quantity = item.quantity, "added cart line");
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// Returns whether a line was changed.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(line_item_id));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.id == line_item_id) {
            Some(item) => {
                item.quantity = quantity;
                item.update_total()?;
                self.updated_at = current_timestamp();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Totals and per-line breakdown.
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let line_items = self
            .items
            .iter()
            .map(|item| LineItemPricing {
                line_item_id: item.id.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total: item.total_price,
            })
            .collect();

        let subtotal = Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            subtotal,
            grand_total: subtotal,
            item_count: self.item_count(),
            line_items,
        })
    }

    /// Merge a guest cart into this one, capping merged quantities.
    ///
    /// A cart in another currency is rejected before any line is touched.
    pub fn merge(&mut self, other: Cart) -> Result<(), CommerceError> {
        if other.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        for item in other.items {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.item_id == item.item_id && i.options == item.options)
            {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                existing.update_total()?;
            } else {
                self.items.push(item);
            }
        }
        self.updated_at = current_timestamp();
        Ok(())
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub item_id: VariantId,
    pub title: String,
    pub sku: String,
    pub image: Option<String>,
    pub options: Selections,
    pub quantity: i64,
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub total_price: Money,
}

impl LineItem {
    pub fn from_request(request: AddToCartRequest) -> Result<Self, CommerceError> {
        let total_price = request
            .unit_price
            .try_multiply(request.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: LineItemId::generate(),
            product_id: request.product_id,
            item_id: request.item_id,
            title: request.title,
            sku: request.sku,
            image: request.image,
            options: request.options,
            quantity: request.quantity,
            unit_price: request.unit_price,
            total_price,
        })
    }

    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }

    /// Option summary, e.g. "Color: Red, Size: M".
    pub fn options_label(&self) -> String {
        self.options
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
