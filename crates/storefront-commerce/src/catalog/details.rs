//! Product-details session: the selection state behind one product view.
//!
//! The session owns the catalog handed over by the data layer and the
//! user's option choices. Every change goes through [`ProductDetails::apply`],
//! which re-derives dimensions, re-seeds defaults and re-resolves the active
//! variant before returning. Callers that receive catalog updates and user
//! edits from different sources push both into an [`UpdateQueue`] and drain
//! it on one thread, so a late catalog never clobbers a newer selection.

use std::collections::VecDeque;

use crate::cart::AddToCartRequest;
use crate::catalog::{
    extract, project, resolve_position, seed_defaults, OptionDimension, PriceProjection,
    ProductSummary, Selections, Variant,
};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the selection lifecycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SelectionPhase {
    /// No catalog yet, nothing selected.
    #[default]
    Empty,
    /// Defaults seeded from the catalog.
    Seeded,
    /// The user has picked at least one option.
    Edited,
}

/// Input to a product-details session.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsEvent {
    /// A (re)loaded variant list for the product.
    CatalogLoaded(Vec<Variant>),
    /// The user picked `value` for dimension `name`.
    OptionSelected { name: String, value: String },
    /// The quantity stepper changed.
    QuantityChanged(i64),
}

/// Selection state for one product view.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    product: ProductSummary,
    variants: Vec<Variant>,
    dimensions: Vec<OptionDimension>,
    selections: Selections,
    resolved: Option<usize>,
    quantity: i64,
    phase: SelectionPhase,
}

impl ProductDetails {
    /// Start a session before the catalog has arrived.
    pub fn new(product: ProductSummary) -> Self {
        Self {
            product,
            variants: Vec::new(),
            dimensions: Vec::new(),
            selections: Selections::new(),
            resolved: None,
            quantity: 1,
            phase: SelectionPhase::Empty,
        }
    }

    /// Start a session with the catalog already loaded.
    pub fn with_catalog(product: ProductSummary, variants: Vec<Variant>) -> Self {
        let mut details = Self::new(product);
        details.load_catalog(variants);
        details
    }

    pub fn apply(&mut self, event: DetailsEvent) {
        match event {
            DetailsEvent::CatalogLoaded(variants) => self.load_catalog(variants),
            DetailsEvent::OptionSelected { name, value } => self.select_option(name, value),
            DetailsEvent::QuantityChanged(quantity) => self.set_quantity(quantity),
        }
    }

    /// Replace the catalog. Prior choices are kept; missing dimensions are
    /// seeded with their first value.
    pub fn load_catalog(&mut self, variants: Vec<Variant>) {
        self.variants = variants;
        let dimensions = extract(&self.variants);
        if dimensions != self.dimensions {
            self.selections = seed_defaults(&dimensions, &self.selections);
            self.dimensions = dimensions;
        }
        if self.phase == SelectionPhase::Empty && !self.variants.is_empty() {
            self.phase = SelectionPhase::Seeded;
        }
        self.recompute();
    }

    pub fn select_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.selections.select(name, value);
        self.phase = SelectionPhase::Edited;
        self.recompute();
    }

    /// Set the quantity, clamped to at least one.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.max(1);
    }

    fn recompute(&mut self) {
        self.resolved = resolve_position(&self.variants, &self.selections);
        let price = self.price();
        debug!(
            product_id = %self.product.id,
            variant_id = self.resolved_variant().map(|v| v.id.as_str()),
            selections = ?self.selections,
            base_cents = price.base_price.amount_cents,
            display_cents = price.display_price.amount_cents,
            discounted = price.is_discounted,
            "resolved product variant"
        );
    }

    pub fn product(&self) -> &ProductSummary {
        &self.product
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Dimensions to render as option chips.
    pub fn dimensions(&self) -> &[OptionDimension] {
        &self.dimensions
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Whether `value` is the active chip for dimension `name`.
    pub fn is_selected(&self, name: &str, value: &str) -> bool {
        self.selections.get(name) == Some(value)
    }

    pub fn resolved_variant(&self) -> Option<&Variant> {
        self.resolved.map(|i| &self.variants[i])
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn price(&self) -> PriceProjection {
        project(
            self.resolved_variant(),
            self.product.price,
            self.product.sale_price,
        )
    }

    /// Whether the add-to-cart action should be enabled.
    pub fn can_add_to_cart(&self) -> bool {
        self.resolved.is_some()
    }

    /// Display price times quantity, for the add-to-cart button label.
    pub fn cart_button_total(&self) -> Option<Money> {
        let price = self.price();
        if !price.is_displayable() {
            return None;
        }
        price.display_price.try_multiply(self.quantity)
    }

    /// Payload for the cart, or `None` when no variant is resolved.
    ///
    /// With a non-empty catalog a variant always resolves, so `None` only
    /// happens before the catalog arrives or when it is empty.
    pub fn add_to_cart_request(&self) -> Option<AddToCartRequest> {
        let variant = self.resolved_variant()?;
        let sku = variant
            .sku
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.product.sku.clone())
            .unwrap_or_default();
        Some(AddToCartRequest {
            product_id: self.product.id.clone(),
            item_id: variant.id.clone(),
            title: self.product.title.clone(),
            unit_price: self.price().display_price,
            quantity: self.quantity,
            sku,
            image: self.product.image.clone(),
            options: self.selections.clone(),
        })
    }
}

/// Serialized queue of session events, drained in arrival order.
#[derive(Debug, Default)]
pub struct UpdateQueue {
    pending: VecDeque<DetailsEvent>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: DetailsEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every pending event to `details`. Returns how many were applied.
    pub fn drain_into(&mut self, details: &mut ProductDetails) -> usize {
        let mut applied = 0;
        while let Some(event) = self.pending.pop_front() {
            details.apply(event);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OptionSlot;
    use crate::money::Currency;

    fn inr(cents: i64) -> Money {
        Money::new(cents, Currency::INR)
    }

    fn product() -> ProductSummary {
        let mut p = ProductSummary::new("ring-1", "Silver Ring", inr(1500));
        p.sku = Some("RING".to_string());
        p
    }

    fn variants() -> Vec<Variant> {
        vec![
            Variant::new("a", "ring-1", inr(1000)).with_option(OptionSlot::Option1, "S"),
            Variant::new("b", "ring-1", inr(1200))
                .with_option(OptionSlot::Option1, "M")
                .with_sale_price(inr(900))
                .with_sku("RING-M"),
        ]
    }

    #[test]
    fn test_phase_progression() {
        let mut details = ProductDetails::new(product());
        assert_eq!(details.phase(), SelectionPhase::Empty);
        assert!(!details.can_add_to_cart());

        details.apply(DetailsEvent::CatalogLoaded(variants()));
        assert_eq!(details.phase(), SelectionPhase::Seeded);
        assert_eq!(details.selections().get("Size"), Some("S"));
        assert_eq!(details.resolved_variant().unwrap().id.as_str(), "a");

        details.apply(DetailsEvent::OptionSelected {
            name: "Size".into(),
            value: "M".into(),
        });
        assert_eq!(details.phase(), SelectionPhase::Edited);
        assert_eq!(details.resolved_variant().unwrap().id.as_str(), "b");
        assert!(details.price().is_discounted);
    }

    #[test]
    fn test_catalog_reload_keeps_user_choice() {
        let mut details = ProductDetails::with_catalog(product(), variants());
        details.select_option("Size", "M");

        let mut reloaded = variants();
        reloaded.push(
            Variant::new("c", "ring-1", inr(1300))
                .with_option(OptionSlot::Option1, "L")
                .with_option(OptionSlot::Option2, "Gold"),
        );
        details.load_catalog(reloaded);

        assert_eq!(details.selections().get("Size"), Some("M"));
        assert_eq!(details.selections().get("Color"), Some("Gold"));
        assert_eq!(details.phase(), SelectionPhase::Edited);
    }

    #[test]
    fn test_queue_applies_in_order() {
        let mut details = ProductDetails::new(product());
        let mut queue = UpdateQueue::new();
        queue.push(DetailsEvent::OptionSelected {
            name: "Size".into(),
            value: "M".into(),
        });
        queue.push(DetailsEvent::CatalogLoaded(variants()));
        queue.push(DetailsEvent::QuantityChanged(3));

        assert_eq!(queue.drain_into(&mut details), 3);
        assert!(queue.is_empty());
        // The choice made before the catalog arrived survives seeding.
        assert_eq!(details.selections().get("Size"), Some("M"));
        assert_eq!(details.resolved_variant().unwrap().id.as_str(), "b");
        assert_eq!(details.quantity(), 3);
    }

    #[test]
    fn test_add_to_cart_request() {
        let mut details = ProductDetails::with_catalog(product(), variants());
        details.select_option("Size", "M");
        details.set_quantity(2);

        let request = details.add_to_cart_request().unwrap();
        assert_eq!(request.item_id.as_str(), "b");
        assert_eq!(request.unit_price, inr(900));
        assert_eq!(request.quantity, 2);
        assert_eq!(request.sku, "RING-M");
        assert_eq!(request.options.get("Size"), Some("M"));
        assert_eq!(details.cart_button_total(), Some(inr(1800)));
    }

    #[test]
    fn test_sku_falls_back_to_product() {
        let details = ProductDetails::with_catalog(product(), variants());
        assert_eq!(details.add_to_cart_request().unwrap().sku, "RING");
    }

    #[test]
    fn test_no_request_without_catalog() {
        let details = ProductDetails::with_catalog(product(), Vec::new());
        assert_eq!(details.phase(), SelectionPhase::Empty);
        assert!(details.add_to_cart_request().is_none());
        // Product-level price still renders.
        assert_eq!(details.price().display_price, inr(1500));
    }

    #[test]
    fn test_quantity_clamped() {
        let mut details = ProductDetails::new(product());
        details.set_quantity(0);
        assert_eq!(details.quantity(), 1);
    }

    #[test]
    fn test_hidden_price_has_no_button_total() {
        let free = ProductSummary::new("p", "Sample", inr(0));
        let details =
            ProductDetails::with_catalog(free, vec![Variant::new("x", "p", inr(0))]);
        assert!(!details.price().is_displayable());
        assert_eq!(details.cart_button_total(), None);
        assert!(details.can_add_to_cart());
    }
}
