//! Catalog inspection and variant resolution.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use storefront_commerce::catalog::{
    extract, DetailsEvent, ProductDetails, ProductSummary, UpdateQueue, Variant,
};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{chip, price_label};

/// On-disk catalog: one product and its variants, in display order.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFile {
    pub product: ProductSummary,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }
}

pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::Options { file } => options(&file, ctx),
        CatalogCommand::Resolve {
            file,
            selections,
            quantity,
        } => resolve(&file, &selections, quantity, ctx),
    }
}

fn options(file: &str, ctx: &Context) -> Result<()> {
    let catalog = CatalogFile::load(&ctx.resolve_path(file))?;
    let dimensions = extract(&catalog.variants);

    if ctx.output.is_json() {
        ctx.output.json(&dimensions);
        return Ok(());
    }

    ctx.output.header(&catalog.product.title);
    if dimensions.is_empty() {
        ctx.output.info("No options; the product has a single variant.");
        return Ok(());
    }
    for dimension in &dimensions {
        ctx.output.kv(&dimension.name, &dimension.values.join(", "));
    }
    Ok(())
}

/// Parse `Name=Value`.
fn parse_selection(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid selection '{}': expected NAME=VALUE", raw),
    }
}

/// Replay a catalog load followed by the given edits, in order.
fn build_session(
    catalog: CatalogFile,
    selections: &[(String, String)],
    quantity: i64,
) -> ProductDetails {
    let mut details = ProductDetails::new(catalog.product);
    let mut queue = UpdateQueue::new();
    queue.push(DetailsEvent::CatalogLoaded(catalog.variants));
    for (name, value) in selections {
        queue.push(DetailsEvent::OptionSelected {
            name: name.clone(),
            value: value.clone(),
        });
    }
    queue.push(DetailsEvent::QuantityChanged(quantity));
    queue.drain_into(&mut details);
    details
}

fn resolve(file: &str, raw_selections: &[String], quantity: i64, ctx: &Context) -> Result<()> {
    let catalog = CatalogFile::load(&ctx.resolve_path(file))?;
    let selections = raw_selections
        .iter()
        .map(|raw| parse_selection(raw))
        .collect::<Result<Vec<_>>>()?;

    let dimensions = extract(&catalog.variants);
    for (name, value) in &selections {
        let known = dimensions
            .iter()
            .any(|d| &d.name == name && d.contains(value));
        if !known {
            ctx.output
                .warn(&format!("No variant offers {} = {}", name, value));
        }
    }

    let details = build_session(catalog, &selections, quantity);
    let price = details.price();
    let request = details.add_to_cart_request();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "dimensions": details.dimensions(),
            "selections": details.selections(),
            "variant": details.resolved_variant(),
            "price": price,
            "cart_button_total": details.cart_button_total(),
            "add_to_cart": request,
        }));
        return Ok(());
    }

    ctx.output.header(&details.product().title);
    for dimension in details.dimensions() {
        let chips: Vec<String> = dimension
            .values
            .iter()
            .map(|v| chip(v, details.is_selected(&dimension.name, v)))
            .collect();
        ctx.output.kv(&dimension.name, &chips.join(" "));
    }

    match details.resolved_variant() {
        Some(variant) => {
            ctx.output.kv("Variant", &format!("{} ({})", variant.build_name(), variant.id));
        }
        None => {
            ctx.output.warn("Catalog is empty; nothing can be added to the cart.");
            return Ok(());
        }
    }

    if price.is_displayable() {
        ctx.output.kv(
            "Price",
            &price_label(
                &price.base_price.display(),
                &price.display_price.display(),
                price.is_discounted,
            ),
        );
        if let Some(savings) = price.savings() {
            ctx.output.kv("You save", &savings.display());
        }
    }
    if let Some(total) = details.cart_button_total() {
        ctx.output
            .kv("Add to cart", &format!("{} x {} = {}", details.quantity(), price.display_price, total));
    }

    if let Some(request) = request {
        ctx.output.kv("SKU", if request.sku.is_empty() { "-" } else { request.sku.as_str() });
    }
    Ok(())
}
