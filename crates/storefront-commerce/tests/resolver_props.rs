//! Property tests for variant resolution and price projection.

use proptest::prelude::*;
use storefront_commerce::catalog::{
    extract, matches, project, resolve, resolve_position, seed_defaults, OptionSlot, Selections,
    Variant,
};
use storefront_commerce::{Currency, Money};

fn slot_value() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["S", "M", "L", "Red", "Blue", ""]))
        .prop_map(|v| v.map(str::to_string))
}

fn variant_strategy() -> impl Strategy<Value = (Option<String>, Option<String>, Option<String>, i64, Option<i64>)> {
    (
        slot_value(),
        slot_value(),
        slot_value(),
        0i64..5_000,
        prop::option::of(-10i64..5_000),
    )
}

fn catalog() -> impl Strategy<Value = Vec<Variant>> {
    prop::collection::vec(variant_strategy(), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (o1, o2, o3, price, sale))| {
                let mut variant = Variant::new(format!("v{}", i), "p", Money::new(price, Currency::INR));
                variant.option1 = o1;
                variant.option2 = o2;
                variant.option3 = o3;
                variant.sale_price = sale.map(|s| Money::new(s, Currency::INR));
                variant
            })
            .collect()
    })
}

fn selections() -> impl Strategy<Value = Selections> {
    prop::collection::btree_map(
        prop::sample::select(vec!["Size", "Color", "Material", "Finish"]),
        prop::sample::select(vec!["S", "M", "L", "Red", "Blue"]),
        0..4,
    )
    .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// A non-empty catalog always resolves; an empty one never does.
    #[test]
    fn resolves_iff_catalog_non_empty(variants in catalog(), selected in selections()) {
        prop_assert_eq!(resolve(&variants, &selected).is_some(), !variants.is_empty());
    }

    #[test]
    fn resolve_is_deterministic(variants in catalog(), selected in selections()) {
        let first = resolve_position(&variants, &selected);
        let second = resolve_position(&variants, &selected);
        prop_assert_eq!(first, second);
    }

    /// When some variant matches, the resolved one matches and no earlier one does.
    #[test]
    fn resolved_variant_is_first_match(variants in catalog(), selected in selections()) {
        let any_options = variants.iter().any(Variant::has_options);
        if let Some(first_match) = variants.iter().position(|v| matches(v, &selected)) {
            if any_options {
                prop_assert_eq!(resolve_position(&variants, &selected), Some(first_match));
            }
        } else if !variants.is_empty() {
            prop_assert_eq!(resolve_position(&variants, &selected), Some(0));
        }
    }

    /// Dimensions come out in slot order with distinct, non-empty values.
    #[test]
    fn extracted_dimensions_are_ordered_and_distinct(variants in catalog()) {
        let dimensions = extract(&variants);
        let slots: Vec<OptionSlot> = dimensions.iter().map(|d| d.slot).collect();
        let mut sorted = slots.clone();
        sorted.sort();
        prop_assert_eq!(slots, sorted);

        for dimension in &dimensions {
            prop_assert!(!dimension.values.is_empty());
            prop_assert!(dimension.values.iter().all(|v| !v.is_empty()));
            let mut unique = dimension.values.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), dimension.values.len());
        }
    }

    /// Seeding keeps every existing entry and covers every dimension.
    #[test]
    fn seeding_preserves_and_covers(variants in catalog(), selected in selections()) {
        let dimensions = extract(&variants);
        let seeded = seed_defaults(&dimensions, &selected);

        for (name, value) in selected.iter() {
            prop_assert_eq!(seeded.get(name), Some(value));
        }
        for dimension in &dimensions {
            prop_assert!(seeded.contains(&dimension.name));
        }
    }

    /// Freshly seeded selections always pick out a real match.
    #[test]
    fn seeded_defaults_resolve_consistently(variants in catalog()) {
        let seeded = seed_defaults(&extract(&variants), &Selections::new());
        if let Some(resolved) = resolve(&variants, &seeded) {
            let any_match = variants.iter().any(|v| matches(v, &seeded));
            prop_assert!(!any_match || matches(resolved, &seeded));
        }
    }

    /// Display price never exceeds base price, and discount implies strictly below.
    #[test]
    fn projection_never_marks_up(
        variants in catalog(),
        fallback in 0i64..5_000,
        fallback_sale in prop::option::of(-10i64..5_000),
    ) {
        let projection = project(
            variants.first(),
            Money::new(fallback, Currency::INR),
            fallback_sale.map(|s| Money::new(s, Currency::INR)),
        );
        prop_assert!(projection.display_price.amount_cents <= projection.base_price.amount_cents);
        prop_assert_eq!(
            projection.is_discounted,
            projection.display_price.amount_cents < projection.base_price.amount_cents
        );
        if projection.is_discounted {
            prop_assert!(projection.display_price.is_positive());
        } else {
            prop_assert_eq!(projection.display_price, projection.base_price);
        }
    }
}
