//! Option selections and variant resolution.

use std::collections::BTreeMap;

use crate::catalog::{OptionDimension, OptionSlot, Variant};
use serde::{Deserialize, Serialize};

/// Chosen value per dimension name, at most one each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections(BTreeMap<String, String>);

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set the value for `name`, returning the value it replaced.
    pub fn select(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selections {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Fill in the first value of every dimension that has no selection yet.
///
/// Existing entries are never overwritten, including entries for names that
/// are not among `dimensions`.
pub fn seed_defaults(dimensions: &[OptionDimension], current: &Selections) -> Selections {
    let mut seeded = current.clone();
    for dimension in dimensions {
        if seeded.contains(&dimension.name) {
            continue;
        }
        if let Some(value) = dimension.first_value() {
            seeded.select(dimension.name.clone(), value);
        }
    }
    seeded
}

/// Whether `variant` agrees with every selection that names a known slot.
pub fn matches(variant: &Variant, selections: &Selections) -> bool {
    selections.iter().all(|(name, value)| match OptionSlot::from_label(name) {
        Some(slot) => variant.option(slot) == Some(value),
        None => true,
    })
}

/// Position of the active variant in `variants`.
///
/// - empty list: `None`
/// - no variant has any option: the first variant
/// - otherwise the first variant matching `selections`, falling back to the
///   first variant when nothing matches
pub fn resolve_position(variants: &[Variant], selections: &Selections) -> Option<usize> {
    if variants.is_empty() {
        return None;
    }
    if !variants.iter().any(Variant::has_options) {
        return Some(0);
    }
    Some(
        variants
            .iter()
            .position(|v| matches(v, selections))
            .unwrap_or(0),
    )
}

/// The active variant for `selections`. Never `None` for a non-empty list.
pub fn resolve<'a>(variants: &'a [Variant], selections: &Selections) -> Option<&'a Variant> {
    resolve_position(variants, selections).map(|i| &variants[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::extract;
    use crate::money::{Currency, Money};

    fn inr(cents: i64) -> Money {
        Money::new(cents, Currency::INR)
    }

    fn sized(id: &str, size: &str, color: &str) -> Variant {
        Variant::new(id, "prod-1", inr(1000))
            .with_option(OptionSlot::Option1, size)
            .with_option(OptionSlot::Option2, color)
    }

    fn catalog() -> Vec<Variant> {
        vec![
            sized("s-red", "S", "Red"),
            sized("s-blue", "S", "Blue"),
            sized("m-red", "M", "Red"),
            sized("m-blue", "M", "Blue"),
        ]
    }

    #[test]
    fn test_resolve_empty_is_none() {
        assert!(resolve(&[], &Selections::new()).is_none());
    }

    #[test]
    fn test_resolve_without_options_returns_first() {
        let variants = vec![Variant::new("only", "p", inr(500))];
        let selections: Selections = [("Size", "XL")].into_iter().collect();
        assert_eq!(resolve(&variants, &selections).unwrap().id.as_str(), "only");
    }

    #[test]
    fn test_resolve_exact_match() {
        let variants = catalog();
        let selections: Selections = [("Size", "M"), ("Color", "Blue")].into_iter().collect();
        assert_eq!(resolve(&variants, &selections).unwrap().id.as_str(), "m-blue");
    }

    #[test]
    fn test_resolve_underspecified_takes_first_match() {
        let variants = catalog();
        let selections: Selections = [("Color", "Blue")].into_iter().collect();
        assert_eq!(resolve(&variants, &selections).unwrap().id.as_str(), "s-blue");
    }

    #[test]
    fn test_resolve_no_match_falls_back_to_first() {
        let variants = catalog();
        let selections: Selections = [("Size", "XXL")].into_iter().collect();
        assert_eq!(resolve(&variants, &selections).unwrap().id.as_str(), "s-red");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let variants = catalog();
        let selections: Selections = [("Size", "m"), ("Color", "Blue")].into_iter().collect();
        assert_eq!(resolve(&variants, &selections).unwrap().id.as_str(), "s-red");
    }

    #[test]
    fn test_unknown_dimension_name_is_ignored() {
        let variants = catalog();
        let selections: Selections = [("Size", "M"), ("Fit", "Slim")].into_iter().collect();
        assert_eq!(resolve(&variants, &selections).unwrap().id.as_str(), "m-red");
    }

    #[test]
    fn test_missing_slot_value_does_not_match_selection() {
        let variants = vec![
            Variant::new("plain", "p", inr(100)),
            Variant::new("sized", "p", inr(200)).with_option(OptionSlot::Option1, "L"),
        ];
        let selections: Selections = [("Size", "L")].into_iter().collect();
        assert_eq!(resolve(&variants, &selections).unwrap().id.as_str(), "sized");
    }

    #[test]
    fn test_seed_fills_missing_dimensions() {
        let dims = extract(&catalog());
        let seeded = seed_defaults(&dims, &Selections::new());
        assert_eq!(seeded.get("Size"), Some("S"));
        assert_eq!(seeded.get("Color"), Some("Red"));
    }

    #[test]
    fn test_seed_never_overwrites() {
        let dims = extract(&catalog());
        let current: Selections = [("Size", "M")].into_iter().collect();
        let seeded = seed_defaults(&dims, &current);
        assert_eq!(seeded.get("Size"), Some("M"));
        assert_eq!(seeded.get("Color"), Some("Red"));
    }

    #[test]
    fn test_seed_keeps_choices_for_vanished_dimensions() {
        let current: Selections = [("Material", "Gold")].into_iter().collect();
        let seeded = seed_defaults(&extract(&catalog()), &current);
        assert_eq!(seeded.get("Material"), Some("Gold"));
        assert_eq!(seeded.len(), 3);
    }
}
