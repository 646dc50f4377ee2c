//! Option dimensions derived from a product's variants.
//!
//! Variants carry at most three option slots. Each slot maps to a fixed
//! label: slot 1 is "Size", slot 2 is "Color", slot 3 is "Material". There is
//! no way to name a dimension anything else or to add a fourth one.

use crate::catalog::Variant;
use serde::{Deserialize, Serialize};

/// Positional option slot on a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionSlot {
    Option1,
    Option2,
    Option3,
}

impl OptionSlot {
    /// All slots in extraction order.
    pub const ALL: [OptionSlot; 3] = [OptionSlot::Option1, OptionSlot::Option2, OptionSlot::Option3];

    /// Fixed dimension label for this slot.
    pub fn label(&self) -> &'static str {
        match self {
            OptionSlot::Option1 => "Size",
            OptionSlot::Option2 => "Color",
            OptionSlot::Option3 => "Material",
        }
    }

    /// Slot for a dimension label. Labels are matched exactly.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.label() == label)
    }
}

/// One selectable dimension and the distinct values seen for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionDimension {
    /// Fixed label ("Size", "Color" or "Material").
    pub name: String,
    pub slot: OptionSlot,
    /// Distinct values in first-encountered order.
    pub values: Vec<String>,
}

impl OptionDimension {
    /// The value seeded when nothing is selected yet.
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Derive the option dimensions of a variant list.
///
/// Dimensions come out in slot order. A slot that is empty on every variant
/// produces no dimension at all.
pub fn extract(variants: &[Variant]) -> Vec<OptionDimension> {
    OptionSlot::ALL
        .iter()
        .filter_map(|&slot| {
            let mut values: Vec<String> = Vec::new();
            for value in variants.iter().filter_map(|v| v.option(slot)) {
                if !values.iter().any(|seen| seen == value) {
                    values.push(value.to_string());
                }
            }
            if values.is_empty() {
                None
            } else {
                Some(OptionDimension {
                    name: slot.label().to_string(),
                    slot,
                    values,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn variant(id: &str, size: Option<&str>, color: Option<&str>) -> Variant {
        let mut v = Variant::new(id, "prod-1", Money::new(1000, Currency::INR));
        if let Some(size) = size {
            v = v.with_option(OptionSlot::Option1, size);
        }
        if let Some(color) = color {
            v = v.with_option(OptionSlot::Option2, color);
        }
        v
    }

    #[test]
    fn test_single_size_dimension() {
        let variants = vec![
            variant("a", Some("S"), None),
            variant("b", Some("M"), None),
            variant("c", Some("L"), None),
        ];
        let dims = extract(&variants);
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].name, "Size");
        assert_eq!(dims[0].values, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_empty_variants_yield_no_dimensions() {
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_values_deduplicated_in_first_seen_order() {
        let variants = vec![
            variant("a", Some("M"), Some("Red")),
            variant("b", Some("S"), Some("Red")),
            variant("c", Some("M"), Some("Blue")),
        ];
        let dims = extract(&variants);
        assert_eq!(dims[0].values, vec!["M", "S"]);
        assert_eq!(dims[1].name, "Color");
        assert_eq!(dims[1].values, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_order_follows_slot_not_first_seen() {
        // Only the second variant has a size; color shows up first.
        let variants = vec![variant("a", None, Some("Red")), variant("b", Some("S"), None)];
        let names: Vec<_> = extract(&variants).into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Size", "Color"]);
    }

    #[test]
    fn test_gap_slot_is_omitted() {
        let v = Variant::new("a", "p", Money::new(1000, Currency::INR))
            .with_option(OptionSlot::Option1, "S")
            .with_option(OptionSlot::Option3, "Gold");
        let dims = extract(&[v]);
        let names: Vec<_> = dims.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Size", "Material"]);
        assert_eq!(dims[1].slot, OptionSlot::Option3);
    }

    #[test]
    fn test_label_round_trip() {
        for slot in OptionSlot::ALL {
            assert_eq!(OptionSlot::from_label(slot.label()), Some(slot));
        }
        assert_eq!(OptionSlot::from_label("size"), None);
        assert_eq!(OptionSlot::from_label("Weight"), None);
    }
}
