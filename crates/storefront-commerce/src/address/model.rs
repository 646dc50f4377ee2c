//! Saved shipping addresses.

use std::collections::BTreeMap;

use crate::error::CommerceError;
use crate::ids::{AddressId, UserId};
use serde::{Deserialize, Serialize};

/// Country recorded on every address. The store only ships domestically.
pub const DEFAULT_COUNTRY: &str = "India";

/// Form data for creating or updating an address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddressInput {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    /// GST registration number.
    pub gst: String,
    #[serde(default)]
    pub is_default: bool,
}

impl AddressInput {
    /// Check every required field; errors are keyed by field name.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut errors = BTreeMap::new();
        let mut require = |field: &str, value: &str, message: &str| {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), message.to_string());
            }
        };

        require("name", &self.name, "Full name is required");
        require("phone", &self.phone, "Phone number is required");
        require("street", &self.street, "Street address is required");
        require("city", &self.city, "City is required");
        require("state", &self.state, "State is required");
        require("zip_code", &self.zip_code, "ZIP code is required");
        require("gst", &self.gst, "GST number is required");

        if !self.phone.trim().is_empty() && !is_valid_phone(&self.phone) {
            errors.insert(
                "phone".to_string(),
                "Please enter a valid phone number".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::InvalidAddress(errors))
        }
    }
}

/// Accepts an optional `+`, a non-zero digit, then up to 15 more digits,
/// after removing spaces, dashes and parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) if ('1'..='9').contains(&first) => {
            let rest = chars.as_str();
            rest.len() <= 15 && rest.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// A saved address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    pub gst: String,
    pub is_default: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Address {
    pub(crate) fn from_input(user_id: UserId, input: AddressInput, now: i64) -> Self {
        Self {
            id: AddressId::generate(),
            user_id,
            name: input.name,
            street: input.street,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            country: DEFAULT_COUNTRY.to_string(),
            phone: input.phone,
            gst: input.gst,
            is_default: input.is_default,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, input: AddressInput, now: i64) {
        self.name = input.name;
        self.street = input.street;
        self.city = input.city;
        self.state = input.state;
        self.zip_code = input.zip_code;
        self.country = DEFAULT_COUNTRY.to_string();
        self.phone = input.phone;
        self.gst = input.gst;
        self.is_default = input.is_default;
        self.updated_at = now;
    }

    /// Form data pre-filled from this address.
    pub fn to_input(&self) -> AddressInput {
        AddressInput {
            name: self.name.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            phone: self.phone.clone(),
            gst: self.gst.clone(),
            is_default: self.is_default,
        }
    }

    /// Three-line form used in the address picker.
    pub fn multi_line(&self) -> String {
        let country = if self.country.is_empty() {
            DEFAULT_COUNTRY
        } else {
            self.country.as_str()
        };
        [
            self.street.clone(),
            format!("{}, {} {}", self.city, self.state, self.zip_code),
            country.to_string(),
        ]
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AddressInput {
        AddressInput {
            name: "Asha Rao".to_string(),
            street: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zip_code: "560001".to_string(),
            phone: "+91 98765-43210".to_string(),
            gst: "29ABCDE1234F1Z5".to_string(),
            is_default: false,
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_reported_per_field() {
        let mut data = input();
        data.city = "  ".to_string();
        data.gst.clear();
        match data.validate() {
            Err(CommerceError::InvalidAddress(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors["city"], "City is required");
                assert_eq!(errors["gst"], "GST number is required");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+1 (555) 010-9999"));
        assert!(!is_valid_phone("0123456789"));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("98765abc"));
        assert!(!is_valid_phone("12345678901234567"));
        assert!(is_valid_phone("1234567890123456"));
    }

    #[test]
    fn test_multi_line_format() {
        let address = Address::from_input(UserId::new("u1"), input(), 0);
        assert_eq!(
            address.multi_line(),
            "12 MG Road\nBengaluru, Karnataka 560001\nIndia"
        );
        assert_eq!(address.to_input(), input());
    }
}
