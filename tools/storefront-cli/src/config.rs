//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::Currency;
use storefront_notify::NotifyConfig;

/// Contents of `storefront.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreConfig,

    /// Push service settings.
    #[serde(default)]
    pub notifications: NotifyConfig,
}

impl StorefrontConfig {
    /// Load from TOML, or JSON when the file ends in `.json`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Configured currency. Unknown codes are an error rather than a silent
    /// fallback, since every price would be mislabelled.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.store.currency)
            .with_context(|| format!("Unknown currency code: {}", self.store.currency))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Local store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// ISO currency code for prices entered on the command line.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// JSON file holding saved addresses.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// User the address book belongs to.
    #[serde(default = "default_user")]
    pub user: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_data_file() -> String {
    ".storefront/data.json".to_string()
}

fn default_user() -> String {
    "local".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            data_file: default_data_file(),
            user: default_user(),
        }
    }
}

/// Generate a default storefront.toml.
pub fn generate_default_config(app_name: &str) -> String {
    format!(
        r##"# Storefront configuration

[store]
currency = "INR"
data_file = ".storefront/data.json"
user = "local"

[notifications]
endpoint = "https://exp.host/--/api/v2/push/send"
# project_id = "your-project-id"
app_name = "{app_name}"

[notifications.android_channel]
id = "default"
name = "default"
importance = "max"
vibration_pattern = [0, 250, 250, 250]
light_color = "#378388"
"##,
        app_name = app_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let parsed: StorefrontConfig = toml::from_str(&generate_default_config("Silver POS")).unwrap();
        assert_eq!(parsed, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: StorefrontConfig = toml::from_str(
            r#"
[store]
currency = "USD"

[notifications]
project_id = "proj-1"
"#,
        )
        .unwrap();
        assert_eq!(parsed.currency().unwrap(), Currency::USD);
        assert_eq!(parsed.store.data_file, ".storefront/data.json");
        assert_eq!(parsed.notifications.project_id.as_deref(), Some("proj-1"));
        assert_eq!(parsed.notifications.app_name, "Silver POS");
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        std::fs::write(&path, r#"{ "store": { "currency": "EUR" } }"#).unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        assert_eq!(config.currency().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_unknown_currency() {
        let mut config = StorefrontConfig::default();
        config.store.currency = "XYZ".to_string();
        assert!(config.currency().is_err());
    }
}
