//! Push message payloads.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use storefront_commerce::Money;

/// A push message for one device token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Recipient push token.
    pub to: String,
    /// Sound name; `None` plays the default sound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl PushMessage {
    pub fn new(to: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            sound: None,
            title: title.into(),
            body: body.into(),
            data: None,
        }
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Body sent to the push endpoint. `sound` and `data` are always present.
    pub fn to_wire(&self) -> Value {
        json!({
            "to": self.to,
            "sound": self.sound.as_deref().filter(|s| !s.is_empty()).unwrap_or("default"),
            "title": self.title,
            "body": self.body,
            "data": self.data.clone().unwrap_or_else(|| json!({})),
        })
    }
}

/// A new order, announced to the shop owner's device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAlert {
    pub order_id: String,
    pub customer_name: String,
    pub total: Money,
    pub status: String,
}

impl OrderAlert {
    pub fn into_message(self, to: impl Into<String>) -> PushMessage {
        let body = format!(
            "Order #{} for {} - {}",
            self.order_id,
            self.customer_name,
            self.total.display()
        );
        PushMessage::new(to, "New Order", body).with_data(json!({
            "type": "order",
            "orderId": self.order_id,
            "customerName": self.customer_name,
            "total": self.total.to_decimal(),
            "currency": self.total.currency.code(),
            "status": self.status,
        }))
    }
}

/// A product running low on stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    pub product_name: String,
    pub current_stock: i64,
    pub min_stock: i64,
}

impl StockAlert {
    pub fn into_message(self, to: impl Into<String>) -> PushMessage {
        let body = format!(
            "{} is running low ({} left)",
            self.product_name, self.current_stock
        );
        PushMessage::new(to, "Low Stock Alert", body).with_data(json!({
            "type": "inventory",
            "productName": self.product_name,
            "currentStock": self.current_stock,
            "minStock": self.min_stock,
        }))
    }
}
