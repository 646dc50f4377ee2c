//! Push notification sending.

use anyhow::{bail, Context as _, Result};
use serde_json::Value;
use storefront_commerce::Money;
use storefront_notify::http::ReqwestTransport;
use storefront_notify::{HeadlessPlatform, NotificationService, OrderAlert, PushMessage, StockAlert};

use super::{NotifyArgs, NotifyCommand};
use crate::context::Context;

enum Outgoing {
    Message(PushMessage),
    Test,
    Order(OrderAlert),
    Inventory(StockAlert),
}

fn parse_data(raw: &str) -> Result<Value> {
    let data: Value = serde_json::from_str(raw).context("--data must be valid JSON")?;
    if !data.is_object() {
        bail!("--data must be a JSON object");
    }
    Ok(data)
}

pub fn run(args: NotifyArgs, ctx: &Context) -> Result<()> {
    let Some(token) = args.to else {
        bail!("A recipient push token is required (--to)");
    };

    let outgoing = match args.command {
        NotifyCommand::Send {
            title,
            body,
            data,
            sound,
        } => {
            let mut message = PushMessage::new(token.clone(), title, body);
            if let Some(raw) = data {
                message = message.with_data(parse_data(&raw)?);
            }
            if let Some(sound) = sound {
                message = message.with_sound(sound);
            }
            Outgoing::Message(message)
        }
        NotifyCommand::Test => Outgoing::Test,
        NotifyCommand::Order {
            order_id,
            customer,
            total,
            status,
        } => Outgoing::Order(OrderAlert {
            order_id,
            customer_name: customer,
            total: Money::from_decimal(total, ctx.config.currency()?),
            status,
        }),
        NotifyCommand::Inventory {
            product,
            stock,
            min_stock,
        } => Outgoing::Inventory(StockAlert {
            product_name: product,
            current_stock: stock,
            min_stock,
        }),
    };

    let mut service = NotificationService::new(
        ReqwestTransport::new()?,
        HeadlessPlatform,
        ctx.config.notifications.clone(),
    );
    service.use_token(token);

    let spinner = ctx.output.spinner("Sending notification...");
    let result = match outgoing {
        Outgoing::Message(message) => service.send(&message),
        Outgoing::Test => service.send_test(),
        Outgoing::Order(alert) => service.send_order(alert),
        Outgoing::Inventory(alert) => service.send_inventory(alert),
    };
    spinner.finish_and_clear();

    let reply = result.context("Failed to send notification")?;
    if ctx.output.is_json() {
        ctx.output.json(&reply);
    } else {
        ctx.output.success("Notification sent");
        ctx.output.debug(&format!("Push service replied: {}", reply));
    }
    Ok(())
}
