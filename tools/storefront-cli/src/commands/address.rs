//! Saved address management.

use anyhow::Result;
use dialoguer::{Confirm, Input};
use storefront_commerce::address::{Address, AddressBook, AddressInput};
use storefront_commerce::store::JsonFileStore;
use storefront_commerce::{AddressId, CommerceError, UserId};

use super::{AddressArgs, AddressCommand, AddressFields};
use crate::context::Context;

pub fn run(args: AddressArgs, ctx: &Context) -> Result<()> {
    let user = UserId::new(args.user.unwrap_or_else(|| ctx.config.store.user.clone()));
    let book = AddressBook::new(ctx.open_store()?);

    match args.command {
        AddressCommand::List => list(&book, &user, ctx),
        AddressCommand::Add(fields) => add(&book, &user, fields, ctx),
        AddressCommand::Remove { id } => {
            book.delete(&user, &AddressId::new(id.clone()))?;
            ctx.output.success(&format!("Removed address {}", id));
            Ok(())
        }
        AddressCommand::Default { id } => {
            let address = book.set_default(&user, &AddressId::new(id))?;
            ctx.output
                .success(&format!("{} is now the default address", address.name));
            Ok(())
        }
    }
}

fn list(
    book: &AddressBook<JsonFileStore>,
    user: &UserId,
    ctx: &Context,
) -> Result<()> {
    let addresses = book.list(user)?;

    if ctx.output.is_json() {
        ctx.output.json(&addresses);
        return Ok(());
    }

    if addresses.is_empty() {
        ctx.output.info("No saved addresses.");
        return Ok(());
    }

    ctx.output.header(&format!("Addresses for {}", user));
    for address in &addresses {
        print_address(address, ctx);
    }
    Ok(())
}

fn print_address(address: &Address, ctx: &Context) {
    let marker = if address.is_default { " (default)" } else { "" };
    ctx.output
        .list_item(&format!("{}{}  [{}]", address.name, marker, address.id));
    for line in address.multi_line().lines() {
        ctx.output.kv("", line);
    }
    ctx.output.kv("Phone", &address.phone);
    ctx.output.kv("GST", &address.gst);
}

fn prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?),
    }
}

fn collect_input(fields: AddressFields, first: bool) -> Result<AddressInput> {
    let all_given = [
        &fields.name,
        &fields.street,
        &fields.city,
        &fields.state,
        &fields.zip,
        &fields.phone,
        &fields.gst,
    ]
    .iter()
    .all(|f| f.is_some());

    let mut input = AddressInput {
        name: prompt(fields.name, "Full name")?,
        phone: prompt(fields.phone, "Phone number")?,
        street: prompt(fields.street, "Street address")?,
        city: prompt(fields.city, "City")?,
        state: prompt(fields.state, "State")?,
        zip_code: prompt(fields.zip, "ZIP code")?,
        gst: prompt(fields.gst, "GST number")?,
        is_default: fields.default,
    };

    if !all_given && !input.is_default && !first {
        input.is_default = Confirm::new()
            .with_prompt("Make this the default address?")
            .default(false)
            .interact()?;
    }
    Ok(input)
}

fn add(
    book: &AddressBook<JsonFileStore>,
    user: &UserId,
    fields: AddressFields,
    ctx: &Context,
) -> Result<()> {
    let first = book.list(user)?.is_empty();
    let input = collect_input(fields, first)?;

    match book.create(user, input) {
        Ok(address) => {
            if ctx.output.is_json() {
                ctx.output.json(&address);
            } else {
                ctx.output.success(&format!("Saved address {}", address.id));
                print_address(&address, ctx);
            }
            Ok(())
        }
        Err(CommerceError::InvalidAddress(errors)) => {
            for (field, message) in &errors {
                ctx.output.warn(&format!("{}: {}", field, message));
            }
            Err(CommerceError::InvalidAddress(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}
