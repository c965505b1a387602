//! Box office demo binary
//!
//! Walks one order through the store: fills the ticket table, switches
//! bands, fills the form again and submits it to the logging checkout.

use anyhow::Context;
use box_office_core::environment::SystemClock;
use box_office_order::{
    order_store, Config, EventCatalog, LoggingCheckout, OrderAction, OrderEnvironment,
    OrderField, OrderStore, TicketTypeKey,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{},box_office_order=debug,box_office_runtime=debug",
                    config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = match &config.catalog_path {
        Some(path) => EventCatalog::load(path)
            .with_context(|| format!("loading catalog from {}", path.display()))?,
        None => EventCatalog::builtin().context("loading bundled catalog")?,
    };

    println!("=== Box Office ===\n");
    for event in catalog.list_events() {
        println!(
            "  {} - {} - {}",
            event.name,
            event.display_date(&config.order.date_format),
            event.location
        );
    }

    let env = OrderEnvironment::new(Arc::new(SystemClock), LoggingCheckout::shared())
        .with_quantity_policy(config.order.quantity_policy());
    let first = Arc::clone(catalog.default_event());
    let store = order_store(Arc::clone(&first), env);

    println!("\n>>> {}", first.name);
    for (key, raw) in [("vip", "2"), ("general", "1"), ("vip", "0"), ("vip", "abc")] {
        set_quantity(&store, key, raw).await?;
        let total = store.state(|s| s.order().total()).await;
        let name = first
            .ticket_type(&TicketTypeKey::new(key))
            .map_or(key, |ticket| ticket.name.as_str());
        println!(
            "  {name:<20} (0-{}) = {raw:<4} total {total}",
            config.order.quantity_hint_max
        );
    }

    store
        .send(OrderAction::SetField {
            field: OrderField::FirstName,
            value: "Amy".to_string(),
        })
        .await?;

    if let Some(next) = catalog.list_events().get(1) {
        println!("\n>>> Switching to {}", next.name);
        store
            .send(OrderAction::SelectEvent {
                event: Arc::clone(next),
            })
            .await?;

        let (first_name, total) = store
            .state(|s| (s.order().purchaser().first_name.clone(), s.order().total()))
            .await;
        println!("  first name {first_name:?}, total {total}");
    }

    for (field, value) in [
        (OrderField::FirstName, "Amy"),
        (OrderField::LastName, "Nguyen"),
        (OrderField::Address, "12 Harbor Rd"),
        (OrderField::CardNumber, "4111 1111 1111 1111"),
        (OrderField::CardExpiration, "04 / 29"),
        (OrderField::CardCvv, "123"),
    ] {
        store
            .send(OrderAction::SetField {
                field,
                value: value.to_string(),
            })
            .await?;
    }
    set_quantity(&store, "meet-and-greet", "1").await?;
    set_quantity(&store, "general", "3").await?;

    let (event, order) = store.state(|s| (Arc::clone(s.event()), s.order().clone())).await;
    for payment in [false, true] {
        println!("\n  {}", if payment { "Payment" } else { "Purchaser" });
        for field in OrderField::ALL.into_iter().filter(|f| f.is_payment() == payment) {
            let value = if payment { "<redacted>" } else { order.field(field) };
            println!("    {:<20} [{}] {value}", field.input_name(), field.placeholder());
        }
    }

    println!();
    for item in order.line_items(&event).filter(|item| !item.subtotal.is_zero()) {
        println!(
            "  {:<20} {:>3} x {:>8} = {:>9}",
            item.ticket_type.name,
            item.quantity,
            item.ticket_type.cost.to_string(),
            item.subtotal.to_string()
        );
    }
    println!("  {:<20} {:>27}", "TOTAL", order.total().to_string());

    println!("\n>>> Submitting");
    let mut handle = store.send(OrderAction::Submit).await?;
    if handle.wait_with_timeout(Duration::from_secs(5)).await.is_err() {
        tracing::warn!("Checkout did not finish in time");
    }

    store
        .shutdown(Duration::from_secs(5))
        .await
        .context("shutting down store")?;

    println!("\n=== Done ===");
    Ok(())
}

async fn set_quantity(store: &OrderStore, ticket_type: &str, raw: &str) -> anyhow::Result<()> {
    store
        .send(OrderAction::SetQuantity {
            ticket_type: TicketTypeKey::new(ticket_type),
            raw: raw.to_string(),
        })
        .await?;
    Ok(())
}
