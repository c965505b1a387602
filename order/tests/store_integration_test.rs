//! Order store integration tests.
//!
//! Drive the order reducer through the runtime `Store` the way a host would.

#![allow(clippy::unwrap_used)] // Test code
#![allow(clippy::expect_used)] // Test code

use box_office_order::{
    order_store, EventCatalog, Money, OrderAction, OrderEnvironment, OrderField,
    OrderState, OrderStore, QuantityPolicy, RecordingCheckout, TicketTypeKey,
};
use box_office_runtime::StoreError;
use box_office_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

fn store_with(checkout: &RecordingCheckout) -> (EventCatalog, OrderStore) {
    let catalog = EventCatalog::builtin().unwrap();
    let env = OrderEnvironment::new(Arc::new(test_clock()), Arc::new(checkout.clone()));
    let store = order_store(Arc::clone(catalog.default_event()), env);
    (catalog, store)
}

fn set_quantity(key: &str, raw: &str) -> OrderAction {
    OrderAction::SetQuantity {
        ticket_type: TicketTypeKey::new(key),
        raw: raw.to_string(),
    }
}

async fn snapshot(store: &OrderStore) -> OrderState {
    store.state(|s| s.order().clone()).await
}

#[tokio::test]
async fn test_default_event_starts_empty() {
    let (_, store) = store_with(&RecordingCheckout::new());

    let order = snapshot(&store).await;

    assert_eq!(order.active_event_id().as_str(), "ska-band");
    assert_eq!(order.total(), Money::ZERO);
    assert_eq!(order.quantities().len(), 3);
}

#[tokio::test]
async fn test_quantity_edits_recompute_total() {
    let (_, store) = store_with(&RecordingCheckout::new());

    store.send(set_quantity("vip", "2")).await.unwrap();
    assert_eq!(snapshot(&store).await.total(), Money::from_cents(10_000));

    store.send(set_quantity("general", "1")).await.unwrap();
    assert_eq!(snapshot(&store).await.total(), Money::from_cents(12_500));

    store.send(set_quantity("meet-and-greet", "1")).await.unwrap();
    assert_eq!(snapshot(&store).await.total(), Money::from_cents(21_500));

    store.send(set_quantity("vip", "abc")).await.unwrap();
    store.send(set_quantity("vip", "0")).await.unwrap();
    assert_eq!(snapshot(&store).await.total(), Money::from_cents(11_500));
}

#[tokio::test]
async fn test_concurrent_edits_keep_total_consistent() {
    let (_, store) = store_with(&RecordingCheckout::new());

    let keys = ["vip", "general", "meet-and-greet"];
    let mut tasks = Vec::new();
    for i in 0..50usize {
        let store = store.clone();
        let key = keys[i % keys.len()];
        tasks.push(tokio::spawn(async move {
            store
                .send(set_quantity(key, &(i % 7).to_string()))
                .await
                .unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let (event, order) = store
        .state(|s| (Arc::clone(s.event()), s.order().clone()))
        .await;
    let expected = order
        .line_items(&event)
        .fold(0, |sum, item| sum + item.subtotal.cents());
    assert_eq!(order.total(), Money::from_cents(expected));
}

#[tokio::test]
async fn test_switching_events_resets_the_order() {
    let (catalog, store) = store_with(&RecordingCheckout::new());
    let punk = Arc::clone(catalog.list_events().last().unwrap());

    store
        .send(OrderAction::SetField {
            field: OrderField::FirstName,
            value: "Amy".to_string(),
        })
        .await
        .unwrap();
    store.send(set_quantity("general", "4")).await.unwrap();
    store
        .send(OrderAction::SelectEvent { event: punk })
        .await
        .unwrap();

    let order = snapshot(&store).await;
    assert_eq!(order.active_event_id().as_str(), "punk-band");
    assert_eq!(order.purchaser().first_name, "");
    assert_eq!(order.total(), Money::ZERO);
    assert!(order.quantities().values().all(|&q| q == 0));
}

#[tokio::test]
async fn test_quantity_cap_from_environment() {
    let catalog = EventCatalog::builtin().unwrap();
    let env = OrderEnvironment::new(Arc::new(test_clock()), Arc::new(RecordingCheckout::new()))
        .with_quantity_policy(QuantityPolicy::capped(99));
    let store = order_store(Arc::clone(catalog.default_event()), env);

    store.send(set_quantity("general", "100")).await.unwrap();
    assert_eq!(
        snapshot(&store).await.quantity(&"general".into()),
        Some(0)
    );

    store.send(set_quantity("general", "99")).await.unwrap();
    assert_eq!(
        snapshot(&store).await.quantity(&"general".into()),
        Some(99)
    );
}

#[tokio::test]
async fn test_submit_hands_snapshot_to_checkout() {
    let checkout = RecordingCheckout::new();
    let (_, store) = store_with(&checkout);

    store.send(set_quantity("vip", "1")).await.unwrap();
    store
        .send(OrderAction::SetField {
            field: OrderField::CardNumber,
            value: "4111 1111 1111 1111".to_string(),
        })
        .await
        .unwrap();
    let before = snapshot(&store).await;

    let mut handle = store.send(OrderAction::Submit).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .expect("checkout should finish");

    let submissions = checkout.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].order, before);
    assert_eq!(submissions[0].event_name, "The Skankin' Pickles");
    assert_eq!(submissions[0].total(), Money::from_cents(5_000));

    // Submit reads, never writes
    assert_eq!(snapshot(&store).await, before);
}

#[tokio::test]
async fn test_rejected_checkout_keeps_order() {
    let checkout = RecordingCheckout::rejecting("card declined");
    let (_, store) = store_with(&checkout);

    store.send(set_quantity("general", "2")).await.unwrap();
    let before = snapshot(&store).await;

    let mut handle = store.send(OrderAction::Submit).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .expect("checkout should finish");

    assert_eq!(checkout.submissions().len(), 1);
    assert_eq!(snapshot(&store).await, before);
}

#[tokio::test]
async fn test_store_rejects_edits_after_shutdown() {
    let (_, store) = store_with(&RecordingCheckout::new());

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    let result = store.send(set_quantity("vip", "1")).await;
    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
    assert_eq!(snapshot(&store).await.total(), Money::ZERO);
}
