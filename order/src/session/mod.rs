//! Order session: the mutable order for the active event.
//!
//! # Architecture
//!
//! ```text
//! EventCatalog ──select──▶ OrderAction::SelectEvent
//!                                  │
//! form inputs ──edit──▶ SetField / SetQuantity
//!                                  ▼
//!                           OrderReducer ──▶ SessionState { event, order }
//!                                  │
//! submit button ──▶ Submit ──▶ Effect::Future ──▶ CheckoutHandoff
//! ```
//!
//! The reducer runs inside a [`Store`](box_office_runtime::Store) when the
//! order is shared across tasks; [`OrderSession`] applies the same rules
//! synchronously and returns rejections to the caller.

pub mod actions;
pub mod environment;
pub mod order_session;
pub mod reducer;
pub mod state;

pub use actions::OrderAction;
pub use environment::OrderEnvironment;
pub use order_session::OrderSession;
pub use reducer::OrderReducer;
pub use state::{
    compute_total, parse_quantity, LineItem, OrderState, QuantityPolicy, SessionState,
};

use crate::types::Event;
use box_office_runtime::Store;
use std::sync::Arc;

/// Store running the order reducer
pub type OrderStore = Store<SessionState, OrderAction, OrderEnvironment, OrderReducer>;

/// Creates a store with `event` active and a fresh order
#[must_use]
pub fn order_store(event: Arc<Event>, environment: OrderEnvironment) -> OrderStore {
    Store::new(SessionState::new(event), OrderReducer::new(), environment)
}
