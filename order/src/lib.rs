//! Box Office - a single-event ticket order form
//!
//! The order form for one concert at a time: pick an event from the catalog,
//! choose ticket quantities, fill in purchaser and payment details, and hand
//! the finished order to checkout. Presentation is left to the host; this
//! crate owns the order state and keeps its total correct.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  select   ┌──────────────────┐  submit   ┌──────────────────┐
//! │ EventCatalog │ ────────▶ │   OrderReducer   │ ────────▶ │ CheckoutHandoff  │
//! │  (read-only) │           │ (SessionState)   │  Effect   │ (Logging/Record) │
//! └──────────────┘           └──────────────────┘           └──────────────────┘
//!                                     ▲
//!                                     │ SetField / SetQuantity
//!                                  form inputs
//! ```
//!
//! # Key Rules
//!
//! - Selecting an event (even the active one) replaces the whole order
//! - Every applied quantity edit recomputes the total over all ticket types
//! - A rejected edit (unknown ticket type, unparseable quantity) changes nothing
//! - Totals are integer cents; `$125.00` is `Money::from_cents(12_500)`
//!
//! # Usage
//!
//! ```
//! use box_office_order::{EventCatalog, OrderField, OrderSession};
//!
//! let catalog = EventCatalog::builtin()?;
//! let mut session = OrderSession::new(catalog.default_event().clone());
//!
//! session.set_quantity(&"vip".into(), "2")?;
//! session.set_field(OrderField::FirstName, "Amy");
//! assert_eq!(session.order().total().to_string(), "$100.00");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use catalog::{CatalogError, EventCatalog};
pub use checkout::{
    CheckoutError, CheckoutHandoff, CheckoutResult, LoggingCheckout, OrderSubmission,
    RecordingCheckout,
};
pub use config::Config;
pub use error::OrderError;
pub use session::{
    order_store, OrderAction, OrderEnvironment, OrderReducer, OrderSession, OrderState,
    OrderStore, QuantityPolicy, SessionState,
};
pub use types::{
    Event, EventId, Money, OrderField, PaymentFields, PurchaserFields, TicketType,
    TicketTypeKey, QUANTITY_HINT_MAX,
};
