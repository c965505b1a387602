//! Actions accepted by the order session.

use crate::checkout::CheckoutError;
use crate::types::{Event, EventId, OrderField, TicketTypeKey};
use std::sync::Arc;

/// Everything that can happen to an order.
///
/// The first four are driven by the form; `CheckoutCompleted` is fed back by
/// the submit effect.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// The user picked an event; the order is replaced with a fresh one
    SelectEvent {
        /// Newly active event
        event: Arc<Event>,
    },

    /// A purchaser or payment input changed
    SetField {
        /// Field being edited
        field: OrderField,
        /// New text
        value: String,
    },

    /// A ticket quantity input changed
    SetQuantity {
        /// Ticket type whose input changed
        ticket_type: TicketTypeKey,
        /// Text as typed
        raw: String,
    },

    /// The user pressed submit
    Submit,

    /// The checkout collaborator finished with a submission
    CheckoutCompleted {
        /// Event the submitted order was for
        event_id: EventId,
        /// What the collaborator reported
        outcome: Result<(), CheckoutError>,
    },
}
