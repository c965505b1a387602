//! Rejections reported by the order session.
//!
//! Every variant means the edit was not applied: the order state is exactly
//! what it was before the call.

use crate::types::{EventId, TicketTypeKey};
use thiserror::Error;

/// Why an order edit was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The ticket type is not offered by the active event
    #[error("Ticket type '{ticket_type}' is not offered by event {event_id}")]
    UnknownTicketType {
        /// Active event
        event_id: EventId,
        /// Key that was passed in
        ticket_type: TicketTypeKey,
    },

    /// The quantity text is not a non-negative whole number
    #[error("Invalid quantity '{raw}': expected a whole number of tickets")]
    InvalidQuantity {
        /// Text as typed
        raw: String,
    },

    /// The quantity exceeds the configured cap
    #[error("Quantity {quantity} exceeds the limit of {cap} tickets per type")]
    QuantityAboveCap {
        /// Parsed quantity
        quantity: u32,
        /// Enforced cap
        cap: u32,
    },

    /// Applying the quantity would overflow the order total
    #[error("Order total overflows with {quantity} x '{ticket_type}'")]
    TotalOverflow {
        /// Ticket type being edited
        ticket_type: TicketTypeKey,
        /// Parsed quantity
        quantity: u32,
    },

    /// The form input name does not map to an order field
    #[error("Unknown form field '{0}'")]
    UnknownField(String),

    /// The event id is not in the catalog
    #[error("Event {0} not found in catalog")]
    UnknownEvent(EventId),
}
