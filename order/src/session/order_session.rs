//! Synchronous order session for single-threaded hosts.
//!
//! Same rules as [`OrderReducer`](crate::session::OrderReducer), but every
//! edit returns the updated order (or the reason it was rejected) directly.
//! Hosts that share one order across tasks use [`OrderStore`](crate::session::OrderStore).

use crate::catalog::EventCatalog;
use crate::checkout::OrderSubmission;
use crate::error::OrderError;
use crate::session::{OrderState, QuantityPolicy, SessionState};
use crate::types::{Event, EventId, OrderField, TicketTypeKey};
use box_office_core::environment::Clock;
use std::sync::Arc;

/// Owns the order for the active event
#[derive(Clone, Debug)]
pub struct OrderSession {
    state: SessionState,
    policy: QuantityPolicy,
}

impl OrderSession {
    /// Opens a session with `event` active
    #[must_use]
    pub fn new(event: Arc<Event>) -> Self {
        Self {
            state: SessionState::new(event),
            policy: QuantityPolicy::unbounded(),
        }
    }

    /// Replaces the quantity policy
    #[must_use]
    pub fn with_quantity_policy(mut self, policy: QuantityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active event
    #[must_use]
    pub const fn event(&self) -> &Arc<Event> {
        self.state.event()
    }

    /// The current order, borrowed
    #[must_use]
    pub const fn order(&self) -> &OrderState {
        self.state.order()
    }

    /// Makes `event` active and starts a fresh order for it
    ///
    /// Always a full replace, even when `event` is already active.
    pub fn reset(&mut self, event: Arc<Event>) -> &OrderState {
        tracing::info!(event_id = %event.id, "Event selected, order reset");
        self.state.reset(event);
        self.state.order()
    }

    /// Looks `id` up in `catalog` and resets to it
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnknownEvent`] if the catalog has no such event;
    /// the current order is kept.
    pub fn select_event(
        &mut self,
        catalog: &EventCatalog,
        id: &EventId,
    ) -> Result<&OrderState, OrderError> {
        let event = catalog
            .get(id)
            .cloned()
            .ok_or_else(|| OrderError::UnknownEvent(id.clone()))?;
        Ok(self.reset(event))
    }

    /// Overwrites one purchaser or payment field
    pub fn set_field(&mut self, field: OrderField, value: impl Into<String>) -> &OrderState {
        self.state.set_field(field, value.into());
        self.state.order()
    }

    /// Overwrites the field bound to a form input name
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnknownField`] if `input_name` is not one of the
    /// form's text inputs.
    pub fn set_input(
        &mut self,
        input_name: &str,
        value: impl Into<String>,
    ) -> Result<&OrderState, OrderError> {
        let field = OrderField::from_input_name(input_name)
            .ok_or_else(|| OrderError::UnknownField(input_name.to_string()))?;
        Ok(self.set_field(field, value))
    }

    /// Stores a new ticket quantity and recomputes the total
    ///
    /// # Errors
    ///
    /// - [`OrderError::UnknownTicketType`] if the active event has no such ticket type
    /// - [`OrderError::InvalidQuantity`] if `raw` is not a whole number
    /// - [`OrderError::QuantityAboveCap`] if a cap is configured and exceeded
    /// - [`OrderError::TotalOverflow`] if the total would not fit
    ///
    /// The order is unchanged in every error case.
    pub fn set_quantity(
        &mut self,
        ticket_type: &TicketTypeKey,
        raw: &str,
    ) -> Result<&OrderState, OrderError> {
        if let Err(error) = self.state.set_quantity(ticket_type, raw, self.policy) {
            tracing::debug!(%ticket_type, %error, "Quantity edit rejected");
            return Err(error);
        }
        Ok(self.state.order())
    }

    /// Owned copy of the current order
    #[must_use]
    pub fn snapshot(&self) -> OrderState {
        self.state.order().clone()
    }

    /// Snapshot packaged for the checkout collaborator
    #[must_use]
    pub fn submission(&self, clock: &dyn Clock) -> OrderSubmission {
        OrderSubmission::new(self.snapshot(), self.event().name.clone(), clock.now())
    }
}
