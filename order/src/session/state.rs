//! Order state and the pricing rules that keep its total in sync.

use crate::error::OrderError;
use crate::types::{
    Event, EventId, Money, OrderField, PaymentFields, PurchaserFields, TicketType, TicketTypeKey,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

// ============================================================================
// OrderState
// ============================================================================

/// The in-progress order for the active event
///
/// Invariants:
/// - `quantities` has exactly one entry per ticket type of the active event
/// - `total` equals the sum of `cost * quantity` over those ticket types
/// - `active_event_id` is the event the state was last reset against
///
/// Only the session mutates it; everyone else reads a clone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderState {
    active_event_id: EventId,
    purchaser: PurchaserFields,
    payment: PaymentFields,
    quantities: BTreeMap<TicketTypeKey, u32>,
    total: Money,
}

impl OrderState {
    /// Fresh order for `event`: empty fields, zero quantities, zero total
    #[must_use]
    pub fn for_event(event: &Event) -> Self {
        Self {
            active_event_id: event.id.clone(),
            purchaser: PurchaserFields::default(),
            payment: PaymentFields::default(),
            quantities: event
                .ticket_types
                .iter()
                .map(|ticket| (ticket.key.clone(), 0))
                .collect(),
            total: Money::ZERO,
        }
    }

    /// Event this order belongs to
    #[must_use]
    pub const fn active_event_id(&self) -> &EventId {
        &self.active_event_id
    }

    /// Purchaser section
    #[must_use]
    pub const fn purchaser(&self) -> &PurchaserFields {
        &self.purchaser
    }

    /// Payment section
    #[must_use]
    pub const fn payment(&self) -> &PaymentFields {
        &self.payment
    }

    /// Quantity per ticket type
    #[must_use]
    pub const fn quantities(&self) -> &BTreeMap<TicketTypeKey, u32> {
        &self.quantities
    }

    /// Quantity of one ticket type, `None` if the event doesn't offer it
    #[must_use]
    pub fn quantity(&self, ticket_type: &TicketTypeKey) -> Option<u32> {
        self.quantities.get(ticket_type).copied()
    }

    /// Order total
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Order total divided by 100 (dollars with cents as the fraction)
    #[must_use]
    pub fn total_dollars(&self) -> f64 {
        self.total.as_dollars_f64()
    }

    /// Number of tickets across all types
    #[must_use]
    pub fn ticket_count(&self) -> u64 {
        self.quantities.values().map(|&q| u64::from(q)).sum()
    }

    /// Current text of one form field
    #[must_use]
    pub fn field(&self, field: OrderField) -> &str {
        match field {
            OrderField::FirstName => &self.purchaser.first_name,
            OrderField::LastName => &self.purchaser.last_name,
            OrderField::Address => &self.purchaser.address,
            OrderField::CardNumber => &self.payment.card_number,
            OrderField::CardExpiration => &self.payment.card_expiration,
            OrderField::CardCvv => &self.payment.card_cvv,
        }
    }

    /// Rows for the ticket table, in the event's ticket type order
    pub fn line_items<'a>(&'a self, event: &'a Event) -> impl Iterator<Item = LineItem<'a>> + 'a {
        event.ticket_types.iter().map(move |ticket| {
            let quantity = self.quantity(&ticket.key).unwrap_or(0);
            LineItem {
                ticket_type: ticket,
                quantity,
                subtotal: Money::from_cents(ticket.cost.cents().saturating_mul(u64::from(quantity))),
            }
        })
    }

    fn set_field(&mut self, field: OrderField, value: String) {
        let slot = match field {
            OrderField::FirstName => &mut self.purchaser.first_name,
            OrderField::LastName => &mut self.purchaser.last_name,
            OrderField::Address => &mut self.purchaser.address,
            OrderField::CardNumber => &mut self.payment.card_number,
            OrderField::CardExpiration => &mut self.payment.card_expiration,
            OrderField::CardCvv => &mut self.payment.card_cvv,
        };
        *slot = value;
    }
}

/// One row of the ticket table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineItem<'a> {
    /// Ticket type shown on this row
    pub ticket_type: &'a TicketType,
    /// Selected quantity
    pub quantity: u32,
    /// `cost * quantity`
    pub subtotal: Money,
}

// ============================================================================
// Pricing
// ============================================================================

/// Sums `cost * quantity` over `ticket_types`
///
/// Returns `None` on overflow.
pub fn compute_total<F>(ticket_types: &[TicketType], quantity_of: F) -> Option<Money>
where
    F: Fn(&TicketTypeKey) -> u32,
{
    ticket_types.iter().try_fold(Money::ZERO, |total, ticket| {
        ticket
            .cost
            .checked_multiply(quantity_of(&ticket.key))
            .and_then(|line| total.checked_add(line))
    })
}

/// Parses quantity text as typed into a number input
///
/// Surrounding whitespace is ignored and an empty input counts as 0. Anything
/// other than ASCII digits (signs, decimals, exponents) is rejected.
///
/// # Errors
///
/// Returns [`OrderError::InvalidQuantity`] if the text is not a whole number
/// that fits in a `u32`.
pub fn parse_quantity(raw: &str) -> Result<u32, OrderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OrderError::InvalidQuantity {
            raw: raw.to_string(),
        });
    }

    trimmed.parse().map_err(|_| OrderError::InvalidQuantity {
        raw: raw.to_string(),
    })
}

/// Upper bound applied to quantities before they enter the order
///
/// Unbounded by default: the per-input maximum is a presentation hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityPolicy {
    cap: Option<u32>,
}

impl QuantityPolicy {
    /// Accept any quantity
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { cap: None }
    }

    /// Reject quantities above `cap`
    #[must_use]
    pub const fn capped(cap: u32) -> Self {
        Self { cap: Some(cap) }
    }

    /// Policy from an optional cap
    #[must_use]
    pub const fn from_cap(cap: Option<u32>) -> Self {
        Self { cap }
    }

    /// The enforced cap, if any
    #[must_use]
    pub const fn cap(&self) -> Option<u32> {
        self.cap
    }

    /// Checks a parsed quantity against the cap
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::QuantityAboveCap`] when a cap is set and exceeded.
    pub fn check(&self, quantity: u32) -> Result<u32, OrderError> {
        match self.cap {
            Some(cap) if quantity > cap => Err(OrderError::QuantityAboveCap { quantity, cap }),
            _ => Ok(quantity),
        }
    }
}

// ============================================================================
// SessionState
// ============================================================================

/// Reducer state: the active event plus the order being built for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    event: Arc<Event>,
    order: OrderState,
}

impl SessionState {
    /// Session with `event` active and a fresh order
    #[must_use]
    pub fn new(event: Arc<Event>) -> Self {
        let order = OrderState::for_event(&event);
        Self { event, order }
    }

    /// The active event
    #[must_use]
    pub const fn event(&self) -> &Arc<Event> {
        &self.event
    }

    /// The order being built
    #[must_use]
    pub const fn order(&self) -> &OrderState {
        &self.order
    }

    /// Replaces the whole order with a fresh one for `event`
    pub(crate) fn reset(&mut self, event: Arc<Event>) {
        self.order = OrderState::for_event(&event);
        self.event = event;
    }

    /// Overwrites one text field; quantities and total are untouched
    pub(crate) fn set_field(&mut self, field: OrderField, value: String) {
        self.order.set_field(field, value);
    }

    /// Stores a new quantity and recomputes the total
    ///
    /// On any error nothing is written.
    pub(crate) fn set_quantity(
        &mut self,
        ticket_type: &TicketTypeKey,
        raw: &str,
        policy: QuantityPolicy,
    ) -> Result<u32, OrderError> {
        if self.event.ticket_type(ticket_type).is_none() {
            return Err(OrderError::UnknownTicketType {
                event_id: self.order.active_event_id.clone(),
                ticket_type: ticket_type.clone(),
            });
        }

        let quantity = policy.check(parse_quantity(raw)?)?;

        let quantities = &self.order.quantities;
        let total = compute_total(&self.event.ticket_types, |key| {
            if key == ticket_type {
                quantity
            } else {
                quantities.get(key).copied().unwrap_or(0)
            }
        })
        .ok_or_else(|| OrderError::TotalOverflow {
            ticket_type: ticket_type.clone(),
            quantity,
        })?;

        self.order.quantities.insert(ticket_type.clone(), quantity);
        self.order.total = total;
        Ok(quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn concert() -> Event {
        Event {
            id: EventId::new("ska-band"),
            name: "The Skankin' Pickles".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 26).unwrap(),
            location: "Brooklyn, NY".to_string(),
            img_url: String::new(),
            description: String::new(),
            ticket_types: vec![
                TicketType::new("vip", "VIP", "Front row", Money::from_cents(5_000)),
                TicketType::new("general", "General", "Standing", Money::from_cents(2_500)),
            ],
        }
    }

    #[test]
    fn test_parse_quantity_accepts_digits_and_blank() {
        assert_eq!(parse_quantity("2"), Ok(2));
        assert_eq!(parse_quantity(" 12 "), Ok(12));
        assert_eq!(parse_quantity("007"), Ok(7));
        assert_eq!(parse_quantity(""), Ok(0));
        assert_eq!(parse_quantity("150"), Ok(150));
    }

    #[test]
    fn test_parse_quantity_rejects_non_digits() {
        for raw in ["abc", "-1", "+3", "1.5", "1e2", "2 3", "99999999999"] {
            assert!(
                matches!(parse_quantity(raw), Err(OrderError::InvalidQuantity { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_compute_total_uses_every_ticket_type() {
        let event = concert();
        let total = compute_total(&event.ticket_types, |key| match key.as_str() {
            "vip" => 2,
            "general" => 1,
            _ => 0,
        });
        assert_eq!(total, Some(Money::from_cents(12_500)));
    }

    #[test]
    fn test_compute_total_overflow() {
        let ticket_types = vec![TicketType::new("x", "X", "", Money::from_cents(u64::MAX))];
        assert_eq!(compute_total(&ticket_types, |_| 2), None);
    }

    #[test]
    fn test_quantity_policy() {
        assert_eq!(QuantityPolicy::unbounded().check(1_000), Ok(1_000));
        assert_eq!(QuantityPolicy::capped(99).check(99), Ok(99));
        assert_eq!(
            QuantityPolicy::capped(99).check(100),
            Err(OrderError::QuantityAboveCap {
                quantity: 100,
                cap: 99
            })
        );
    }

    #[test]
    fn test_line_items_follow_event_order() {
        let event = concert();
        let mut state = SessionState::new(Arc::new(event.clone()));
        state
            .set_quantity(&"general".into(), "3", QuantityPolicy::unbounded())
            .unwrap();

        let items: Vec<_> = state.order().line_items(&event).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].ticket_type.key.as_str(), "vip");
        assert_eq!(items[0].quantity, 0);
        assert_eq!(items[1].quantity, 3);
        assert_eq!(items[1].subtotal, Money::from_cents(7_500));
        assert_eq!(state.order().ticket_count(), 3);
    }

    #[test]
    fn test_overflowing_quantity_leaves_state_unchanged() {
        let event = Event {
            ticket_types: vec![TicketType::new(
                "vip",
                "VIP",
                "",
                Money::from_cents(u64::MAX / 2),
            )],
            ..concert()
        };
        let mut state = SessionState::new(Arc::new(event));
        let before = state.clone();

        let result = state.set_quantity(&"vip".into(), "3", QuantityPolicy::unbounded());

        assert!(matches!(result, Err(OrderError::TotalOverflow { .. })));
        assert_eq!(state, before);
    }
}
