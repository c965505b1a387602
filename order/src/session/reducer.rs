//! Reducer for the order session.

use crate::checkout::OrderSubmission;
use crate::session::{OrderAction, OrderEnvironment, SessionState};
use box_office_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// Reducer for the single-event order form
///
/// - `SelectEvent` replaces the order wholesale
/// - `SetField` writes one text field
/// - `SetQuantity` writes one quantity and recomputes the total, or is
///   rejected with the state untouched
/// - `Submit` hands a snapshot to the checkout collaborator
///
/// Rejections are logged; they never reach the caller as a panic.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderReducer;

impl OrderReducer {
    /// Creates a new `OrderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for OrderReducer {
    type State = SessionState;
    type Action = OrderAction;
    type Environment = OrderEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OrderAction::SelectEvent { event } => {
                tracing::info!(event_id = %event.id, event_name = %event.name, "Event selected, order reset");
                state.reset(event);
                smallvec![Effect::None]
            }

            OrderAction::SetField { field, value } => {
                tracing::debug!(%field, "Order field updated");
                state.set_field(field, value);
                smallvec![Effect::None]
            }

            OrderAction::SetQuantity { ticket_type, raw } => {
                match state.set_quantity(&ticket_type, &raw, env.quantity_policy) {
                    Ok(quantity) => tracing::debug!(
                        %ticket_type,
                        quantity,
                        total = %state.order().total(),
                        "Ticket quantity updated"
                    ),
                    Err(error) => tracing::warn!(%ticket_type, %error, "Quantity edit rejected"),
                }
                smallvec![Effect::None]
            }

            OrderAction::Submit => {
                let submission = OrderSubmission::new(
                    state.order().clone(),
                    state.event().name.clone(),
                    env.clock.now(),
                );
                let event_id = state.order().active_event_id().clone();
                let checkout = Arc::clone(&env.checkout);

                tracing::info!(%event_id, total = %submission.total(), "Submitting order");

                smallvec![Effect::Future(Box::pin(async move {
                    let outcome = checkout.hand_off(submission).await;
                    Some(OrderAction::CheckoutCompleted { event_id, outcome })
                }))]
            }

            OrderAction::CheckoutCompleted { event_id, outcome } => {
                match outcome {
                    Ok(()) => tracing::info!(%event_id, "Checkout accepted the order"),
                    Err(error) => tracing::warn!(%event_id, %error, "Checkout failed"),
                }
                smallvec![Effect::None]
            }
        }
    }
}
