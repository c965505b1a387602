//! Environment for the order reducer.

use crate::checkout::CheckoutHandoff;
use crate::session::state::QuantityPolicy;
use box_office_core::environment::Clock;
use std::sync::Arc;

/// Dependencies injected into the order reducer
#[derive(Clone)]
pub struct OrderEnvironment {
    /// Clock for submission timestamps
    pub clock: Arc<dyn Clock>,
    /// Receives submitted orders
    pub checkout: Arc<dyn CheckoutHandoff>,
    /// Bound applied to quantity edits
    pub quantity_policy: QuantityPolicy,
}

impl OrderEnvironment {
    /// Creates an environment with no quantity cap
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, checkout: Arc<dyn CheckoutHandoff>) -> Self {
        Self {
            clock,
            checkout,
            quantity_policy: QuantityPolicy::unbounded(),
        }
    }

    /// Replaces the quantity policy
    #[must_use]
    pub fn with_quantity_policy(mut self, policy: QuantityPolicy) -> Self {
        self.quantity_policy = policy;
        self
    }
}
