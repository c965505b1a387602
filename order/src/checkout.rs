//! Hand-off of a finished order to whatever sends it on.
//!
//! The order form never talks to a payment or booking service itself. On
//! submit it builds an [`OrderSubmission`] and passes it to a
//! [`CheckoutHandoff`]. Two implementations ship with the crate:
//! [`LoggingCheckout`] writes a summary to the log and
//! [`RecordingCheckout`] keeps submissions in memory for tests and demos.

use crate::session::OrderState;
use crate::types::Money;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Checkout hand-off result
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Checkout hand-off error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The collaborator refused the order
    #[error("Checkout rejected the order: {reason}")]
    Rejected {
        /// Reason given by the collaborator
        reason: String,
    },
    /// The collaborator could not be reached
    #[error("Checkout unavailable")]
    Unavailable,
}

/// A snapshot of the order at the moment the user pressed submit
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    /// The order, exactly as it was when submitted
    pub order: OrderState,
    /// Name of the event, for receipts
    pub event_name: String,
    /// When submit was pressed
    pub submitted_at: DateTime<Utc>,
}

impl OrderSubmission {
    /// Creates a submission
    #[must_use]
    pub const fn new(order: OrderState, event_name: String, submitted_at: DateTime<Utc>) -> Self {
        Self {
            order,
            event_name,
            submitted_at,
        }
    }

    /// Amount due
    #[must_use]
    pub const fn total(&self) -> Money {
        self.order.total()
    }
}

/// Collaborator that receives submitted orders
pub trait CheckoutHandoff: Send + Sync {
    /// Take ownership of a submitted order
    ///
    /// # Errors
    ///
    /// Returns error if the collaborator does not accept the order
    fn hand_off(
        &self,
        submission: OrderSubmission,
    ) -> Pin<Box<dyn Future<Output = CheckoutResult<()>> + Send>>;
}

/// Logs a summary of each submission and accepts it
///
/// Card fields are never written to the log.
#[derive(Clone, Debug, Default)]
pub struct LoggingCheckout;

impl LoggingCheckout {
    /// Creates a new logging checkout
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn CheckoutHandoff> {
        Arc::new(Self::new())
    }
}

impl CheckoutHandoff for LoggingCheckout {
    fn hand_off(
        &self,
        submission: OrderSubmission,
    ) -> Pin<Box<dyn Future<Output = CheckoutResult<()>> + Send>> {
        Box::pin(async move {
            let order = &submission.order;
            tracing::info!(
                event_id = %order.active_event_id(),
                event_name = %submission.event_name,
                tickets = order.ticket_count(),
                total = %order.total(),
                first_name = %order.purchaser().first_name,
                last_name = %order.purchaser().last_name,
                submitted_at = %submission.submitted_at,
                "Order handed off to checkout"
            );
            Ok(())
        })
    }
}

/// Keeps every submission in memory
///
/// Optionally rejects everything, to exercise the failure path.
#[derive(Clone, Debug, Default)]
pub struct RecordingCheckout {
    submissions: Arc<Mutex<Vec<OrderSubmission>>>,
    reject_with: Option<String>,
}

impl RecordingCheckout {
    /// Creates a checkout that accepts and records every submission
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checkout that records and then rejects every submission
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            submissions: Arc::default(),
            reject_with: Some(reason.into()),
        }
    }

    /// Submissions received so far, oldest first
    #[must_use]
    pub fn submissions(&self) -> Vec<OrderSubmission> {
        match self.submissions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CheckoutHandoff for RecordingCheckout {
    fn hand_off(
        &self,
        submission: OrderSubmission,
    ) -> Pin<Box<dyn Future<Output = CheckoutResult<()>> + Send>> {
        match self.submissions.lock() {
            Ok(mut guard) => guard.push(submission),
            Err(poisoned) => poisoned.into_inner().push(submission),
        }

        let outcome = self
            .reject_with
            .clone()
            .map_or(Ok(()), |reason| Err(CheckoutError::Rejected { reason }));

        Box::pin(async move { outcome })
    }
}
