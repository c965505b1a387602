//! # Box Office Testing
//!
//! Testing utilities for the box office reducers.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits ([`FixedClock`])
//! - The Given/When/Then [`ReducerTest`] builder
//! - Assertion helpers for effect lists
//!
//! ## Example
//!
//! ```ignore
//! use box_office_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(OrderReducer::new())
//!     .with_env(OrderEnvironment::new(Arc::new(test_clock()), checkout))
//!     .given_state(SessionState::new(event))
//!     .when_action(OrderAction::SetQuantity { .. })
//!     .then_state(|state| assert_eq!(state.order().total(), Money::from_cents(10_000)))
//!     .run();
//! ```

use box_office_core::environment::Clock;
use chrono::{DateTime, Utc};

pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use box_office_testing::mocks::FixedClock;
    /// use box_office_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{assertions, ReducerTest};
