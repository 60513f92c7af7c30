//! # Stagepass Testing
//!
//! Testing utilities and helpers for Stagepass purchase sessions.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Test tracing setup
//!
//! ## Example
//!
//! ```ignore
//! use stagepass_testing::test_clock;
//! use stagepass_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_purchase_flow() {
//!     let env = test_environment();
//!     let store = Store::new(PurchaseSessionState::new(listing, user), PurchaseSessionReducer, env);
//!
//!     store.send(PurchaseAction::SelectTier { name: "vip".into() }).await?;
//!
//!     let quantity = store.state(|s| s.quantity).await;
//!     assert_eq!(quantity, 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use stagepass_core::environment::Clock;

/// Fluent Given-When-Then harness for reducers
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use stagepass_testing::mocks::FixedClock;
    /// use stagepass_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
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
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
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

/// Initialize tracing for tests
///
/// Installs a compact subscriber honoring `RUST_LOG`. Safe to call from
/// multiple tests; only the first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::ReducerTest;
