//! Environment for the purchase session reducer.
//!
//! The reducer never performs I/O directly. Profile loads, promotion
//! lookups, and intent staging go through the gateway traits here, and
//! the reducer observes time only through the injected [`Clock`].

use crate::intent::PurchaseIntent;
use crate::types::{PatronProfile, UserId};
use async_trait::async_trait;
use stagepass_core::{Clock, environment::SystemClock};
use stagepass_pricing::{EventId, PromotionInstrument};
use std::sync::Arc;

/// Error returned by the session's gateways
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The requested record does not exist
    #[error("not found")]
    NotFound,

    /// The backing service could not be reached or failed
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

/// Loads the purchasing user's discount-relevant data
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch the profile for `user`, coupons included.
    async fn fetch_profile(&self, user: UserId) -> Result<PatronProfile, GatewayError>;
}

/// Resolves promotion codes against the backing catalog
#[async_trait]
pub trait PromotionGateway: Send + Sync {
    /// Look up a promotion by code for the given event.
    ///
    /// Returns the instrument as stored, without applying any
    /// eligibility rules; validation is the caller's responsibility.
    async fn lookup(
        &self,
        event_id: EventId,
        code: &str,
    ) -> Result<PromotionInstrument, GatewayError>;
}

/// Receives the confirmed purchase intent
#[async_trait]
pub trait IntentSink: Send + Sync {
    /// Stage the intent for downstream payment processing.
    async fn stage(&self, intent: PurchaseIntent) -> Result<(), GatewayError>;
}

/// Dependencies for [`PurchaseSessionReducer`](crate::PurchaseSessionReducer)
///
/// Cloning is cheap; all gateways are behind `Arc`.
#[derive(Clone)]
pub struct PurchaseEnvironment {
    /// Profile lookups
    pub profiles: Arc<dyn ProfileGateway>,
    /// Promotion code resolution
    pub promotions: Arc<dyn PromotionGateway>,
    /// Confirmed intent hand-off
    pub intents: Arc<dyn IntentSink>,
    /// Time source
    pub clock: Arc<dyn Clock>,
}

impl PurchaseEnvironment {
    /// Build an environment with the system clock
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileGateway>,
        promotions: Arc<dyn PromotionGateway>,
        intents: Arc<dyn IntentSink>,
    ) -> Self {
        Self {
            profiles,
            promotions,
            intents,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock (used by tests with a fixed clock)
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for PurchaseEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchaseEnvironment").finish_non_exhaustive()
    }
}
