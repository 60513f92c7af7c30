//! Discount instruments and their eligibility rules.
//!
//! Coupons and promotions are *instruments*: they carry an identity, a
//! lifecycle, and eligibility conditions. The price calculation engine never
//! sees any of that; it only receives [`DiscountTerms`], the magnitude-only
//! view extracted from an instrument that has already passed eligibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a coupon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CouponId(Uuid);

impl CouponId {
    /// Creates a new random `CouponId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `CouponId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CouponId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a promotion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromotionId(Uuid);

impl PromotionId {
    /// Creates a new random `PromotionId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `PromotionId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PromotionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PromotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Discount terms
// ============================================================================

/// How a discount value is interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountMode {
    /// Value is a whole-number percentage of the base price
    Percentage,
    /// Value is a fixed amount in minor currency units
    FixedAmount,
}

/// Magnitude-only view of a discount instrument
///
/// This is all the engine ever sees: eligibility, ownership, and lifecycle
/// are resolved by the session before terms are handed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTerms {
    /// How `value` is interpreted
    pub mode: DiscountMode,
    /// Whole percent for [`DiscountMode::Percentage`], minor units for
    /// [`DiscountMode::FixedAmount`]
    pub value: u64,
}

impl DiscountTerms {
    /// Create discount terms
    #[must_use]
    pub const fn new(mode: DiscountMode, value: u64) -> Self {
        Self { mode, value }
    }
}

// ============================================================================
// Coupon
// ============================================================================

/// A coupon owned by a user
///
/// Issued by referral/reward flows and consumed (marked used) at transaction
/// commit; both of those happen outside this core, which only reads coupons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponInstrument {
    /// Coupon identity
    pub id: CouponId,
    /// Discount magnitude
    pub discount: DiscountTerms,
    /// Whether the coupon was already redeemed
    pub is_used: bool,
    /// Expiry timestamp (inclusive)
    pub expires_at: DateTime<Utc>,
}

impl CouponInstrument {
    /// A coupon is eligible when it is unused and unexpired
    ///
    /// Ownership is implied by where the coupon came from: the profile fetch
    /// only returns the requesting user's coupons.
    #[must_use]
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && self.expires_at >= now
    }
}

// ============================================================================
// Promotion
// ============================================================================

/// Why a promotion cannot be applied
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PromotionError {
    /// The promotion has been deactivated by its organizer
    #[error("promotion is not active")]
    Inactive,

    /// The promotion is scoped to a different event
    #[error("promotion does not apply to this event")]
    WrongEvent,

    /// Current time is before the promotion window opens
    #[error("promotion has not started yet")]
    NotStarted,

    /// Current time is after the promotion window closed
    #[error("promotion has expired")]
    Expired,

    /// The promotion's usage limit has been reached
    #[error("promotion usage limit reached")]
    UsageLimitReached,
}

/// A promotion code scoped to a single event
///
/// Created and edited by event organizers; its usage count is incremented at
/// transaction commit. This core only validates applicability and extracts
/// the discount magnitude.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromotionInstrument {
    /// Promotion identity
    pub id: PromotionId,
    /// The code users type in
    pub code: String,
    /// Discount magnitude
    pub discount: DiscountTerms,
    /// The event this promotion is scoped to
    pub event_id: EventId,
    /// Organizer kill switch
    pub is_active: bool,
    /// Start of the validity window (inclusive)
    pub start_date: DateTime<Utc>,
    /// End of the validity window (inclusive)
    pub end_date: DateTime<Utc>,
    /// Maximum number of redemptions, `None` for unlimited
    pub usage_limit: Option<u32>,
    /// Redemptions so far
    pub usage_count: u32,
}

impl PromotionInstrument {
    /// Validate that this promotion applies to `event_id` at `now`
    ///
    /// # Errors
    ///
    /// Returns the first failing condition: inactive, wrong event, outside
    /// the date window, or over the usage limit.
    pub fn validate(&self, event_id: EventId, now: DateTime<Utc>) -> Result<(), PromotionError> {
        if !self.is_active {
            return Err(PromotionError::Inactive);
        }
        if self.event_id != event_id {
            return Err(PromotionError::WrongEvent);
        }
        if now < self.start_date {
            return Err(PromotionError::NotStarted);
        }
        if now > self.end_date {
            return Err(PromotionError::Expired);
        }
        if self.usage_limit.is_some_and(|limit| self.usage_count >= limit) {
            return Err(PromotionError::UsageLimitReached);
        }
        Ok(())
    }
}
