//! Domain types for the purchase session.

use serde::{Deserialize, Serialize};
use stagepass_pricing::{CouponInstrument, EventId, Money};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `UserId` from a `Uuid`
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One priced tier of an event (the event's `price` mapping, ordered)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    /// Tier key, e.g. `"regular"`, `"vip"`
    pub name: String,
    /// Price per ticket
    pub unit_price: Money,
}

impl TicketTier {
    /// Create a tier
    #[must_use]
    pub const fn new(name: String, unit_price: Money) -> Self {
        Self { name, unit_price }
    }
}

/// The event being purchased against
///
/// Seat count is treated as static for the duration of a session; the
/// authoritative availability check happens at the external
/// transaction-commit boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListing {
    /// Event identity
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Priced tiers, in display order
    pub tiers: Vec<TicketTier>,
    /// Remaining seats at session start
    pub seats: u32,
}

impl EventListing {
    /// Look up a tier by its key
    #[must_use]
    pub fn tier(&self, name: &str) -> Option<&TicketTier> {
        self.tiers.iter().find(|t| t.name == name)
    }
}

/// The purchasing user's discount-relevant data
///
/// Fetched once per authenticated session change through the profile
/// gateway; coupons returned are already scoped to the requesting user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatronProfile {
    /// Profile owner
    pub user_id: UserId,
    /// Redeemable points, 1 point = 1 minor currency unit
    pub points_balance: u64,
    /// Coupons owned by the user (used and unused alike)
    pub coupons: Vec<CouponInstrument>,
}
