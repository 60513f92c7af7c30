//! The write-once purchase intent produced by a confirmed session.

use crate::types::UserId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use stagepass_pricing::{CouponId, EventId, Money, PriceBreakdown};

/// How long a staged purchase may remain unpaid before it expires
#[must_use]
pub fn payment_window() -> Duration {
    Duration::hours(2)
}

/// Time allotted to complete payment after confirmation
pub const PAYMENT_WINDOW_HOURS: i64 = 2;

/// Immutable snapshot of a confirmed purchase
///
/// Captures every input that contributed to the final price so the
/// payment stage never re-derives anything from mutable session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntent {
    /// Event being purchased
    pub event_id: EventId,
    /// Purchasing user
    pub user_id: UserId,
    /// Selected tier key
    pub tier: String,
    /// Ticket count
    pub quantity: u32,
    /// Coupon redeemed, if any
    pub coupon_id: Option<CouponId>,
    /// Promotion code applied, if any
    pub promotion_code: Option<String>,
    /// Points redeemed
    pub points_used: u64,
    /// Full price breakdown at confirmation time
    pub breakdown: PriceBreakdown,
    /// Amount the payment stage must collect
    pub amount_due: Money,
    /// Instant the payment window closes
    pub payment_deadline: DateTime<Utc>,
}

impl PurchaseIntent {
    /// Serialize to JSON for hand-off to the payment stage
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from the JSON produced by [`to_json`](Self::to_json)
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid intent.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use stagepass_pricing::{DEFAULT_TAX_RATE, compute_breakdown};

    #[test]
    fn intent_round_trips_through_json() {
        let breakdown = compute_breakdown(
            Money::from_minor(50_000),
            2,
            None,
            None,
            0,
            DEFAULT_TAX_RATE,
        );
        let intent = PurchaseIntent {
            event_id: EventId::new(),
            user_id: UserId::new(),
            tier: "regular".to_string(),
            quantity: 2,
            coupon_id: None,
            promotion_code: Some("LAUNCH".to_string()),
            points_used: 0,
            breakdown,
            amount_due: breakdown.final_price,
            payment_deadline: Utc::now() + payment_window(),
        };

        let json = intent.to_json().unwrap();
        let restored = PurchaseIntent::from_json(&json).unwrap();
        assert_eq!(restored, intent);
    }

    #[test]
    fn payment_window_is_two_hours() {
        assert_eq!(payment_window(), Duration::hours(PAYMENT_WINDOW_HOURS));
    }
}
