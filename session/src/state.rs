//! Purchase session state.

use crate::intent::PurchaseIntent;
use crate::types::{EventListing, PatronProfile, TicketTier, UserId};
use serde::{Deserialize, Serialize};
use stagepass_pricing::{CouponId, CouponInstrument, Money, PriceBreakdown, PromotionInstrument};

/// Remaining-seat count at or below which the UI surfaces urgency
pub const LOW_STOCK_THRESHOLD: u32 = 50;

/// Where the session is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchasePhase {
    /// No tier selected yet
    #[default]
    Browsing,
    /// A tier is selected and the price panel is live
    TierSelected,
    /// The intent has been staged; the session is terminal
    Confirmed,
}

/// Why a confirmation attempt was rejected
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ConfirmBlocker {
    /// No authenticated user on the session
    #[error("sign in to purchase tickets")]
    NotAuthenticated,
    /// No tier has been selected
    #[error("select a ticket tier first")]
    NoTierSelected,
    /// Quantity is zero
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// The selected tier has no price
    #[error("selected tier has no price")]
    UnpricedTier,
    /// A previous confirmation already staged an intent
    #[error("purchase already confirmed")]
    AlreadyConfirmed,
}

/// Full state of one purchase session
///
/// Owned by the store and mutated only through
/// [`PurchaseSessionReducer`](crate::PurchaseSessionReducer).
#[derive(Debug, Clone)]
pub struct PurchaseSessionState {
    /// The event under purchase
    pub listing: EventListing,
    /// Authenticated user, if any
    pub user: Option<UserId>,
    /// Lifecycle phase
    pub phase: PurchasePhase,

    /// Selected tier key
    pub selected_tier: Option<String>,
    /// Ticket count, kept within the per-order cap by the reducer
    pub quantity: u32,

    /// Coupon the user picked from their eligible set
    pub selected_coupon: Option<CouponId>,

    /// Raw promotion code input
    pub promo_input: String,
    /// Promotion accepted by both server and client validation
    pub applied_promotion: Option<PromotionInstrument>,
    /// User-facing reason the last code was rejected
    pub promo_error: Option<String>,

    /// Raw points field text, sanitized on commit
    pub points_input: String,

    /// Loaded profile, absent until the gateway responds
    pub profile: Option<PatronProfile>,
    /// User-facing reason the profile is unavailable
    pub profile_error: Option<String>,

    /// Current price breakdown, recomputed on every pricing input change
    pub breakdown: PriceBreakdown,

    /// Sequence of the most recent profile request
    pub profile_seq: u64,
    /// Sequence of the most recent promotion lookup
    pub promo_seq: u64,

    /// Intent staged by a successful confirmation
    pub staged_intent: Option<PurchaseIntent>,
    /// Why the last confirmation attempt was rejected
    pub confirm_blocker: Option<ConfirmBlocker>,
    /// Reported when staging the intent failed downstream
    pub staging_error: Option<String>,
}

impl PurchaseSessionState {
    /// Start a session over `listing`, optionally authenticated
    #[must_use]
    pub fn new(listing: EventListing, user: Option<UserId>) -> Self {
        Self {
            listing,
            user,
            phase: PurchasePhase::Browsing,
            selected_tier: None,
            quantity: 1,
            selected_coupon: None,
            promo_input: String::new(),
            applied_promotion: None,
            promo_error: None,
            points_input: String::new(),
            profile: None,
            profile_error: None,
            breakdown: PriceBreakdown::default(),
            profile_seq: 0,
            promo_seq: 0,
            staged_intent: None,
            confirm_blocker: None,
            staging_error: None,
        }
    }

    /// Seats still available on the listing
    #[must_use]
    pub const fn remaining_seats(&self) -> u32 {
        self.listing.seats
    }

    /// Whether the urgency indicator should be shown
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.listing.seats <= LOW_STOCK_THRESHOLD && self.listing.seats > 0
    }

    /// Whether the listing has no seats left
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.listing.seats == 0
    }

    /// The currently selected tier, if one is set and still exists
    #[must_use]
    pub fn selected_tier_info(&self) -> Option<&TicketTier> {
        self.selected_tier
            .as_deref()
            .and_then(|name| self.listing.tier(name))
    }

    /// Unit price of the selected tier, zero when nothing is selected
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.selected_tier_info()
            .map_or(Money::ZERO, |t| t.unit_price)
    }

    /// Coupons the user may redeem right now
    ///
    /// Unused and unexpired at `now`; empty until a profile is loaded.
    #[must_use]
    pub fn eligible_coupons(&self, now: chrono::DateTime<chrono::Utc>) -> Vec<&CouponInstrument> {
        self.profile
            .as_ref()
            .map(|p| p.coupons.iter().filter(|c| c.is_eligible(now)).collect())
            .unwrap_or_default()
    }

    /// The selected coupon's instrument, if it is still in the profile
    #[must_use]
    pub fn selected_coupon_info(&self) -> Option<&CouponInstrument> {
        let wanted = self.selected_coupon?;
        self.profile
            .as_ref()?
            .coupons
            .iter()
            .find(|c| c.id == wanted)
    }

    /// Points balance from the loaded profile, zero before it arrives
    #[must_use]
    pub fn points_balance(&self) -> u64 {
        self.profile.as_ref().map_or(0, |p| p.points_balance)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::{TimeZone, Utc};
    use stagepass_pricing::{DiscountMode, DiscountTerms, EventId};

    fn listing(seats: u32) -> EventListing {
        EventListing {
            id: EventId::new(),
            name: "Arena Show".to_string(),
            tiers: vec![TicketTier::new(
                "regular".to_string(),
                Money::from_minor(50_000),
            )],
            seats,
        }
    }

    #[test]
    fn low_stock_boundaries() {
        assert!(PurchaseSessionState::new(listing(50), None).is_low_stock());
        assert!(!PurchaseSessionState::new(listing(51), None).is_low_stock());
        assert!(!PurchaseSessionState::new(listing(0), None).is_low_stock());
        assert!(PurchaseSessionState::new(listing(0), None).is_sold_out());
    }

    #[test]
    fn eligible_coupons_filters_used_and_expired() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut state = PurchaseSessionState::new(listing(100), Some(UserId::new()));
        let terms = DiscountTerms::new(DiscountMode::Percentage, 10);
        let good = CouponInstrument {
            id: stagepass_pricing::CouponId::new(),
            discount: terms,
            is_used: false,
            expires_at: now + chrono::Duration::days(30),
        };
        let used = CouponInstrument {
            id: stagepass_pricing::CouponId::new(),
            discount: terms,
            is_used: true,
            expires_at: now + chrono::Duration::days(30),
        };
        let expired = CouponInstrument {
            id: stagepass_pricing::CouponId::new(),
            discount: terms,
            is_used: false,
            expires_at: now - chrono::Duration::days(1),
        };
        state.profile = Some(PatronProfile {
            user_id: UserId::new(),
            points_balance: 0,
            coupons: vec![good.clone(), used, expired],
        });

        let eligible = state.eligible_coupons(now);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, good.id);
    }

    #[test]
    fn unit_price_defaults_to_zero_without_selection() {
        let state = PurchaseSessionState::new(listing(100), None);
        assert_eq!(state.unit_price(), Money::ZERO);
    }
}
