//! The purchase session reducer.
//!
//! Every state transition of a session flows through
//! [`PurchaseSessionReducer::reduce`]. Pricing is recomputed
//! synchronously inside the reducer on every input that affects it, so
//! the breakdown in state is never stale relative to the inputs in
//! state. Async gateway responses carry the sequence number of the
//! request that produced them and are discarded when a newer request
//! has been issued since.

use crate::environment::PurchaseEnvironment;
use crate::intent::{PurchaseIntent, payment_window};
use crate::state::{ConfirmBlocker, PurchasePhase, PurchaseSessionState};
use crate::types::{PatronProfile, UserId};
use chrono::{DateTime, Utc};
use stagepass_core::{Effect, Reducer, SmallVec, smallvec};
use stagepass_pricing::{
    CouponId, DEFAULT_TAX_RATE, PromotionInstrument, clamp_quantity, compute_breakdown,
    validate_points_input,
};
use tracing::{debug, warn};

/// Everything that can happen to a purchase session
#[derive(Debug, Clone)]
pub enum PurchaseAction {
    /// The session (re)started, possibly with an authenticated user
    SessionStarted {
        /// Authenticated user, if any
        user: Option<UserId>,
    },
    /// The profile gateway responded
    ProfileLoaded {
        /// Sequence of the request this answers
        seq: u64,
        /// Profile or a user-facing failure reason
        result: Result<PatronProfile, String>,
    },
    /// The user picked a tier
    SelectTier {
        /// Tier key
        name: String,
    },
    /// The user changed the ticket count
    SetQuantity {
        /// Requested count, clamped by the reducer
        quantity: u32,
    },
    /// The user picked a coupon, or cleared the selection
    ///
    /// Only `None` clears; an id outside the eligible set is ignored and
    /// the current selection stands.
    SelectCoupon {
        /// Coupon to apply, `None` to clear
        id: Option<CouponId>,
    },
    /// The promotion code field changed
    PromoInputChanged {
        /// Current field text
        code: String,
    },
    /// The user submitted the promotion code
    ApplyPromoCode,
    /// The promotion gateway responded
    PromotionResolved {
        /// Sequence of the lookup this answers
        seq: u64,
        /// Instrument or a user-facing failure reason
        result: Result<PromotionInstrument, String>,
    },
    /// The user removed the applied promotion
    ClearPromotion,
    /// The points field changed
    PointsInputChanged {
        /// Current field text
        raw: String,
    },
    /// The points field lost focus or was submitted
    PointsInputCommitted,
    /// The user confirmed the purchase
    ConfirmPurchase,
    /// The intent sink accepted the staged intent
    IntentStaged,
    /// The intent sink rejected or failed
    IntentStagingFailed {
        /// User-facing failure reason
        reason: String,
    },
}

/// Reducer for [`PurchaseSessionState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseSessionReducer;

impl PurchaseSessionReducer {
    /// Recompute the price breakdown from the current inputs.
    fn recompute(state: &mut PurchaseSessionState, now: DateTime<Utc>) {
        let coupon_terms = state
            .selected_coupon_info()
            .filter(|c| c.is_eligible(now))
            .map(|c| c.discount);
        let promo_terms = state.applied_promotion.as_ref().map(|p| p.discount);
        let points = validate_points_input(&state.points_input, state.points_balance());

        state.breakdown = compute_breakdown(
            state.unit_price(),
            state.quantity,
            coupon_terms,
            promo_terms,
            points,
            DEFAULT_TAX_RATE,
        );

        if state.breakdown.is_overcommitted() {
            warn!(
                base = %state.breakdown.base_price,
                nominal_discounts = %state.breakdown.nominal_discount_total(),
                "discounts exceed base price, subtotal floored at zero"
            );
        }
    }

    /// Reject confirmation when a precondition fails.
    fn confirm_blocker(state: &PurchaseSessionState) -> Option<ConfirmBlocker> {
        if state.phase == PurchasePhase::Confirmed {
            return Some(ConfirmBlocker::AlreadyConfirmed);
        }
        if state.user.is_none() {
            return Some(ConfirmBlocker::NotAuthenticated);
        }
        if state.selected_tier.is_none() {
            return Some(ConfirmBlocker::NoTierSelected);
        }
        if state.quantity == 0 {
            return Some(ConfirmBlocker::ZeroQuantity);
        }
        if state.unit_price().is_zero() {
            return Some(ConfirmBlocker::UnpricedTier);
        }
        None
    }
}

impl Reducer for PurchaseSessionReducer {
    type State = PurchaseSessionState;
    type Action = PurchaseAction;
    type Environment = PurchaseEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let now = env.clock.now();
        match action {
            PurchaseAction::SessionStarted { user } => {
                state.user = user;
                state.profile = None;
                state.profile_error = None;
                state.selected_coupon = None;
                state.points_input.clear();
                state.profile_seq += 1;
                Self::recompute(state, now);

                let Some(user) = user else {
                    return smallvec![];
                };
                let seq = state.profile_seq;
                let profiles = env.profiles.clone();
                smallvec![Effect::future(async move {
                    let result = profiles
                        .fetch_profile(user)
                        .await
                        .map_err(|e| e.to_string());
                    Some(PurchaseAction::ProfileLoaded { seq, result })
                })]
            }

            PurchaseAction::ProfileLoaded { seq, result } => {
                if seq != state.profile_seq {
                    debug!(seq, current = state.profile_seq, "stale profile response discarded");
                    return smallvec![];
                }
                match result {
                    Ok(profile) => {
                        state.profile = Some(profile);
                        state.profile_error = None;
                    }
                    Err(reason) => {
                        // Points and coupons stay unavailable; the rest
                        // of the session keeps working.
                        state.profile = None;
                        state.profile_error = Some(reason);
                        state.selected_coupon = None;
                    }
                }
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::SelectTier { name } => {
                if state.phase == PurchasePhase::Confirmed || state.listing.tier(&name).is_none() {
                    return smallvec![];
                }
                state.selected_tier = Some(name);
                state.phase = PurchasePhase::TierSelected;
                state.quantity = clamp_quantity(1, state.remaining_seats());
                state.selected_coupon = None;
                state.applied_promotion = None;
                state.promo_error = None;
                state.promo_input.clear();
                state.promo_seq += 1;
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::SetQuantity { quantity } => {
                state.quantity = clamp_quantity(quantity, state.remaining_seats());
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::SelectCoupon { id } => {
                match id {
                    None => state.selected_coupon = None,
                    Some(wanted) => {
                        let eligible = state
                            .eligible_coupons(now)
                            .iter()
                            .any(|c| c.id == wanted);
                        if eligible {
                            state.selected_coupon = Some(wanted);
                        }
                    }
                }
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::PromoInputChanged { code } => {
                state.promo_input = code;
                smallvec![]
            }

            PurchaseAction::ApplyPromoCode => {
                let code = state.promo_input.trim().to_string();
                if code.is_empty() {
                    return smallvec![];
                }
                state.promo_seq += 1;
                state.promo_error = None;
                let seq = state.promo_seq;
                let event_id = state.listing.id;
                let promotions = env.promotions.clone();
                smallvec![Effect::future(async move {
                    let result = promotions
                        .lookup(event_id, &code)
                        .await
                        .map_err(|e| e.to_string());
                    Some(PurchaseAction::PromotionResolved { seq, result })
                })]
            }

            PurchaseAction::PromotionResolved { seq, result } => {
                if seq != state.promo_seq {
                    debug!(seq, current = state.promo_seq, "stale promotion response discarded");
                    return smallvec![];
                }
                match result {
                    // The gateway returns the instrument as stored, so
                    // eligibility is re-checked here with session time.
                    Ok(promotion) => match promotion.validate(state.listing.id, now) {
                        Ok(()) => {
                            state.applied_promotion = Some(promotion);
                            state.promo_error = None;
                        }
                        Err(reason) => {
                            state.applied_promotion = None;
                            state.promo_error = Some(reason.to_string());
                        }
                    },
                    Err(reason) => {
                        state.applied_promotion = None;
                        state.promo_error = Some(reason);
                    }
                }
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::ClearPromotion => {
                state.applied_promotion = None;
                state.promo_error = None;
                state.promo_input.clear();
                state.promo_seq += 1;
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::PointsInputChanged { raw } => {
                state.points_input = raw;
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::PointsInputCommitted => {
                let sanitized = validate_points_input(&state.points_input, state.points_balance());
                state.points_input = sanitized.to_string();
                Self::recompute(state, now);
                smallvec![]
            }

            PurchaseAction::ConfirmPurchase => {
                if let Some(blocker) = Self::confirm_blocker(state) {
                    debug!(%blocker, "confirmation rejected");
                    state.confirm_blocker = Some(blocker);
                    return smallvec![];
                }
                state.confirm_blocker = None;
                state.staging_error = None;
                Self::recompute(state, now);

                // Preconditions guarantee user and tier are present.
                let (Some(user_id), Some(tier)) = (state.user, state.selected_tier.clone()) else {
                    return smallvec![];
                };
                let intent = PurchaseIntent {
                    event_id: state.listing.id,
                    user_id,
                    tier,
                    quantity: state.quantity,
                    coupon_id: state.selected_coupon,
                    promotion_code: state.applied_promotion.as_ref().map(|p| p.code.clone()),
                    points_used: validate_points_input(
                        &state.points_input,
                        state.points_balance(),
                    ),
                    breakdown: state.breakdown,
                    amount_due: state.breakdown.final_price,
                    payment_deadline: now + payment_window(),
                };
                state.staged_intent = Some(intent.clone());

                let intents = env.intents.clone();
                smallvec![Effect::future(async move {
                    match intents.stage(intent).await {
                        Ok(()) => Some(PurchaseAction::IntentStaged),
                        Err(e) => Some(PurchaseAction::IntentStagingFailed {
                            reason: e.to_string(),
                        }),
                    }
                })]
            }

            PurchaseAction::IntentStaged => {
                state.phase = PurchasePhase::Confirmed;
                smallvec![]
            }

            PurchaseAction::IntentStagingFailed { reason } => {
                warn!(%reason, "intent staging failed");
                state.staged_intent = None;
                state.staging_error = Some(reason);
                smallvec![]
            }
        }
    }
}
