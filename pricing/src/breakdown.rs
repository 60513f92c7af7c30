//! Price calculation engine.
//!
//! [`compute_breakdown`] is a total function: it never fails, never panics,
//! and performs no I/O. Out-of-range inputs are the caller's responsibility
//! to pre-validate (see [`crate::rules`]); the engine's own clamps guarantee
//! no intermediate value ever goes negative regardless.

use crate::instruments::{DiscountMode, DiscountTerms};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Default tax rate applied to the post-discount subtotal
pub const DEFAULT_TAX_RATE: f64 = 0.10;

/// Fully itemized result of one pricing pass
///
/// Immutable per computation; the session replaces the whole value on every
/// recomputation rather than patching fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// `unit_price × quantity`
    pub base_price: Money,
    /// Coupon discount, computed against `base_price` and clamped to it
    pub coupon_discount: Money,
    /// Promotion discount, computed against `base_price` (not the
    /// post-coupon remainder) and clamped to it
    pub promotion_discount: Money,
    /// Points redeemed 1:1 in minor units, clamped to `base_price`
    pub points_discount: Money,
    /// `max(0, base − coupon − promotion − points)`
    pub subtotal_before_tax: Money,
    /// Tax on the subtotal, rounded half away from zero
    pub tax_amount: Money,
    /// `subtotal_before_tax + tax_amount`; never negative
    pub final_price: Money,
}

impl PriceBreakdown {
    /// Sum of all three discounts before the subtotal floor
    ///
    /// Can nominally exceed `base_price` when instruments stack; the
    /// subtotal floor absorbs the overcommit (see crate docs on the
    /// stacking policy).
    #[must_use]
    pub const fn nominal_discount_total(&self) -> Money {
        self.coupon_discount
            .saturating_add(self.promotion_discount)
            .saturating_add(self.points_discount)
    }

    /// True when the nominal discounts requested more than the base price
    #[must_use]
    pub fn is_overcommitted(&self) -> bool {
        self.nominal_discount_total() > self.base_price
    }
}

/// Discount magnitude for one instrument against a base price
///
/// `Percentage` floors (`floor(base × value / 100)`), `FixedAmount` is taken
/// verbatim; either way the result is clamped to `base`.
fn discount_against(base: Money, terms: DiscountTerms) -> Money {
    let raw = match terms.mode {
        DiscountMode::Percentage => base.percentage(terms.value),
        DiscountMode::FixedAmount => Money::from_minor(terms.value),
    };
    raw.min(base)
}

/// Compute a fully itemized price breakdown
///
/// The single pricing algorithm shared by the purchase UI and the
/// server-side transaction path:
///
/// 1. `base = unit_price × quantity`
/// 2. coupon discount against `base`, clamped to `base`
/// 3. promotion discount against `base` (independent of the coupon),
///    clamped to `base`
/// 4. `points_discount = min(points_to_use, base)`
/// 5. `subtotal = max(0, base − coupon − promotion − points)`
/// 6. `tax = round(subtotal × tax_rate)`
/// 7. `final = subtotal + tax`
///
/// `points_to_use` is expected to already be validated against the user's
/// balance via [`crate::rules::validate_points_input`]; the engine only
/// clamps it against the base price.
#[must_use]
pub fn compute_breakdown(
    unit_price: Money,
    quantity: u32,
    coupon: Option<DiscountTerms>,
    promotion: Option<DiscountTerms>,
    points_to_use: u64,
    tax_rate: f64,
) -> PriceBreakdown {
    let base_price = unit_price.saturating_multiply(quantity);

    let coupon_discount = coupon.map_or(Money::ZERO, |terms| discount_against(base_price, terms));
    let promotion_discount =
        promotion.map_or(Money::ZERO, |terms| discount_against(base_price, terms));
    let points_discount = Money::from_minor(points_to_use).min(base_price);

    let subtotal_before_tax = base_price
        .saturating_sub(coupon_discount)
        .saturating_sub(promotion_discount)
        .saturating_sub(points_discount);

    let tax_amount = subtotal_before_tax.tax_at(tax_rate);
    let final_price = subtotal_before_tax.saturating_add(tax_amount);

    PriceBreakdown {
        base_price,
        coupon_discount,
        promotion_discount,
        points_discount,
        subtotal_before_tax,
        tax_amount,
        final_price,
    }
}
