//! # Stagepass Pricing
//!
//! Pure price calculation engine and discount resolution rules for ticket
//! purchases.
//!
//! This crate is deliberately free of I/O and of the rest of the workspace:
//! the same code computes the itemized breakdown shown in the purchase UI and
//! re-validates totals inside the server-side transaction-creation path, so
//! the two can never disagree on rounding or clamping.
//!
//! ## Components
//!
//! - [`Money`]: minor-currency-unit value object
//! - [`DiscountTerms`]: magnitude-only view of a discount instrument
//! - [`CouponInstrument`] / [`PromotionInstrument`]: eligibility-bearing
//!   instruments, validated by the session before their terms ever reach the
//!   engine
//! - [`compute_breakdown`]: the total, non-failing pricing function
//! - [`validate_points_input`] / [`clamp_quantity`]: the input gates through
//!   which user-entered values are normalized
//!
//! ## Example
//!
//! ```
//! use stagepass_pricing::{compute_breakdown, DiscountMode, DiscountTerms, Money, DEFAULT_TAX_RATE};
//!
//! let breakdown = compute_breakdown(
//!     Money::from_minor(50_000),
//!     4,
//!     None,
//!     Some(DiscountTerms::new(DiscountMode::Percentage, 15)),
//!     0,
//!     DEFAULT_TAX_RATE,
//! );
//!
//! assert_eq!(breakdown.base_price, Money::from_minor(200_000));
//! assert_eq!(breakdown.promotion_discount, Money::from_minor(30_000));
//! assert_eq!(breakdown.final_price, Money::from_minor(187_000));
//! ```

pub mod breakdown;
pub mod format;
pub mod instruments;
pub mod money;
pub mod rules;

pub use breakdown::{DEFAULT_TAX_RATE, PriceBreakdown, compute_breakdown};
pub use format::format_amount;
pub use instruments::{
    CouponId, CouponInstrument, DiscountMode, DiscountTerms, EventId, PromotionError,
    PromotionId, PromotionInstrument,
};
pub use money::Money;
pub use rules::{MAX_TICKETS_PER_ORDER, clamp_quantity, validate_points_input};
