//! Input gates for user-entered values.
//!
//! These are the only paths through which raw UI input (points text,
//! quantity steppers) reaches the price calculation engine. Invalid input is
//! silently corrected by clamping, never surfaced as an error.

/// Maximum tickets per order, regardless of remaining seats
pub const MAX_TICKETS_PER_ORDER: u32 = 10;

/// Validate a raw points text input against the available balance
///
/// Parses the trimmed text as an integer; empty, negative, or non-numeric
/// input counts as 0, and a numeric value too large for `u64` counts as the
/// balance itself. The result is clamped to `[0, available_balance]`. This
/// is the single gate through which points ever reach the engine, which does
/// not re-validate against the balance.
///
/// Idempotent: feeding the returned value back through (as text) yields the
/// same value.
#[must_use]
pub fn validate_points_input(raw: &str, available_balance: u64) -> u64 {
    let requested = match raw.trim().parse::<u64>() {
        Ok(n) => n,
        Err(e) if *e.kind() == std::num::IntErrorKind::PosOverflow => available_balance,
        Err(_) => 0,
    };
    requested.min(available_balance)
}

/// Clamp a requested ticket quantity to `[1, min(10, remaining_seats)]`
///
/// A sold-out tier clamps to 1: the selection UI is expected not to offer
/// it, and the authoritative seat check happens server-side at commit.
#[must_use]
pub const fn clamp_quantity(requested: u32, remaining_seats: u32) -> u32 {
    let upper = if remaining_seats < MAX_TICKETS_PER_ORDER {
        remaining_seats
    } else {
        MAX_TICKETS_PER_ORDER
    };
    let upper = if upper == 0 { 1 } else { upper };

    if requested == 0 {
        1
    } else if requested > upper {
        upper
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_clamped_to_balance() {
        // availableBalance=500, rawInput="10000" => 500
        assert_eq!(validate_points_input("10000", 500), 500);
        assert_eq!(validate_points_input("250", 500), 250);
    }

    #[test]
    fn points_non_numeric_is_zero() {
        assert_eq!(validate_points_input("", 500), 0);
        assert_eq!(validate_points_input("abc", 500), 0);
        assert_eq!(validate_points_input("12.5", 500), 0);
        assert_eq!(validate_points_input("  42 ", 500), 42);
    }

    #[test]
    fn points_negative_clamps_to_zero() {
        assert_eq!(validate_points_input("-10", 500), 0);
    }

    #[test]
    fn points_overflowing_numeric_input_clamps_to_balance() {
        // A 20-digit entry is still a numeric request for "everything".
        assert_eq!(validate_points_input("99999999999999999999", 500), 500);
        assert_eq!(validate_points_input(&u64::MAX.to_string(), 500), 500);
    }

    #[test]
    fn points_validation_is_idempotent() {
        let once = validate_points_input("987654", 500);
        let twice = validate_points_input(&once.to_string(), 500);
        assert_eq!(once, twice);
    }

    #[test]
    fn quantity_clamps_to_window() {
        assert_eq!(clamp_quantity(0, 100), 1);
        assert_eq!(clamp_quantity(5, 100), 5);
        assert_eq!(clamp_quantity(15, 100), 10);
    }

    #[test]
    fn quantity_bounded_by_remaining_seats() {
        assert_eq!(clamp_quantity(8, 3), 3);
        assert_eq!(clamp_quantity(1, 3), 1);
    }

    #[test]
    fn quantity_on_sold_out_tier_clamps_to_one() {
        assert_eq!(clamp_quantity(4, 0), 1);
    }
}
