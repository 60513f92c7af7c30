//! Currency display formatting.
//!
//! Presentation-layer helper only; no pricing logic depends on it.

use crate::money::Money;

/// Format an amount for display with its currency code
///
/// Groups the minor-unit amount in thousands, e.g.
/// `format_amount(Money::from_minor(1_250_000), "IDR")` → `"IDR 1.250.000"`.
#[must_use]
pub fn format_amount(amount: Money, currency_code: &str) -> String {
    let digits = amount.minor().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{currency_code} {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(Money::from_minor(1_250_000), "IDR"), "IDR 1.250.000");
        assert_eq!(format_amount(Money::from_minor(200_000), "IDR"), "IDR 200.000");
    }

    #[test]
    fn small_amounts_ungrouped() {
        assert_eq!(format_amount(Money::from_minor(0), "IDR"), "IDR 0");
        assert_eq!(format_amount(Money::from_minor(999), "USD"), "USD 999");
    }

    #[test]
    fn exact_multiple_of_three_digits() {
        assert_eq!(format_amount(Money::from_minor(100_000), "IDR"), "IDR 100.000");
    }
}
