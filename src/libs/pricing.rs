//! Rental pricing arithmetic.
//!
//! Prices are per unit per day, captured as a snapshot on the rental line
//! when it is created. The billing period always covers at least one day,
//! and the discount is a percentage of the subtotal rounded to two decimal
//! places.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::rental::RentalLine;

/// Number of billable days between the rental date and the expected return.
///
/// A same-day rental still bills one day.
pub fn rental_days(rental_date: NaiveDate, expected_return_date: NaiveDate) -> i64 {
    (expected_return_date - rental_date).num_days().max(1)
}

/// Subtotal over all lines: price snapshot x rented quantity x days.
pub fn subtotal(lines: &[RentalLine], days: i64) -> Decimal {
    lines
        .iter()
        .map(|line| line.price_per_day * Decimal::from(line.quantity_rented) * Decimal::from(days))
        .sum()
}

/// Discount amount for a subtotal, rounded to cents.
pub fn discount_amount(subtotal: Decimal, discount_percentage: Decimal) -> Decimal {
    (subtotal * discount_percentage / Decimal::from(100)).round_dp(2)
}

/// Final total after discount.
pub fn total(subtotal: Decimal, discount_percentage: Decimal) -> Decimal {
    subtotal - discount_amount(subtotal, discount_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(qty: i64, price: &str) -> RentalLine {
        RentalLine {
            id: None,
            rental_id: 1,
            item_id: 1,
            item_name: "Table".to_string(),
            quantity_rented: qty,
            quantity_returned: 0,
            price_per_day: Decimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn same_day_rental_bills_one_day() {
        assert_eq!(rental_days(date(2026, 5, 1), date(2026, 5, 1)), 1);
        assert_eq!(rental_days(date(2026, 5, 1), date(2026, 5, 4)), 3);
        // A return date before the rental date still bills the minimum
        assert_eq!(rental_days(date(2026, 5, 4), date(2026, 5, 1)), 1);
    }

    #[test]
    fn subtotal_multiplies_price_quantity_and_days() {
        let lines = vec![line(3, "2.50"), line(1, "10.00")];
        assert_eq!(subtotal(&lines, 2), Decimal::from_str("35.00").unwrap());
    }

    #[test]
    fn discount_rounds_to_cents() {
        let sub = Decimal::from_str("99.99").unwrap();
        let pct = Decimal::from_str("12.5").unwrap();
        assert_eq!(discount_amount(sub, pct), Decimal::from_str("12.50").unwrap());
        assert_eq!(total(sub, pct), Decimal::from_str("87.49").unwrap());
    }

    #[test]
    fn zero_discount_leaves_total_untouched() {
        let sub = Decimal::from_str("42.00").unwrap();
        assert_eq!(total(sub, Decimal::ZERO), sub);
    }
}
