//! Weighted apportionment with exact-remainder correction
//!
//! Splitting a monetary amount across weighted shares (tantièmes) appears in
//! three places in the system: call-of-funds fan-out, owner-side revenue
//! postings, and fiscal-year ventilation. All three use this single utility
//! so the rounding and remainder policy cannot drift between call sites.
//!
//! # Remainder policy
//!
//! Shares are processed in ascending `(weight, id)` order. Each share gets
//! its ratio of the total, rounded half away from zero to the currency's
//! decimal places. Whatever rounding residue is left is added to the last
//! allocation produced, i.e. the largest share, ties broken toward the
//! greater id. The sum of the returned amounts therefore equals the input
//! total exactly whenever at least one share is active.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// Shares at or below this weight are considered inactive and receive nothing
pub const WEIGHT_EPSILON: Decimal = dec!(0.001);

/// Amounts below this magnitude are treated as negligible
pub const RESIDUE_EPSILON: Decimal = dec!(0.0001);

/// A weight-total below this is a degenerate denominator; ratios become zero
pub const TOTAL_EPSILON: Decimal = dec!(0.01);

/// A weighted share in an apportionment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Stable identity of the share holder (used as the sort tie-break)
    pub id: Uuid,
    /// Share weight (tantièmes); not necessarily normalized
    pub weight: Decimal,
}

impl Share {
    /// Creates a new share
    pub fn new(id: impl Into<Uuid>, weight: Decimal) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// One allocated amount out of an apportionment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Identity of the share holder this amount belongs to
    pub id: Uuid,
    /// The allocated amount
    pub amount: Money,
}

/// Computes a weight's percentage of a total, 0..100
///
/// A total below [`TOTAL_EPSILON`] in magnitude degrades to a defined zero
/// instead of raising a division error.
pub fn percentage(weight: Decimal, total: Decimal) -> Decimal {
    if total.abs() < TOTAL_EPSILON {
        Decimal::ZERO
    } else {
        dec!(100) * weight / total
    }
}

/// Splits `total` across `shares` proportionally to their weights
///
/// Inactive shares (weight <= [`WEIGHT_EPSILON`]) are skipped; a weight total
/// below [`TOTAL_EPSILON`] is the same degenerate denominator [`percentage`]
/// reports zero ratios for, so the result is empty and the amount is not
/// billed anywhere, which callers must treat as the documented degenerate
/// case. Allocations that end up negligible (below [`RESIDUE_EPSILON`]) are
/// dropped after the remainder correction, so the exactness guarantee is
/// preserved.
pub fn apportion(total: Money, shares: &[Share]) -> Vec<Allocation> {
    let mut active: Vec<&Share> = shares.iter().filter(|s| s.weight > WEIGHT_EPSILON).collect();
    // Ascending order: the largest share is processed last and absorbs the residue
    active.sort_by(|a, b| a.weight.cmp(&b.weight).then(a.id.cmp(&b.id)));

    let denominator: Decimal = active.iter().map(|s| s.weight).sum();
    if denominator.abs() < TOTAL_EPSILON {
        return Vec::new();
    }

    let mut allocated = Money::zero(total.currency());
    let mut allocations = Vec::with_capacity(active.len());
    for share in &active {
        let amount = total.multiply(share.weight / denominator).round_half_up();
        allocated = allocated + amount;
        allocations.push(Allocation {
            id: share.id,
            amount,
        });
    }

    let residue = total - allocated;
    if residue.amount().abs() >= RESIDUE_EPSILON {
        if let Some(last) = allocations.last_mut() {
            last.amount = last.amount + residue;
        }
    }

    allocations.retain(|a| a.amount.amount().abs() >= RESIDUE_EPSILON);
    allocations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn share(n: u128, weight: Decimal) -> Share {
        Share::new(Uuid::from_u128(n), weight)
    }

    #[test]
    fn test_percentage_sums_to_hundred() {
        let weights = [dec!(45), dec!(35), dec!(20)];
        let total: Decimal = weights.iter().sum();
        let sum: Decimal = weights.iter().map(|w| percentage(*w, total)).sum();
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn test_percentage_zero_total_degrades_to_zero() {
        assert_eq!(percentage(dec!(10), dec!(0.009)), Decimal::ZERO);
        assert_eq!(percentage(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_apportion_exact_split() {
        let total = Money::new(dec!(250.00), Currency::EUR);
        let result = apportion(
            total,
            &[share(1, dec!(45)), share(2, dec!(35)), share(3, dec!(20))],
        );

        assert_eq!(result.len(), 3);
        let by_id = |n: u128| {
            result
                .iter()
                .find(|a| a.id == Uuid::from_u128(n))
                .unwrap()
                .amount
                .amount()
        };
        assert_eq!(by_id(1), dec!(112.50));
        assert_eq!(by_id(2), dec!(87.50));
        assert_eq!(by_id(3), dec!(50.00));
    }

    #[test]
    fn test_apportion_residue_goes_to_largest_share() {
        // 100 / 3 does not terminate; the largest share absorbs the cent
        let total = Money::new(dec!(100.00), Currency::EUR);
        let result = apportion(
            total,
            &[share(1, dec!(1)), share(2, dec!(1)), share(3, dec!(2))],
        );

        let sum: Decimal = result.iter().map(|a| a.amount.amount()).sum();
        assert_eq!(sum, dec!(100.00));

        let largest = result.last().unwrap();
        assert_eq!(largest.id, Uuid::from_u128(3));
        assert_eq!(largest.amount.amount(), dec!(50.00));
    }

    #[test]
    fn test_apportion_equal_weights_tie_break_by_id() {
        let total = Money::new(dec!(0.01), Currency::EUR);
        let result = apportion(total, &[share(2, dec!(1)), share(1, dec!(1))]);

        // Each rounds to 0.01, residue -0.01 corrects the last (greater id);
        // its zero allocation is then dropped as negligible
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, Uuid::from_u128(1));
        assert_eq!(result[0].amount.amount(), dec!(0.01));
    }

    #[test]
    fn test_apportion_skips_inactive_shares() {
        let total = Money::new(dec!(25.00), Currency::EUR);
        let result = apportion(
            total,
            &[share(1, dec!(75)), share(2, dec!(0)), share(3, dec!(25))],
        );

        assert_eq!(result.len(), 2);
        let sum: Decimal = result.iter().map(|a| a.amount.amount()).sum();
        assert_eq!(sum, dec!(25.00));
        assert!(!result.iter().any(|a| a.id == Uuid::from_u128(2)));
    }

    #[test]
    fn test_apportion_agrees_with_percentage_on_degenerate_totals() {
        // Weights above the per-share cutoff whose sum is still below the
        // denominator cutoff: percentage reports zero ratios, so apportion
        // must allocate nothing rather than bill the full amount
        let total = Money::new(dec!(50.00), Currency::EUR);
        let shares = [share(1, dec!(0.004)), share(2, dec!(0.004))];

        assert_eq!(percentage(dec!(0.004), dec!(0.008)), Decimal::ZERO);
        assert!(apportion(total, &shares).is_empty());
    }

    #[test]
    fn test_apportion_all_shares_inactive_yields_nothing() {
        // Documented degenerate case: the amount silently vanishes
        let total = Money::new(dec!(99.00), Currency::EUR);
        let result = apportion(total, &[share(1, dec!(0)), share(2, dec!(0.0005))]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_apportion_negative_total() {
        let total = Money::new(dec!(-90.01), Currency::EUR);
        let result = apportion(total, &[share(1, dec!(1)), share(2, dec!(2))]);

        let sum: Decimal = result.iter().map(|a| a.amount.amount()).sum();
        assert_eq!(sum, dec!(-90.01));
    }
}
