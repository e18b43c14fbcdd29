//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::EUR),
        Just(Currency::USD),
        Just(Currency::GBP),
        Just(Currency::CHF),
    ]
}

/// Strategy for generating amounts in minor units, positive only
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_00i64
}

/// Strategy for generating amounts in minor units, either sign
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    -1_000_000_00i64..1_000_000_00i64
}

/// Strategy for generating positive EUR Money values
pub fn positive_eur_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::EUR))
}

/// Strategy for generating EUR Money values of either sign
pub fn eur_strategy() -> impl Strategy<Value = Money> {
    amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::EUR))
}

/// Strategy for generating partition weights (tantièmes)
///
/// Weights are whole numbers, the way co-ownership regulations state them.
pub fn weight_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10_000u32).prop_map(Decimal::from)
}

/// Strategy for generating a set of partition weights with at least one
/// active weight
pub fn active_weights_strategy(max_owners: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(weight_strategy(), 1..max_owners)
        .prop_filter("at least one active weight", |weights| {
            weights.iter().any(|w| *w > Decimal::ONE)
        })
}
