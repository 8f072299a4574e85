//! Property-based tests for fare strategies
//!
//! These use proptest to check the pricing formulas across a wide range of
//! rates and distances, including the rule that the strategy active at
//! completion is the one that prices the trip.

use proptest::prelude::*;
use rideshare::{FareStrategy, Trip, utils::round_to_cents};

// PROPERTY TEST STRATEGIES

/// Non-negative money amounts up to 100.00
fn rate_strategy() -> impl Strategy<Value = f64> {
    (0u32..=10_000).prop_map(|cents| cents as f64 / 100.0)
}

/// Positive distances between 0.1 and 500 miles
fn distance_strategy() -> impl Strategy<Value = f64> {
    (1u32..=5_000).prop_map(|tenths| tenths as f64 / 10.0)
}

fn discount_strategy() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(|pct| pct as f64 / 100.0)
}

fn multiplier_strategy() -> impl Strategy<Value = f64> {
    (1u32..=500).prop_map(|hundredths| hundredths as f64 / 100.0)
}

fn any_fare_strategy() -> impl Strategy<Value = FareStrategy> {
    let standard = (rate_strategy(), rate_strategy())
        .prop_map(|(base, per_mile)| FareStrategy::standard(base, per_mile).unwrap());
    let shared = (rate_strategy(), rate_strategy(), discount_strategy()).prop_map(
        |(base, per_mile, discount)| FareStrategy::shared_ride(base, per_mile, discount).unwrap(),
    );
    let leaf = prop_oneof![standard, shared];

    leaf.prop_recursive(3, 6, 1, |inner| {
        (inner, multiplier_strategy())
            .prop_map(|(base, multiplier)| FareStrategy::surge(base, multiplier).unwrap())
    })
}

fn is_cents(fare: f64) -> bool {
    ((fare * 100.0).round() - fare * 100.0).abs() < 1e-6
}

// PROPERTY TESTS
proptest! {
    /// Property: standard fare is base + per_mile * distance, rounded to cents
    #[test]
    fn prop_standard_formula(
        base in rate_strategy(),
        per_mile in rate_strategy(),
        distance in distance_strategy(),
    ) {
        let standard = FareStrategy::standard(base, per_mile).unwrap();
        let fare = standard.fare_for_distance(distance).unwrap();

        prop_assert_eq!(fare, round_to_cents(base + per_mile * distance));
    }

    /// Property: surge fare is the wrapped fare times the multiplier, rounded
    #[test]
    fn prop_surge_multiplies_wrapped_fare(
        wrapped in any_fare_strategy(),
        multiplier in multiplier_strategy(),
        distance in distance_strategy(),
    ) {
        let wrapped_fare = wrapped.fare_for_distance(distance).unwrap();
        let surge = FareStrategy::surge(wrapped, multiplier).unwrap();

        prop_assert_eq!(
            surge.fare_for_distance(distance).unwrap(),
            round_to_cents(wrapped_fare * multiplier)
        );
    }

    /// Property: shared ride applies the discount to the standard formula
    #[test]
    fn prop_shared_ride_formula(
        base in rate_strategy(),
        per_mile in rate_strategy(),
        discount in discount_strategy(),
        distance in distance_strategy(),
    ) {
        let shared = FareStrategy::shared_ride(base, per_mile, discount).unwrap();
        let fare = shared.fare_for_distance(distance).unwrap();

        prop_assert_eq!(fare, round_to_cents((base + per_mile * distance) * (1.0 - discount)));
    }

    /// Property: every fare is non-negative and a whole number of cents
    #[test]
    fn prop_fares_are_whole_cents(
        strategy in any_fare_strategy(),
        distance in distance_strategy(),
    ) {
        let fare = strategy.fare_for_distance(distance).unwrap();

        prop_assert!(fare >= 0.0);
        prop_assert!(is_cents(fare), "fare {} is not whole cents", fare);
    }

    /// Property: no strategy prices a non-positive distance
    #[test]
    fn prop_non_positive_distance_rejected(
        strategy in any_fare_strategy(),
        distance in -500.0f64..=0.0,
    ) {
        prop_assert!(strategy.fare_for_distance(distance).unwrap_err().is_parameter_error());
    }

    /// Property: the strategy in place at completion decides the fare
    #[test]
    fn prop_last_swap_wins(
        initial in any_fare_strategy(),
        swapped in any_fare_strategy(),
        distance in distance_strategy(),
    ) {
        let expected = swapped.fare_for_distance(distance).unwrap();

        let mut trip = Trip::new("Morgan", "Start", "End", distance, initial).unwrap();
        trip.request().unwrap();
        trip.accept("Driver").unwrap();
        trip.start().unwrap();
        trip.set_fare_strategy(swapped);
        let fare = trip.complete().unwrap();

        prop_assert_eq!(fare, expected);
        prop_assert_eq!(trip.last_fare(), Some(expected));
    }

    /// Property: out-of-range construction parameters are parameter errors
    #[test]
    fn prop_invalid_rates_rejected(
        negative in -100.0f64..-0.001,
        discount_over in 1.001f64..10.0,
        bad_multiplier in -10.0f64..=0.0,
    ) {
        prop_assert!(FareStrategy::standard(negative, 1.0).is_err());
        prop_assert!(FareStrategy::standard(1.0, negative).is_err());
        prop_assert!(FareStrategy::shared_ride(1.0, 1.0, discount_over).is_err());
        let base = FareStrategy::standard(1.0, 1.0).unwrap();
        prop_assert!(FareStrategy::surge(base, bad_multiplier).is_err());
    }
}
