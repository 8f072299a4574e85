//! Small helpers for validation and money rounding

use crate::error::TripError;

/// Round to the nearest cent, halves away from zero (half-up for fares).
/// Values too large to scale have no fractional cents and come back unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let cents = value * 100.0;
    if !cents.is_finite() {
        return value;
    }
    cents.round() / 100.0
}

// rounded fare, or a parameter error when the arithmetic overflowed
pub(crate) fn priced(value: f64) -> Result<f64, TripError> {
    let fare = round_to_cents(value);
    if !fare.is_finite() {
        return Err(TripError::invalid("Fare is not a finite amount"));
    }
    Ok(fare)
}

// blank means empty or whitespace only
pub(crate) fn require_text(value: &str, field: &str) -> Result<(), TripError> {
    if value.trim().is_empty() {
        return Err(TripError::invalid(format!("{field} cannot be blank")));
    }
    Ok(())
}

pub(crate) fn require_positive_distance(distance_miles: f64) -> Result<(), TripError> {
    if !distance_miles.is_finite() || distance_miles <= 0.0 {
        return Err(TripError::invalid("Distance must be greater than 0"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(value: f64, field: &str) -> Result<(), TripError> {
    if !value.is_finite() || value < 0.0 {
        return Err(TripError::invalid(format!("{field} cannot be negative")));
    }
    Ok(())
}
