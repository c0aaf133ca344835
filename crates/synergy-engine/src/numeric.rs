//! Conversions between unit counts and floating-point throughput.

/// Widen a unit count for throughput arithmetic.
#[allow(clippy::cast_precision_loss)]
pub const fn units_to_f64(units: u64) -> f64 {
    units as f64
}

/// Narrow an already-rounded real back to a unit count.
///
/// Non-finite and non-positive values map to zero; values beyond `u64`
/// saturate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_units(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= units_to_f64(u64::MAX) {
        u64::MAX
    } else {
        value as u64
    }
}
