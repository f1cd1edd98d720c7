//! Derived batting and bowling figures.
//!
//! Both values are stored alongside the raw counts, so whatever the user
//! types is checked against the computed value before it is written.

/// Largest accepted gap between a supplied and a computed strike rate.
pub const STRIKE_RATE_TOLERANCE: f64 = 1.0;
/// Largest accepted gap between a supplied and a computed economy rate.
pub const ECONOMY_TOLERANCE: f64 = 0.5;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Runs per hundred balls, 0 when no balls were faced.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    round2(runs as f64 / balls as f64 * 100.0)
}

/// Runs conceded per over, 0 when nothing was bowled.
pub fn economy(runs: u32, overs: f64) -> f64 {
    if overs <= 0.0 {
        return 0.0;
    }
    round2(runs as f64 / overs)
}

fn reconcile(supplied: Option<f64>, computed: f64, tolerance: f64) -> f64 {
    match supplied {
        None => computed,
        Some(v) if v == 0.0 => computed,
        Some(v) if (v - computed).abs() > tolerance => computed,
        Some(v) => v,
    }
}

/// Keep a supplied strike rate only if it is within tolerance of the real one.
pub fn reconcile_strike_rate(supplied: Option<f64>, runs: u32, balls: u32) -> f64 {
    reconcile(supplied, strike_rate(runs, balls), STRIKE_RATE_TOLERANCE)
}

pub fn reconcile_economy(supplied: Option<f64>, runs: u32, overs: f64) -> f64 {
    reconcile(supplied, economy(runs, overs), ECONOMY_TOLERANCE)
}
