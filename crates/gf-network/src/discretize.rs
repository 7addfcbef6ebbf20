//! Pipe discretization: segment count, segment lengths, and geometric capacity.
//!
//! The first and last segment of a pipe are half cells, so each node sees
//! half a cell of storage per connected pipe and interior cells sit between
//! the half cells.

pub const MIN_SEGMENTS: usize = 2;
pub const MAX_SEGMENTS: usize = 30;

/// Pipes up to this length get the minimum segment count [km].
pub const SHORT_PIPE_KM: f64 = 30.0;
/// Pipes above this length get the maximum segment count [km].
pub const LONG_PIPE_KM: f64 = 300.0;
/// One extra segment per this much length above `SHORT_PIPE_KM` [km].
pub const SEGMENT_SPACING_KM: f64 = 10.0;

/// π used for pipe cross sections.
pub const PI_GEOMETRY: f64 = std::f64::consts::PI;

/// Number of segments for a pipe of `length_km`. Monotonic non-decreasing.
pub fn segment_count(length_km: f64) -> usize {
    if length_km <= SHORT_PIPE_KM {
        return MIN_SEGMENTS;
    }
    if length_km > LONG_PIPE_KM {
        return MAX_SEGMENTS;
    }
    let extra = ((length_km - SHORT_PIPE_KM) / SEGMENT_SPACING_KM).ceil() as usize;
    (MIN_SEGMENTS + extra).min(MAX_SEGMENTS)
}

/// Effective length of segment `i` of `n` on a pipe of `total_km`.
///
/// End segments are half of `total/(n-1)`, interior ones full; `n <= 1`
/// returns the whole length.
pub fn segment_length(i: usize, n: usize, total_km: f64) -> f64 {
    if n <= 1 {
        return total_km;
    }
    let full = total_km / (n - 1) as f64;
    if i == 0 || i == n - 1 {
        full / 2.0
    } else {
        full
    }
}

/// Distance between the centres of adjacent segments [km].
pub fn flow_length(n: usize, total_km: f64) -> f64 {
    if n > 1 {
        total_km / (n - 1) as f64
    } else {
        total_km
    }
}

/// Geometric volume [m³] of a segment: π·(D/1000)²/4 · L·1000.
///
/// Degenerate geometry (non-positive diameter or length) yields 0.
pub fn segment_capacity(diameter_mm: f64, length_km: f64) -> f64 {
    if !(diameter_mm > 0.0 && length_km > 0.0) {
        return 0.0;
    }
    let d_m = diameter_mm / 1000.0;
    PI_GEOMETRY * d_m * d_m / 4.0 * length_km * 1000.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn count_is_monotonic(a in 0.0_f64..1000.0, b in 0.0_f64..1000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(segment_count(lo) <= segment_count(hi));
        }

        #[test]
        fn count_stays_in_bounds(l in -100.0_f64..10_000.0) {
            let n = segment_count(l);
            prop_assert!((MIN_SEGMENTS..=MAX_SEGMENTS).contains(&n));
        }
    }
}
