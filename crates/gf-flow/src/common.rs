//! Shared pieces of the steady-flow correlations.

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Elevation terms below this are treated as level pipe.
pub const EPSILON_ELEVATION: f64 = 1e-12;

/// Elevation adjustment parameter s = 0.0684·G·(H2 − H1)/(Tf·Z), Tf in K.
pub fn elevation_parameter(g: f64, h1: f64, h2: f64, tf_k: f64, z: f64) -> f64 {
    0.0684 * g * ((h2 - h1) / (tf_k * z))
}

/// Equivalent length Le = L·(eˢ − 1)/s, or L for a level pipe.
pub fn equivalent_length(length: f64, s: f64) -> f64 {
    if s.abs() > EPSILON_ELEVATION {
        length * (s.exp() - 1.0) / s
    } else {
        length
    }
}

/// Sign of the flow from end 1 to end 2: +1, −1, or 0 for equal pressures.
pub fn flow_direction(p1: f64, p2: f64) -> f64 {
    if p1 > p2 {
        1.0
    } else if p2 > p1 {
        -1.0
    } else {
        0.0
    }
}
