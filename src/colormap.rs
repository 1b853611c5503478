//! Diverging blue-white-red colormap for the signed harmonic field.

/// Seismic color stops: dark blue -> blue -> white -> red -> dark red.
/// Blue = negative, white = zero, red = positive; the midpoint must map the
/// zero value of the symmetric color scale to pure white.
const SEISMIC_STOPS: [(f64, f64, f64); 5] = [
    (0.0, 0.0, 76.5),    // dark blue   (0.00)
    (0.0, 0.0, 255.0),   // blue        (0.25)
    (255.0, 255.0, 255.0), // white     (0.50)
    (255.0, 0.0, 0.0),   // red         (0.75)
    (127.5, 0.0, 0.0),   // dark red    (1.00)
];

/// Map a normalized value `t` in [0, 1] to RGBA. Out-of-range input clamps to
/// the end stops.
pub fn map_to_rgba(t: f64) -> [u8; 4] {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let scaled = t * (SEISMIC_STOPS.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(SEISMIC_STOPS.len() - 2);
    let frac = scaled - idx as f64;

    let (r0, g0, b0) = SEISMIC_STOPS[idx];
    let (r1, g1, b1) = SEISMIC_STOPS[idx + 1];
    [
        (r0 + (r1 - r0) * frac).round() as u8,
        (g0 + (g1 - g0) * frac).round() as u8,
        (b0 + (b1 - b0) * frac).round() as u8,
        255,
    ]
}

/// Normalize a field value against the symmetric limits [-vlim, +vlim].
/// A degenerate (zero or non-finite) limit pins everything to the midpoint.
pub fn normalize_symmetric(value: f64, vlim: f64) -> f64 {
    if vlim > 0.0 && vlim.is_finite() {
        (value + vlim) / (2.0 * vlim)
    } else {
        0.5
    }
}
