use ndarray::Array2;
use num_complex::Complex64;

use crate::{
    error::{ShanimateError, ShanimateResult},
    grid::Grid,
};

/// Real-part magnitudes below this are snapped to zero before rendering.
/// Not physically motivated; the exact threshold is part of the output
/// contract and must not change.
pub const NOISE_FLOOR: f64 = 1e-6;

/// The complex spherical harmonic Y_l^m sampled over a lon/colat grid.
///
/// Computed once per run and read-only afterwards; every animation frame is a
/// phase rotation of this same field.
#[derive(Clone, Debug)]
pub struct HarmonicField {
    values: Array2<Complex64>,
}

impl HarmonicField {
    /// Evaluate Y_l^m at every grid point.
    ///
    /// Follows the scipy `sph_harm` convention: azimuth is longitude, the
    /// polar angle is colatitude, and the Condon-Shortley phase is included.
    /// Negative orders use Y_l^{-m} = (-1)^m conj(Y_l^m).
    ///
    /// Degree/order combinations the Legendre recurrence cannot represent
    /// (negative degree, |m| > l) are `Evaluation` errors.
    #[tracing::instrument(skip(grid), fields(nlon = grid.nlon(), nlat = grid.nlat()))]
    pub fn evaluate(ell: i64, m: i64, grid: &Grid) -> ShanimateResult<Self> {
        if ell < 0 || m.abs() > ell {
            return Err(ShanimateError::evaluation(format!(
                "unsupported degree/order combination l={ell}, m={m}"
            )));
        }

        let nlon = grid.nlon();
        let nlat = grid.nlat();
        let mut values = Array2::from_elem((nlon, nlat), Complex64::new(0.0, 0.0));

        let m_abs = m.unsigned_abs();
        // (-1)^m factor for the conjugate identity when m < 0.
        let neg_m_sign = if m < 0 && m_abs % 2 == 1 { -1.0 } else { 1.0 };

        for (j, colat) in grid.colat().enumerate() {
            let plm = normalized_legendre(ell, m_abs, colat);
            for (i, &lon) in grid.lon().iter().enumerate() {
                let azimuth = Complex64::from_polar(1.0, m as f64 * lon);
                values[[i, j]] = neg_m_sign * plm * azimuth;
            }
        }

        if values.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
            return Err(ShanimateError::evaluation(format!(
                "spherical harmonic evaluation produced non-finite values for l={ell}, m={m}"
            )));
        }

        Ok(Self { values })
    }

    /// Field values indexed (longitude, colatitude).
    pub fn values(&self) -> &Array2<Complex64> {
        &self.values
    }

    /// Real part of the field rotated by `exp(-i*phase)`, transposed so rows
    /// are latitude and columns longitude, with sub-noise entries zeroed.
    pub fn real_frame(&self, phase: f64) -> Array2<f64> {
        let rotor = Complex64::from_polar(1.0, -phase);
        let mut frame = self.values.t().mapv(|v| (v * rotor).re);
        snap_noise(&mut frame);
        frame
    }

    /// Symmetric color-scale bound: max |Re| of the unrotated field. Fixed
    /// once so color intensity is comparable across all frames.
    pub fn color_bound(&self) -> f64 {
        self.values
            .iter()
            .map(|v| v.re.abs())
            .fold(0.0f64, f64::max)
    }
}

/// Zero every entry with magnitude below [`NOISE_FLOOR`]. Idempotent.
pub fn snap_noise(frame: &mut Array2<f64>) {
    frame.mapv_inplace(|x| if x.abs() < NOISE_FLOOR { 0.0 } else { x });
}

/// Fully normalized associated Legendre P̄_l^m(cos(colat)) for m >= 0,
/// including the sqrt((2l+1)/4π · (l-m)!/(l+m)!) factor and the
/// Condon-Shortley phase.
///
/// Standard three-term recurrence on the normalized values; no factorials, so
/// moderate-to-high degrees stay in range.
fn normalized_legendre(ell: i64, m: u64, colat: f64) -> f64 {
    use std::f64::consts::PI;

    let x = colat.cos();
    let sin_colat = colat.sin();

    // P̄_m^m by building up the diagonal.
    let mut pmm = (1.0 / (4.0 * PI)).sqrt();
    for k in 1..=m {
        let k = k as f64;
        pmm *= -((2.0 * k + 1.0) / (2.0 * k)).sqrt() * sin_colat;
    }
    if ell == m as i64 {
        return pmm;
    }

    // P̄_{m+1}^m, then walk up in degree.
    let mut prev = pmm;
    let mut curr = (2.0 * m as f64 + 3.0).sqrt() * x * pmm;
    for l in (m as i64 + 2)..=ell {
        let lf = l as f64;
        let mf = m as f64;
        let a = ((4.0 * lf * lf - 1.0) / (lf * lf - mf * mf)).sqrt();
        let b = (((lf - 1.0) * (lf - 1.0) - mf * mf) / (4.0 * (lf - 1.0) * (lf - 1.0) - 1.0))
            .sqrt();
        let next = a * (x * curr - b * prev);
        prev = curr;
        curr = next;
    }
    curr
}
