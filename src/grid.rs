use std::f64::consts::PI;

/// Requested grid resolution. Both counts must be >= 1; this is validated with
/// the rest of the run parameters before any grid is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub nlon: usize,
    pub nlat: usize,
}

/// Longitude/latitude sample angles, built once per run and immutable after.
///
/// Longitude spans the full circle [-pi, pi] with both endpoints included;
/// latitude spans [-pi/2, pi/2]. Colatitude (latitude + pi/2) is derived on
/// demand and used only for harmonic evaluation.
#[derive(Clone, Debug)]
pub struct Grid {
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl Grid {
    pub fn new(spec: &GridSpec) -> Self {
        let lon = linspace(0.0, 2.0 * PI, spec.nlon)
            .into_iter()
            .map(|x| x - PI)
            .collect();
        let lat = linspace(-PI / 2.0, PI / 2.0, spec.nlat);
        Self { lon, lat }
    }

    pub fn nlon(&self) -> usize {
        self.lon.len()
    }

    pub fn nlat(&self) -> usize {
        self.lat.len()
    }

    /// Longitude samples in radians, ascending over [-pi, pi].
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Latitude samples in radians, ascending over [-pi/2, pi/2].
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Colatitude (polar angle) samples in radians, ascending over [0, pi].
    pub fn colat(&self) -> impl Iterator<Item = f64> + '_ {
        self.lat.iter().map(|&l| l + PI / 2.0)
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive. A single sample
/// sits at `start`.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
