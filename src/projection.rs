//! Inverse orthographic projection for the globe view.

/// Orthographic view of the unit sphere, centered on a given sub-point.
///
/// The animation centers the view at longitude 0 and latitude `90 - inc`
/// degrees, so inclination 0 looks straight down the pole and 90 at the
/// equator.
#[derive(Clone, Copy, Debug)]
pub struct Orthographic {
    sin_lat0: f64,
    cos_lat0: f64,
}

impl Orthographic {
    /// View centered at longitude 0 and the given latitude (radians).
    pub fn centered_at_lat(lat0: f64) -> Self {
        Self {
            sin_lat0: lat0.sin(),
            cos_lat0: lat0.cos(),
        }
    }

    pub fn for_inclination_deg(inc_deg: f64) -> Self {
        Self::centered_at_lat((90.0 - inc_deg).to_radians())
    }

    /// Map normalized view coordinates (x right, y up, unit globe radius) back
    /// to (longitude, latitude) in radians. `None` off the globe disk.
    pub fn unproject(&self, nx: f64, ny: f64) -> Option<(f64, f64)> {
        let r2 = nx * nx + ny * ny;
        if r2 > 1.0 {
            return None;
        }
        let nz = (1.0 - r2).sqrt();

        // Tilt the view vector by the center latitude (camera longitude is 0).
        let y1 = ny * self.cos_lat0 + nz * self.sin_lat0;
        let z1 = -ny * self.sin_lat0 + nz * self.cos_lat0;

        let lat = y1.clamp(-1.0, 1.0).asin();
        let lon = nx.atan2(z1);
        Some((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn disk_center_hits_the_sub_point() {
        let proj = Orthographic::centered_at_lat(0.5);
        let (lon, lat) = proj.unproject(0.0, 0.0).unwrap();
        assert_abs_diff_eq!(lon, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn inclination_zero_looks_down_the_pole() {
        let proj = Orthographic::for_inclination_deg(0.0);
        let (_, lat) = proj.unproject(0.0, 0.0).unwrap();
        assert_abs_diff_eq!(lat, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn inclination_ninety_looks_at_the_equator() {
        let proj = Orthographic::for_inclination_deg(90.0);
        let (lon, lat) = proj.unproject(0.0, 0.0).unwrap();
        assert_abs_diff_eq!(lon, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-12);

        // Straight up from the equator view is the north pole.
        let (_, lat) = proj.unproject(0.0, 1.0 - 1e-15).unwrap();
        assert_abs_diff_eq!(lat, PI / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn equator_view_east_edge_is_quarter_turn() {
        let proj = Orthographic::for_inclination_deg(90.0);
        let (lon, lat) = proj.unproject(1.0, 0.0).unwrap();
        assert_abs_diff_eq!(lon, PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn points_off_the_disk_are_rejected() {
        let proj = Orthographic::for_inclination_deg(60.0);
        assert!(proj.unproject(0.9, 0.9).is_none());
        assert!(proj.unproject(-1.2, 0.0).is_none());
    }
}
