use ndarray::Array2;

use crate::{
    colormap,
    error::{ShanimateError, ShanimateResult},
    grid::Grid,
    projection::Orthographic,
};

/// One rendered frame: tightly packed RGBA8, row-major from the top-left.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Owns the target raster dimensions and the globe projection, and is reused
/// for every frame of a run. Explicitly threaded through the render calls;
/// there is no process-wide drawing state.
#[derive(Clone, Debug)]
pub struct RenderContext {
    width: u32,
    height: u32,
    projection: Orthographic,
}

impl RenderContext {
    /// A square surface of `size_in` inches at `dpi`, looking at the globe
    /// from `inc_deg` degrees off the pole.
    pub fn new(size_in: f64, dpi: f64, inc_deg: f64) -> Self {
        let px = (size_in * dpi).round().max(1.0) as u32;
        Self {
            width: px,
            height: px,
            projection: Orthographic::for_inclination_deg(inc_deg),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw a real-valued field (rows = latitude, columns = longitude) as a
    /// flat-shaded mesh on the orthographic globe.
    ///
    /// Each mesh cell is bounded by consecutive grid samples and carries the
    /// value at its lower-left sample; every output pixel is colored by the
    /// cell its unprojected lon/lat lands in, with fixed symmetric color
    /// limits [-vlim, +vlim]. Pixels off the globe disk are white.
    pub fn render_field(
        &self,
        frame: &Array2<f64>,
        grid: &Grid,
        vlim: f64,
    ) -> ShanimateResult<FrameRgba> {
        let (nlat, nlon) = frame.dim();
        if nlat != grid.nlat() || nlon != grid.nlon() {
            return Err(ShanimateError::validation(format!(
                "field shape ({nlat}, {nlon}) does not match grid ({}, {})",
                grid.nlat(),
                grid.nlon()
            )));
        }

        const BG: [u8; 4] = [255, 255, 255, 255];

        let w = self.width as usize;
        let h = self.height as usize;
        let mut data = vec![0u8; w * h * 4];

        let radius = (w.min(h) as f64) / 2.0;
        let cx = w as f64 / 2.0;
        let cy = h as f64 / 2.0;

        let lon_cells = nlon.saturating_sub(1).max(1);
        let lat_cells = nlat.saturating_sub(1).max(1);

        for py in 0..h {
            for px in 0..w {
                let nx = (px as f64 + 0.5 - cx) / radius;
                let ny = (cy - (py as f64 + 0.5)) / radius;

                let rgba = match self.projection.unproject(nx, ny) {
                    None => BG,
                    Some((lon, lat)) => {
                        let i = cell_index(lon, grid.lon(), lon_cells);
                        let j = cell_index(lat, grid.lat(), lat_cells);
                        let t = colormap::normalize_symmetric(frame[[j, i]], vlim);
                        colormap::map_to_rgba(t)
                    }
                };

                let off = (py * w + px) * 4;
                data[off..off + 4].copy_from_slice(&rgba);
            }
        }

        Ok(FrameRgba {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

/// Index of the mesh cell containing `angle` on an evenly spaced axis.
/// Values at or past the last sample land in the last cell.
fn cell_index(angle: f64, samples: &[f64], cells: usize) -> usize {
    let first = samples[0];
    let last = samples[samples.len() - 1];
    let span = last - first;
    if span <= 0.0 {
        return 0;
    }
    let u = (angle - first) / span * cells as f64;
    (u.floor().max(0.0) as usize).min(cells - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    fn pixel(frame: &FrameRgba, x: u32, y: u32) -> [u8; 4] {
        let off = ((y * frame.width + x) * 4) as usize;
        frame.data[off..off + 4].try_into().unwrap()
    }

    #[test]
    fn surface_size_follows_inches_times_dpi() {
        let ctx = RenderContext::new(1.0, 300.0, 60.0);
        assert_eq!(ctx.width(), 300);
        assert_eq!(ctx.height(), 300);

        let tiny = RenderContext::new(0.001, 10.0, 60.0);
        assert_eq!(tiny.width(), 1);
    }

    #[test]
    fn corners_are_background_and_center_is_field() {
        let grid = Grid::new(&GridSpec { nlon: 8, nlat: 8 });
        let field = Array2::from_elem((8, 8), 1.0);
        let ctx = RenderContext::new(1.0, 32.0, 60.0);
        let frame = ctx.render_field(&field, &grid, 1.0).unwrap();

        // Unit disk inscribed in the square: corners lie outside.
        assert_eq!(pixel(&frame, 0, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 31, 31), [255, 255, 255, 255]);
        // Constant +vlim field maps to the top colormap stop.
        assert_eq!(pixel(&frame, 16, 16), [128, 0, 0, 255]);
    }

    #[test]
    fn zero_field_renders_white_globe() {
        let grid = Grid::new(&GridSpec { nlon: 6, nlat: 6 });
        let field = Array2::zeros((6, 6));
        let ctx = RenderContext::new(1.0, 16.0, 0.0);
        let frame = ctx.render_field(&field, &grid, 0.5).unwrap();
        assert_eq!(pixel(&frame, 8, 8), [255, 255, 255, 255]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let grid = Grid::new(&GridSpec { nlon: 6, nlat: 6 });
        let field = Array2::zeros((5, 6));
        let ctx = RenderContext::new(1.0, 16.0, 60.0);
        let err = ctx.render_field(&field, &grid, 1.0).unwrap_err();
        assert!(err.to_string().contains("validation error"));
    }

    #[test]
    fn cell_lookup_clamps_to_axis_ends() {
        let samples = [-1.0, 0.0, 1.0];
        assert_eq!(cell_index(-2.0, &samples, 2), 0);
        assert_eq!(cell_index(-0.5, &samples, 2), 0);
        assert_eq!(cell_index(0.5, &samples, 2), 1);
        assert_eq!(cell_index(1.0, &samples, 2), 1);
        assert_eq!(cell_index(5.0, &samples, 2), 1);
    }
}
