use std::{f64::consts::PI, io::Write, path::Path, time::Duration};

use crate::{
    encode_gif::{encode_looping_gif, looping_gif_config},
    error::{ShanimateError, ShanimateResult},
    grid::{Grid, GridSpec},
    harmonic::HarmonicField,
    render::{FrameRgba, RenderContext},
};

/// Everything a single run needs, validated up front before any computation.
#[derive(Clone, Debug)]
pub struct AnimationParams {
    /// Spherical degree l.
    pub ell: i64,
    /// Azimuthal order m, |m| <= l.
    pub m: i64,
    /// Viewing inclination in degrees from the pole, |inc| <= 180.
    pub inc_deg: f64,
    /// Square output size in inches.
    pub size_in: f64,
    pub nframes: u32,
    /// Total animation duration in seconds.
    pub duration_s: f64,
    pub grid: GridSpec,
    pub dpi: f64,
}

impl AnimationParams {
    pub fn validate(&self) -> ShanimateResult<()> {
        if self.m.abs() > self.ell {
            return Err(ShanimateError::validation(format!(
                "|m| must not exceed ell (got ell={}, m={})",
                self.ell, self.m
            )));
        }
        if !(self.inc_deg.abs() <= 180.0) {
            return Err(ShanimateError::validation(format!(
                "inclination must be within [-180, 180] degrees (got {})",
                self.inc_deg
            )));
        }
        if self.nframes == 0 {
            return Err(ShanimateError::validation("nframes must be at least 1"));
        }
        if !(self.duration_s > 0.0) {
            return Err(ShanimateError::validation("duration must be positive"));
        }
        if self.grid.nlon == 0 || self.grid.nlat == 0 {
            return Err(ShanimateError::validation(
                "nlon and nlat must be at least 1",
            ));
        }
        if !(self.size_in > 0.0) || !(self.dpi > 0.0) {
            return Err(ShanimateError::validation("size and dpi must be positive"));
        }
        Ok(())
    }

    /// Display time per frame; the encoder derives the playback rate from it.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f64(self.duration_s / self.nframes as f64)
    }
}

/// Output filename used when the caller does not supply one.
pub fn default_outfile(ell: i64, m: i64) -> String {
    format!("l{ell}m{m}.gif")
}

/// Render one full phase rotation of the field, in frame order.
///
/// Frame `i` rotates the field by `2*pi*i/nframes`; the color scale `vlim` is
/// fixed by the caller from the unrotated field so intensity is comparable
/// across frames. Progress is reported by overwriting one status line on
/// `progress` as each frame completes.
pub fn render_animation(
    params: &AnimationParams,
    ctx: &RenderContext,
    field: &HarmonicField,
    grid: &Grid,
    vlim: f64,
    mut progress: impl Write,
) -> ShanimateResult<Vec<FrameRgba>> {
    use anyhow::Context as _;

    let nframes = params.nframes;
    let mut frames = Vec::with_capacity(nframes as usize);

    for index in 0..nframes {
        let phase = 2.0 * PI * f64::from(index) / f64::from(nframes);
        let real = field.real_frame(phase);
        frames.push(ctx.render_field(&real, grid, vlim)?);

        write!(progress, "\rFrame {} of {}", index + 1, nframes)
            .and_then(|()| progress.flush())
            .context("failed to write progress line")?;
    }

    Ok(frames)
}

/// One complete run: grid, field, frames, encoded looping GIF.
///
/// Strictly sequential; any failure aborts the run and leaves no output file.
pub fn run(
    params: &AnimationParams,
    out_path: impl AsRef<Path>,
    progress: impl Write,
) -> ShanimateResult<()> {
    params.validate()?;

    let grid = Grid::new(&params.grid);
    let field = HarmonicField::evaluate(params.ell, params.m, &grid)?;
    let vlim = field.color_bound();
    tracing::debug!(ell = params.ell, m = params.m, vlim, "field evaluated");

    let ctx = RenderContext::new(params.size_in, params.dpi, params.inc_deg);
    let frames = render_animation(params, &ctx, &field, &grid, vlim, progress)?;

    let cfg = looping_gif_config(
        out_path.as_ref(),
        ctx.width(),
        ctx.height(),
        params.frame_delay(),
    );
    encode_looping_gif(&frames, &cfg)
}
