use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    error::{ShanimateError, ShanimateResult},
    render::FrameRgba,
};

#[derive(Clone, Debug)]
pub struct GifConfig {
    pub width: u32,
    pub height: u32,
    /// Wall-clock display time per frame; also fixes the playback rate.
    pub frame_delay: Duration,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl GifConfig {
    pub fn validate(&self) -> ShanimateResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShanimateError::validation(
                "gif width/height must be non-zero",
            ));
        }
        if self.frame_delay.is_zero() {
            return Err(ShanimateError::validation(
                "gif frame delay must be non-zero",
            ));
        }
        Ok(())
    }
}

pub fn looping_gif_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    frame_delay: Duration,
) -> GifConfig {
    GifConfig {
        width,
        height,
        frame_delay,
        out_path: out_path.into(),
        overwrite: true,
    }
}

pub fn ensure_parent_dir(path: &Path) -> ShanimateResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode an ordered frame sequence as an infinitely looping GIF.
///
/// The whole animation is encoded into memory first and written to disk in a
/// single operation, so a failed run leaves no partial file behind.
pub fn encode_looping_gif(frames: &[FrameRgba], cfg: &GifConfig) -> ShanimateResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(ShanimateError::validation(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }

    if frames.is_empty() {
        return Err(ShanimateError::encoding("no frames to encode"));
    }

    let delay = Delay::from_saturating_duration(cfg.frame_delay);

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ShanimateError::encoding(format!("failed to set gif loop flag: {e}")))?;

        for (index, frame) in frames.iter().enumerate() {
            if frame.width != cfg.width || frame.height != cfg.height {
                return Err(ShanimateError::validation(format!(
                    "frame {index} size mismatch: got {}x{}, expected {}x{}",
                    frame.width, frame.height, cfg.width, cfg.height
                )));
            }

            let image = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
                .ok_or_else(|| {
                    ShanimateError::encoding(format!(
                        "frame {index} buffer does not match width*height*4"
                    ))
                })?;

            encoder
                .encode_frame(Frame::from_parts(image, 0, 0, delay))
                .map_err(|e| {
                    ShanimateError::encoding(format!("failed to encode gif frame {index}: {e}"))
                })?;
        }
        // Dropping the encoder writes the GIF trailer into the buffer.
    }

    std::fs::write(&cfg.out_path, &buf).map_err(|e| {
        ShanimateError::encoding(format!(
            "failed to write '{}': {e}",
            cfg.out_path.display()
        ))
    })?;

    Ok(())
}
