#![forbid(unsafe_code)]

pub mod colormap;
pub mod encode_gif;
pub mod error;
pub mod grid;
pub mod harmonic;
pub mod pipeline;
pub mod projection;
pub mod render;

pub use encode_gif::{GifConfig, encode_looping_gif, looping_gif_config};
pub use error::{ShanimateError, ShanimateResult};
pub use grid::{Grid, GridSpec};
pub use harmonic::{HarmonicField, NOISE_FLOOR, snap_noise};
pub use pipeline::{AnimationParams, default_outfile, render_animation, run};
pub use projection::Orthographic;
pub use render::{FrameRgba, RenderContext};
