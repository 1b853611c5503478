use clap::Parser;

use shanimate::{AnimationParams, GridSpec};

/// Generate an animated gif of a spherical harmonic.
#[derive(Parser, Debug)]
#[command(name = "shanimate", version)]
struct Cli {
    /// Spherical degree.
    #[arg(allow_negative_numbers = true)]
    ell: i64,

    /// Azimuthal order.
    #[arg(allow_negative_numbers = true)]
    m: i64,

    /// Output gif filename.
    #[arg(short, long)]
    outfile: Option<String>,

    /// Inclination (degrees from pole).
    #[arg(short, long, default_value_t = 60.0, allow_negative_numbers = true)]
    inc: f64,

    /// Image size (inches).
    #[arg(short, long, default_value_t = 1.0)]
    size: f64,

    /// Number of frames in animation.
    #[arg(short, long, default_value_t = 32)]
    nframes: u32,

    /// Animation duration (seconds).
    #[arg(short, long, default_value_t = 2.0)]
    duration: f64,

    /// Number of longitude samples.
    #[arg(long, default_value_t = 200)]
    nlon: usize,

    /// Number of latitude samples.
    #[arg(long, default_value_t = 500)]
    nlat: usize,

    /// Dots per inch.
    #[arg(long, default_value_t = 300.0)]
    dpi: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let params = AnimationParams {
        ell: cli.ell,
        m: cli.m,
        inc_deg: cli.inc,
        size_in: cli.size,
        nframes: cli.nframes,
        duration_s: cli.duration,
        grid: GridSpec {
            nlon: cli.nlon,
            nlat: cli.nlat,
        },
        dpi: cli.dpi,
    };
    params.validate()?;

    let outfile = cli
        .outfile
        .unwrap_or_else(|| shanimate::pipeline::default_outfile(cli.ell, cli.m));

    shanimate::run(&params, &outfile, std::io::stdout().lock())?;

    println!("\nWrote {outfile}");
    Ok(())
}
