use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use bmp2raw::config::{self, CONFIG_FILE_NAME, ConfigError};
use bmp2raw::{ConvertRequest, DeviceResolution, Rotation, SampleOrder, Unstoppable};

/// Convert a BMP image to raw 32-bit pixels for a framebuffer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input BMP file
    #[arg(default_value = "input.bmp")]
    input: PathBuf,

    /// Clockwise rotation in degrees (0, 90, 180 or 270; anything else is ignored)
    #[arg(short, long, default_value_t = 0)]
    rotate: u32,

    /// Output raw file
    #[arg(short, long, default_value = "output_rotated.raw")]
    output: PathBuf,

    /// Device resolution config file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Emit the whole image, ignoring the device resolution
    #[arg(long)]
    no_clip: bool,

    /// Byte order of each output pixel: argb, rgba or bgra
    #[arg(long, default_value = "argb")]
    order: SampleOrder,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn device_resolution(args: &Args) -> anyhow::Result<DeviceResolution> {
    if args.no_clip {
        return Ok(DeviceResolution::UNAVAILABLE);
    }
    match config::load_device_resolution(&args.config) {
        Ok(res) => {
            info!("device resolution {}x{}", res.width, res.height);
            Ok(res)
        }
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("no config at {}, not clipping", args.config.display());
            Ok(DeviceResolution::UNAVAILABLE)
        }
        Err(e) => Err(e).with_context(|| format!("loading {}", args.config.display())),
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let rotation = Rotation::from_degrees(args.rotate);
    if rotation.degrees() != args.rotate {
        warn!("unsupported rotation {}, not rotating", args.rotate);
    }

    let device = device_resolution(args)?;

    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if !bmp2raw::bmp::has_signature(&data) {
        bail!("{} is not a BMP file", args.input.display());
    }

    let out = ConvertRequest::new(&data)
        .rotation(rotation)
        .device_resolution(device)
        .convert(Unstoppable)
        .with_context(|| format!("converting {}", args.input.display()))?;
    let bytes = out.to_bytes(args.order);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;

    info!(
        "wrote {}x{} ({} bytes) to {}",
        out.width,
        out.height,
        bytes.len(),
        args.output.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .parse_default_env()
        .init();
    debug!("{args:?}");
    run(&args)
}
