use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use inkgrid::{default_alphabet, ConversionConfig, FontRasterizer, GlyphTable};

#[derive(Parser)]
#[command(name = "inkgrid", about = "Convert an image into glyph art")]
struct Args {
    /// Image to convert. May be omitted with --show-table.
    image: Option<PathBuf>,

    /// Side length of one sampling cell in source pixels
    #[arg(long, default_value_t = 5)]
    cell_size: u32,

    /// Contrast adjustment, -1 to 1
    #[arg(long, default_value_t = 0.25, allow_hyphen_values = true)]
    contrast: f32,

    /// Brightness adjustment, -1 to 1
    #[arg(long, default_value_t = 0.1, allow_hyphen_values = true)]
    brightness: f32,

    /// Greyscale function name, e.g. "ITU-R BT.601"
    #[arg(long, default_value = "ITU-R BT.601")]
    greyscale: String,

    /// Inverted suits light glyphs on a dark terminal
    #[arg(long, value_enum, default_value_t = ColorMode::Inverted)]
    color_mode: ColorMode,

    /// Calibrate the glyph table from a font file
    #[arg(long, conflicts_with = "chars")]
    font: Option<PathBuf>,

    /// Use a pre-ordered dark-to-light ramp instead of calibrating
    #[arg(long)]
    chars: Option<String>,

    /// Print the ordered glyph ramp
    #[arg(long)]
    show_table: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    Normal,
    Inverted,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let font_bytes = match &args.font {
        Some(path) => Some(
            fs::read(path).with_context(|| format!("could not read font {}", path.display()))?,
        ),
        None => None,
    };

    let table = match (&font_bytes, &args.chars) {
        (Some(bytes), _) => {
            let rasterizer = FontRasterizer::from_slice(bytes)?;
            GlyphTable::build(&rasterizer, &default_alphabet())?
        }
        (None, Some(ramp)) => GlyphTable::from_ordered(ramp.chars())?,
        (None, None) => GlyphTable::builtin(),
    };

    if args.show_table {
        println!("{}", table.glyphs().iter().collect::<String>());
    }

    let Some(path) = &args.image else {
        if args.show_table {
            return Ok(());
        }
        bail!("no image given, see --help");
    };

    let bytes =
        fs::read(path).with_context(|| format!("could not read image {}", path.display()))?;

    let config = ConversionConfig {
        cell_size: args.cell_size,
        contrast: args.contrast,
        brightness: args.brightness,
        greyscale: args.greyscale,
        invert: matches!(args.color_mode, ColorMode::Inverted),
    };

    let art = inkgrid::convert_bytes(&bytes, &config, &table)
        .with_context(|| format!("could not convert {}", path.display()))?;
    log::debug!("{} rows x {} cols", art.rows(), art.cols());

    print!("{art}");
    Ok(())
}
