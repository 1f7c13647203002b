//! The conversion entry points: image + config + glyph table to text.

use std::fmt;

use image::RgbaImage;

use crate::error::{ConfigError, Result};
use crate::glyphs::GlyphTable;
use crate::greyscale::Greyscale;
use crate::reducer::reduce;

/// The configuration record supplied by the presentation layer.
///
/// `contrast` and `brightness` live in `[-1, 1]` and are silently clamped
/// when they stray outside; a zero `cell_size` or an unknown greyscale name
/// is rejected before any sampling begins.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Side length of one sampling cell in source pixels.
    pub cell_size: u32,
    pub contrast: f32,
    pub brightness: f32,
    /// Registry key, see [`Greyscale::name`].
    pub greyscale: String,
    /// When set, low luminance maps to the light end of the ramp. This is
    /// the right setting for light glyphs on a dark background.
    pub invert: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            cell_size: 5,
            contrast: 0.25,
            brightness: 0.1,
            greyscale: Greyscale::Bt601.name().to_string(),
            invert: true,
        }
    }
}

impl ConversionConfig {
    /// Resolves the greyscale function and checks the cell size.
    pub fn validate(&self) -> std::result::Result<Greyscale, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        Greyscale::from_name(&self.greyscale)
    }
}

/// The rendered output: one glyph per cell, one `\n`-terminated line per
/// cell row. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiArt {
    text: String,
    rows: usize,
    cols: usize,
}

impl AsciiArt {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for AsciiArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Converts a decoded image into glyph art.
///
/// An image smaller than one cell in either dimension produces an explicitly
/// empty [`AsciiArt`]; that is a reachable boundary for user-supplied images,
/// not an error.
pub fn convert(image: &RgbaImage, config: &ConversionConfig, table: &GlyphTable) -> Result<AsciiArt> {
    let grid = reduce(image, config)?;

    let mut text = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in grid.iter_rows() {
        for &luminance in row {
            let effective = if config.invert {
                1.0 - luminance
            } else {
                luminance
            };
            text.push(table.glyph_for(effective));
        }
        text.push('\n');
    }

    Ok(AsciiArt {
        text,
        rows: grid.rows(),
        cols: grid.cols(),
    })
}

/// Decodes an encoded image (PNG, JPEG, ...) and converts it.
pub fn convert_bytes(bytes: &[u8], config: &ConversionConfig, table: &GlyphTable) -> Result<AsciiArt> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    convert(&image, config, table)
}
