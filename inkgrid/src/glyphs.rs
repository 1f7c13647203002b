//! Glyph calibration: ordering an alphabet by measured ink coverage.

pub mod raster;

use std::time::Instant;

use crate::error::{InkgridError, Result};

use raster::GlyphRasterizer;

/// The calibration alphabet: printable ASCII plus a run of box- and
/// shape-drawing characters, chosen for their spread of visual densities.
pub fn default_alphabet() -> Vec<char> {
    let mut alphabet: Vec<char> = (0x20..0x7f).filter_map(char::from_u32).collect();
    alphabet.extend((0x251c..0x25e4).filter_map(char::from_u32));
    alphabet
}

/// An immutable ramp of glyphs ordered darkest to lightest.
///
/// Building a table is the expensive, one-time part of the pipeline; once
/// built it is a pure value and can be shared by reference across any number
/// of conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: Vec<char>,
}

impl GlyphTable {
    /// Measures every character of `alphabet` with `rasterizer` and orders
    /// them by descending ink coverage (densest glyph first). Characters with
    /// equal coverage keep their alphabet order.
    pub fn build(rasterizer: &impl GlyphRasterizer, alphabet: &[char]) -> Result<Self> {
        let start = Instant::now();

        let mut measured: Vec<(char, f64)> = alphabet
            .iter()
            .map(|&glyph| (glyph, rasterizer.measure_ink(glyph)))
            .collect();
        measured.sort_by(|a, b| b.1.total_cmp(&a.1));

        log::debug!(
            "calibrated {} glyphs in {:?}",
            measured.len(),
            start.elapsed()
        );

        Self::from_ordered(measured.into_iter().map(|(glyph, _)| glyph))
    }

    /// Wraps a caller-supplied ramp already ordered darkest to lightest.
    pub fn from_ordered(glyphs: impl IntoIterator<Item = char>) -> Result<Self> {
        let glyphs: Vec<char> = glyphs.into_iter().collect();
        if glyphs.len() < 2 {
            return Err(InkgridError::TableTooSmall(glyphs.len()));
        }
        Ok(Self { glyphs })
    }

    /// The classic 10-step ramp. Lets the pipeline run without any font bytes.
    pub fn builtin() -> Self {
        Self {
            glyphs: "@%#*+=-:. ".chars().collect(),
        }
    }

    /// The ramp, darkest first.
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Maps a luminance to its glyph: clamp to `[0, 1]`, then floor-index so
    /// the mapping stays monotone end to end.
    pub fn glyph_for(&self, luminance: f32) -> char {
        let clamped = luminance.clamp(0.0, 1.0) as f64;
        let index = (clamped * (self.glyphs.len() - 1) as f64).floor() as usize;
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }
}
