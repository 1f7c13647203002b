//! The font-backed measurement surface behind glyph calibration.

use ab_glyph::{point, Font, FontRef, PxScale};
use image::{GrayImage, Luma};

use crate::error::Result;

/// Width of the measurement surface in pixels.
pub const SURFACE_WIDTH: u32 = 15;
/// Height of the measurement surface in pixels.
pub const SURFACE_HEIGHT: u32 = 18;
/// Glyph scale in pixels; the baseline sits at the same height.
pub const GLYPH_SCALE: f32 = 15.0;

/// Measures how much ink a single glyph deposits on a fixed surface.
///
/// The table builder only needs this one capability, so tests can swap the
/// font backend for synthetic measurements.
pub trait GlyphRasterizer {
    /// Mean ink coverage over the whole surface in `[0, 1]`;
    /// 0 is a blank surface, 1 is fully inked.
    fn measure_ink(&self, glyph: char) -> f64;
}

/// Production rasterizer drawing dark-on-light with a real font.
pub struct FontRasterizer<'font> {
    font: FontRef<'font>,
}

impl<'font> FontRasterizer<'font> {
    pub fn from_slice(bytes: &'font [u8]) -> Result<Self> {
        Ok(Self {
            font: FontRef::try_from_slice(bytes)?,
        })
    }
}

impl GlyphRasterizer for FontRasterizer<'_> {
    fn measure_ink(&self, glyph: char) -> f64 {
        let glyph = self
            .font
            .glyph_id(glyph)
            .with_scale_and_position(PxScale::from(GLYPH_SCALE), point(0.0, GLYPH_SCALE));

        let mut surface = GrayImage::from_pixel(SURFACE_WIDTH, SURFACE_HEIGHT, Luma([255u8]));

        // Characters the font cannot outline (whitespace, unmapped
        // codepoints) leave the surface blank and measure as zero ink.
        if let Some(outlined) = self.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let x = bounds.min.x as i32 + x as i32;
                let y = bounds.min.y as i32 + y as i32;
                if (0..SURFACE_WIDTH as i32).contains(&x) && (0..SURFACE_HEIGHT as i32).contains(&y)
                {
                    let ink = (coverage * 255.0) as u8;
                    let pixel = surface.get_pixel_mut(x as u32, y as u32);
                    pixel.0[0] = pixel.0[0].min(255 - ink);
                }
            });
        }

        let brightness = surface
            .iter()
            .fold(0f64, |sum, &p| sum + p as f64 / 255.0)
            / surface.len() as f64;
        1.0 - brightness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InkgridError;

    #[test]
    fn invalid_font_bytes_are_rejected() {
        assert!(matches!(
            FontRasterizer::from_slice(b"definitely not a font"),
            Err(InkgridError::Font(_))
        ));
    }
}
