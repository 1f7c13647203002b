//! Named luminance functions selectable by the configuration surface.

use crate::error::ConfigError;

/// A fixed registry of greyscale formulas. Selection happens by the exact
/// human-readable name; an unknown name is a configuration error, never a
/// silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greyscale {
    /// `(r + g + b) / 3`
    Average,
    /// Broadcast-standard luma, `0.3r + 0.59g + 0.11b`
    Classic,
    /// ITU-R BT.709, `0.2126r + 0.7152g + 0.0722b`
    Bt709,
    /// ITU-R BT.601, `0.299r + 0.587g + 0.114b`
    Bt601,
    /// HSL lightness midpoint, `(max + min) / 2`
    Desaturate,
}

impl Greyscale {
    pub const ALL: [Greyscale; 5] = [
        Greyscale::Average,
        Greyscale::Classic,
        Greyscale::Bt709,
        Greyscale::Bt601,
        Greyscale::Desaturate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Greyscale::Average => "Average",
            Greyscale::Classic => "0.3/0.59/0.11",
            Greyscale::Bt709 => "ITU-R BT.709",
            Greyscale::Bt601 => "ITU-R BT.601",
            Greyscale::Desaturate => "Desaturate (HSL)",
        }
    }

    pub fn from_name(name: &str) -> Result<Greyscale, ConfigError> {
        Greyscale::ALL
            .into_iter()
            .find(|g| g.name() == name)
            .ok_or_else(|| ConfigError::UnknownGreyscale(name.to_string()))
    }

    /// Luminance of a normalized `(r, g, b)` triple. Inputs are expected in
    /// `[0, 1]`; the result is unbounded but stays near `[0, 1]` for every
    /// registry formula.
    pub fn luminance(&self, r: f32, g: f32, b: f32) -> f32 {
        match self {
            Greyscale::Average => (r + g + b) / 3.0,
            Greyscale::Classic => r * 0.3 + g * 0.59 + b * 0.11,
            Greyscale::Bt709 => r * 0.2126 + g * 0.7152 + b * 0.0722,
            Greyscale::Bt601 => r * 0.299 + g * 0.587 + b * 0.114,
            Greyscale::Desaturate => (r.max(g).max(b) + r.min(g).min(b)) / 2.0,
        }
    }
}
