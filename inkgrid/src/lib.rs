//! Convert raster images into glyph art.
//!
//! The pipeline has two independent stages. A calibration stage rasterizes
//! every character of an alphabet, measures its ink coverage and orders the
//! characters from darkest to lightest ([`GlyphTable`]). A conversion stage
//! box-averages an image into a luminance grid and indexes each cell into the
//! calibrated ramp ([`convert`]). The table is built once and shared by
//! reference across any number of conversions.

pub mod converter;
pub mod error;
pub mod glyphs;
pub mod greyscale;
pub mod reducer;
pub mod session;

pub use converter::{convert, convert_bytes, AsciiArt, ConversionConfig};
pub use error::{ConfigError, InkgridError, Result};
pub use glyphs::raster::{FontRasterizer, GlyphRasterizer};
pub use glyphs::{default_alphabet, GlyphTable};
pub use greyscale::Greyscale;
pub use reducer::{reduce, LuminanceGrid};
pub use session::{ConversionSession, Ticket};
