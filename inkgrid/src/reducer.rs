//! Image to luminance-grid reduction: contrast/brightness adjustment, square
//! cell partitioning and per-cell box averaging.

use image::RgbaImage;

use crate::converter::ConversionConfig;
use crate::error::ConfigError;
use crate::greyscale::Greyscale;

/// One luminance value per sampled cell, stored row-major so the outer
/// dimension follows image rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceGrid {
    cells: Vec<f32>,
    cols: usize,
    rows: usize,
}

impl LuminanceGrid {
    fn empty() -> Self {
        Self {
            cells: vec![],
            cols: 0,
            rows: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Rows in reading order, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.cells.chunks(self.cols.max(1))
    }
}

/// Per-channel adjustment table: linear contrast scaling around the mid-grey
/// pivot 127.5 with slope `(1 + c) / (1 - c)`, clamped, then an additive
/// brightness shift of `b * 255`, clamped again. `c = 1` degenerates to a
/// step around the pivot, `c = -1` flattens everything to mid-grey.
fn adjustment_lut(contrast: f32, brightness: f32) -> [u8; 256] {
    let contrast = contrast.clamp(-1.0, 1.0);
    let shift = brightness.clamp(-1.0, 1.0) * 255.0;
    let slope = (1.0 + contrast) / (1.0 - contrast);

    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        let scaled = ((value as f32 - 127.5) * slope + 127.5).clamp(0.0, 255.0);
        *slot = (scaled + shift).clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Reduces `image` to a [`LuminanceGrid`] per `config`.
///
/// The image is partitioned into non-overlapping `cell_size` squares scanning
/// left to right then top to bottom; partial cells at the right and bottom
/// edges are dropped, so the grid is exactly `floor(H / cell_size)` rows of
/// `floor(W / cell_size)` cells. An image smaller than one cell in either
/// dimension yields an empty grid, not an error. The source image is never
/// mutated.
pub fn reduce(image: &RgbaImage, config: &ConversionConfig) -> Result<LuminanceGrid, ConfigError> {
    let greyscale = config.validate()?;
    let lut = adjustment_lut(config.contrast, config.brightness);

    let cell = config.cell_size as usize;
    let cols = image.width() as usize / cell;
    let rows = image.height() as usize / cell;
    if cols == 0 || rows == 0 {
        return Ok(LuminanceGrid::empty());
    }

    // Sampled column by column, as the cells are scanned, then transposed
    // below into reading order.
    let mut columns: Vec<Vec<f32>> = Vec::with_capacity(cols);
    for col in 0..cols {
        let mut column = Vec::with_capacity(rows);
        for row in 0..rows {
            column.push(cell_luminance(image, &lut, greyscale, col, row, cell));
        }
        columns.push(column);
    }

    let mut cells = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for column in &columns {
            cells.push(column[row]);
        }
    }

    log::trace!("reduced {}x{} image to {cols}x{rows} grid", image.width(), image.height());
    Ok(LuminanceGrid { cells, cols, rows })
}

fn cell_luminance(
    image: &RgbaImage,
    lut: &[u8; 256],
    greyscale: Greyscale,
    col: usize,
    row: usize,
    cell: usize,
) -> f32 {
    let x0 = (col * cell) as u32;
    let y0 = (row * cell) as u32;

    let mut sum = 0f64;
    for y in y0..y0 + cell as u32 {
        for x in x0..x0 + cell as u32 {
            let [r, g, b, _] = image.get_pixel(x, y).0;
            sum += greyscale.luminance(
                lut[r as usize] as f32 / 255.0,
                lut[g as usize] as f32 / 255.0,
                lut[b as usize] as f32 / 255.0,
            ) as f64;
        }
    }
    (sum / (cell * cell) as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn config(cell_size: u32) -> ConversionConfig {
        ConversionConfig {
            cell_size,
            contrast: 0.0,
            brightness: 0.0,
            greyscale: "ITU-R BT.601".to_string(),
            invert: false,
        }
    }

    fn uniform(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn lut_is_identity_without_adjustment() {
        let lut = adjustment_lut(0.0, 0.0);
        for value in 0..=255usize {
            assert_eq!(lut[value], value as u8);
        }
    }

    #[test]
    fn full_negative_contrast_flattens_to_mid_grey() {
        let lut = adjustment_lut(-1.0, 0.0);
        assert!(lut.iter().all(|&v| v == 127));
    }

    #[test]
    fn full_contrast_is_a_step_around_the_pivot() {
        let lut = adjustment_lut(1.0, 0.0);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[127], 0);
        assert_eq!(lut[128], 255);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn brightness_extremes_saturate() {
        assert!(adjustment_lut(0.0, 1.0).iter().all(|&v| v == 255));
        assert!(adjustment_lut(0.0, -1.0).iter().all(|&v| v == 0));
    }

    #[test]
    fn out_of_range_adjustments_are_clamped() {
        assert_eq!(adjustment_lut(0.0, 3.0), adjustment_lut(0.0, 1.0));
        assert_eq!(adjustment_lut(-7.0, 0.0), adjustment_lut(-1.0, 0.0));
    }

    #[test]
    fn grid_dimensions_truncate_partial_cells() {
        let grid = reduce(&uniform(10, 10, 100), &config(3)).unwrap();
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn image_smaller_than_one_cell_yields_an_empty_grid() {
        let grid = reduce(&uniform(4, 4, 100), &config(5)).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.cols(), 0);
    }

    #[test]
    fn uniform_mid_grey_reduces_to_its_luminance() {
        let grid = reduce(&uniform(10, 10, 128), &config(10)).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert!((grid.get(0, 0).unwrap() - 0.50196).abs() < 1e-4);
    }

    #[test]
    fn grid_follows_reading_order() {
        // dark left pixel, light right pixel on a single row
        let mut image = uniform(2, 1, 255);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));

        let grid = reduce(&image, &config(1)).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 2));
        assert!(grid.get(0, 0).unwrap() < 0.01);
        assert!(grid.get(0, 1).unwrap() > 0.99);
    }

    #[test]
    fn reduction_is_idempotent() {
        let mut image = uniform(9, 7, 80);
        image.put_pixel(3, 3, Rgba([200, 10, 90, 255]));
        let config = ConversionConfig {
            contrast: 0.4,
            brightness: -0.2,
            ..config(2)
        };

        let first = reduce(&image, &config).unwrap();
        let second = reduce(&image, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_greyscale_is_rejected_before_sampling() {
        let config = ConversionConfig {
            greyscale: "bogus".to_string(),
            ..config(1)
        };
        assert_eq!(
            reduce(&uniform(4, 4, 100), &config),
            Err(ConfigError::UnknownGreyscale("bogus".to_string()))
        );
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        assert_eq!(
            reduce(&uniform(4, 4, 100), &config(0)),
            Err(ConfigError::ZeroCellSize)
        );
    }
}
