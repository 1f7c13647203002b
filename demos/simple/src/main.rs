use std::time::Instant;

use image::{Rgba, RgbaImage};
use inkgrid::{convert, ConversionConfig, GlyphTable, InkgridError};

fn gradient_demo() -> Result<(), InkgridError> {
    let start = Instant::now();

    // horizontal ramp from black to white, no image file needed
    let image = RgbaImage::from_fn(240, 60, |x, _| {
        let value = (x * 255 / 239) as u8;
        Rgba([value, value, value, 255])
    });

    let table = GlyphTable::builtin();
    let config = ConversionConfig {
        cell_size: 4,
        contrast: 0.0,
        brightness: 0.0,
        ..ConversionConfig::default()
    };

    let art = convert(&image, &config, &table)?;
    print!("{art}");
    println!("final : {:?}", start.elapsed());
    Ok(())
}

fn main() {
    gradient_demo().unwrap();
}
