//! Test fixtures: small PNG images built in memory.

use rgb565_pipeline::{Pixel, RasterBuffer};

/// Encode raw RGBA pixels as a PNG with the png crate directly.
pub fn png_from_pixels(pixels: &[Pixel], width: u32, height: u32) -> Vec<u8> {
    let data: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&data).unwrap();
    }
    out
}

/// A `width` x `height` horizontal gradient in all three channels.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let pixels: Vec<Pixel> = (0..height)
        .flat_map(|_| {
            (0..width).map(move |x| {
                let v = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
                Pixel::rgb(v, 255 - v, v / 2)
            })
        })
        .collect();
    png_from_pixels(&pixels, width, height)
}

/// Red, green, blue, white in a 2x2 grid.
pub fn primaries_png() -> Vec<u8> {
    png_from_pixels(
        &[
            Pixel::rgb(255, 0, 0),
            Pixel::rgb(0, 255, 0),
            Pixel::rgb(0, 0, 255),
            Pixel::rgb(255, 255, 255),
        ],
        2,
        2,
    )
}

/// Solid color image.
pub fn solid_png(width: u32, height: u32, pixel: Pixel) -> Vec<u8> {
    let pixels = vec![pixel; (width * height) as usize];
    png_from_pixels(&pixels, width, height)
}

/// Decoded form of a fixture, for comparing against responses.
pub fn raster(png: &[u8]) -> RasterBuffer {
    rgb565::rendering::decode_png(png).unwrap()
}

/// Config file with a dithering preset as the default.
pub const PRESETS_YAML: &str = r#"
default_preset: lcd
presets:
  lcd:
    ditherEnabled: true
    ditherAlgorithm: floyd-steinberg
    filter: none
    filterIntensity: 1.0
  thumb:
    filter: grayscale
    resize:
      mode: size
      width: 8
      aspectLocked: true
      algorithm: bicubic
"#;
