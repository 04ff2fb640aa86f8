use crate::error::ConvertError;
use rgb565_pipeline::RasterBuffer;
use std::io::Cursor;

/// Decode a PNG of any color type and bit depth into an RGBA8 buffer.
///
/// Palettes and low bit depths are expanded, 16-bit samples are stripped to
/// 8 bits, and gray or alpha-less images get their missing channels filled
/// in (alpha 255).
pub fn decode_png(bytes: &[u8]) -> Result<RasterBuffer, ConvertError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ConvertError::Decode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ConvertError::Decode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ConvertError::Decode(format!(
            "unsupported bit depth after expansion: {:?}",
            info.bit_depth
        )));
    }

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(ConvertError::Decode(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    Ok(RasterBuffer::from_rgba(
        rgba,
        info.width as usize,
        info.height as usize,
    )?)
}

/// Encode an RGBA8 buffer as a PNG, re-compressed with oxipng.
pub fn encode_png(buffer: &RasterBuffer) -> Result<Vec<u8>, ConvertError> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| ConvertError::Encode(format!("width {} too large", buffer.width())))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| ConvertError::Encode(format!("height {} too large", buffer.height())))?;

    // Fast settings, oxipng re-compresses afterwards
    let mut out = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConvertError::Encode(e.to_string()))?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(|e| ConvertError::Encode(e.to_string()))?;
    }
    let png_bytes = out.into_inner();

    // Lossless: oxipng may drop an all-opaque alpha channel or switch to a
    // palette, but never changes pixel values.
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb565_pipeline::Pixel;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_roundtrip_preserves_pixels() {
        let pixels: Vec<Pixel> = (0..12u8)
            .map(|i| Pixel::new(i * 20, 255 - i * 20, i, if i % 2 == 0 { 255 } else { 128 }))
            .collect();
        let buffer = RasterBuffer::from_pixels(&pixels, 4, 3).unwrap();

        let png = encode_png(&buffer).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode_png(&png).unwrap(), buffer);
    }

    #[test]
    fn test_opaque_roundtrip_after_optimization() {
        let buffer = RasterBuffer::filled(5, 5, Pixel::rgb(8, 12, 16)).unwrap();
        let png = encode_png(&buffer).unwrap();
        assert_eq!(decode_png(&png).unwrap(), buffer);
    }

    #[test]
    fn test_decode_rgb() {
        let png = encode_raw(2, 1, png::ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let buffer = decode_png(&png).unwrap();
        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_decode_grayscale() {
        let png = encode_raw(2, 1, png::ColorType::Grayscale, &[0, 200]);
        let buffer = decode_png(&png).unwrap();
        assert_eq!(buffer.pixel(1, 0), Pixel::rgb(200, 200, 200));

        let png = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[50, 60]);
        assert_eq!(decode_png(&png).unwrap().pixel(0, 0), Pixel::new(50, 50, 50, 60));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_png(b"definitely not a png").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }
}
