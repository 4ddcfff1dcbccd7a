//! PNG image format support
//!
//! Decoding normalizes every PNG flavour to 8-bit samples: palettes are
//! expanded, 16-bit samples keep their high byte and grayscale is
//! replicated into red, green and blue so its value is readable as depth.
//! Encoding always writes 8-bit RGB without alpha.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use stereogram_core::{Channels, Pix};
use tracing::debug;

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (channels, in_spp) = match color_type {
        ColorType::Grayscale => (Channels::Rgb, 1),
        ColorType::GrayscaleAlpha => (Channels::Rgba, 2),
        ColorType::Rgb => (Channels::Rgb, 3),
        ColorType::Rgba => (Channels::Rgba, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let used = width as usize * in_spp;
    if bytes_per_row < used || output_info.buffer_size() < bytes_per_row * height as usize {
        return Err(IoError::InvalidData(format!(
            "PNG rows too short: {} bytes for {} pixels",
            bytes_per_row, width
        )));
    }

    let out_spp = channels.count() as usize;
    let mut data = Vec::with_capacity(width as usize * height as usize * out_spp);
    for row in buf.chunks_exact(bytes_per_row).take(height as usize) {
        let row = &row[..used];
        match color_type {
            ColorType::Grayscale => {
                data.extend(row.iter().flat_map(|&g| [g, g, g]));
            }
            ColorType::GrayscaleAlpha => {
                data.extend(row.chunks_exact(2).flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]]));
            }
            _ => data.extend_from_slice(row),
        }
    }

    debug!(width, height, ?color_type, "decoded PNG");
    Ok(Pix::from_raw(width, height, channels, data)?)
}

/// Write a PNG image as 8-bit RGB.
///
/// The alpha channel of RGBA buffers is dropped.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let (width, height) = pix.dimensions();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(&pix.to_rgb_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    debug!(width, height, "encoded PNG");
    Ok(())
}
