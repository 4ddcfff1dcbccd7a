//! stereogram-io - Image source and sink
//!
//! Decodes PNG files into [`Pix`] buffers (backgrounds and depth maps) and
//! encodes results back to 8-bit RGB PNG. The synthesis engines never see
//! these errors: decode and encode failures surface here as
//! [`IoError::DecodeError`] and [`IoError::EncodeError`].
//!
//! # Example
//!
//! ```no_run
//! use stereogram_io::{read_image, write_image};
//!
//! let background = read_image("BG.png").unwrap();
//! write_image(&background, "copy.png").unwrap();
//! ```

mod error;
pub mod format;
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use self::png::{read_png, write_png};

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use stereogram_core::Pix;
use tracing::info;

fn require_supported(format: ImageFormat, what: &str) -> IoResult<()> {
    if format.is_supported() {
        Ok(())
    } else {
        Err(IoError::UnsupportedFormat(format!(
            "{what}: {format:?} (only PNG is supported)"
        )))
    }
}

/// Read an image from a file path.
///
/// The format is detected from the file header, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    require_supported(detect_format(path)?, &path.display().to_string())?;
    let file = File::open(path)?;
    let pix = read_png(BufReader::new(file))?;
    info!(
        path = %path.display(),
        width = pix.width(),
        height = pix.height(),
        "loaded image"
    );
    Ok(pix)
}

/// Read an image from memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    require_supported(detect_format_from_bytes(data)?, "in-memory image")?;
    read_png(Cursor::new(data))
}

/// Write an image to a file path as PNG.
///
/// A path without an extension is accepted; any other extension than
/// `.png` is rejected before the file is created.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = match ImageFormat::from_path(path) {
        ImageFormat::Unknown if path.extension().is_none() => ImageFormat::Png,
        other => other,
    };
    require_supported(format, &path.display().to_string())?;

    let mut writer = BufWriter::new(File::create(path)?);
    write_png(pix, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        width = pix.width(),
        height = pix.height(),
        "saved image"
    );
    Ok(())
}

/// Encode an image to PNG bytes in memory.
pub fn write_image_mem(pix: &Pix) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_png(pix, &mut out)?;
    Ok(out)
}
