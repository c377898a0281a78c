//! Pixel sinks: where rendered bytes go
//!
//! The renderer never holds the image. It pushes one RGB triple at a time, in
//! its traversal order, into a [`PixelSink`]. A sink only learns the image
//! dimensions up front, so pixel placement is implied by stream order.

use crate::{Error, Result};
use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path that selects standard output instead of a file
pub const STDOUT_PATH: &str = "-";

/// Consumer of an ordered, unaddressed pixel stream
pub trait PixelSink {
    /// Called once before the first pixel
    fn begin(&mut self, width: u32, height: u32) -> Result<()>;

    /// Called once per pixel, in traversal order
    fn write_pixel(&mut self, rgb: [u8; 3]) -> Result<()>;

    /// Called once after the last pixel
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Ppm,
    Png,
}

impl OutputFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "ppm" => Some(Self::Ppm),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Get a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ppm => "PPM (binary P6)",
            Self::Png => "PNG",
        }
    }
}

/// Open a sink for `path`, choosing the format from its extension
///
/// [`STDOUT_PATH`] streams PPM to standard output.
pub fn open(path: &Path) -> Result<Box<dyn PixelSink>> {
    if path.as_os_str() == STDOUT_PATH {
        return Ok(Box::new(PpmSink::new(BufWriter::new(std::io::stdout()))));
    }

    match OutputFormat::from_extension(path) {
        Some(OutputFormat::Ppm) => Ok(Box::new(PpmSink::new(BufWriter::new(File::create(path)?)))),
        Some(OutputFormat::Png) => Ok(Box::new(PngSink::new(path))),
        None => Err(Error::UnsupportedFormat(format!(
            "{} (expected .ppm or .png)",
            path.display()
        ))),
    }
}

/// The PPM header the renderer's byte stream is framed with
pub fn ppm_header(width: u32, height: u32) -> String {
    format!("P6 {} {} 255 ", width, height)
}

fn check_complete(written: u64, width: u32, height: u32) -> Result<()> {
    let expected = u64::from(width) * u64::from(height);
    if written == expected {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "sink received {written} pixels, expected {expected} for {width}x{height}"
        )))
    }
}

// ============================================================================
// PPM
// ============================================================================

/// Writes binary PPM (P6) to any writer
pub struct PpmSink<W: Write> {
    writer: W,
    width: u32,
    height: u32,
    written: u64,
}

impl<W: Write> PpmSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            width: 0,
            height: 0,
            written: 0,
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PixelSink for PpmSink<W> {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.written = 0;
        self.writer.write_all(ppm_header(width, height).as_bytes())?;
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> Result<()> {
        self.writer.write_all(&rgb)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        check_complete(self.written, self.width, self.height)
    }
}

// ============================================================================
// PNG
// ============================================================================

/// Buffers the stream and saves it as a PNG on [`PixelSink::finish`]
///
/// Pixels fill rows top to bottom in arrival order, exactly as a PPM viewer
/// would lay out the same stream.
pub struct PngSink {
    path: PathBuf,
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: 0,
            height: 0,
            buffer: Vec::new(),
        }
    }
}

impl PixelSink for PngSink {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.buffer = Vec::with_capacity(width as usize * height as usize * 3);
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> Result<()> {
        self.buffer.extend_from_slice(&rgb);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        check_complete(self.buffer.len() as u64 / 3, self.width, self.height)?;

        let buffer = std::mem::take(&mut self.buffer);
        let image = RgbImage::from_raw(self.width, self.height, buffer).ok_or_else(|| {
            Error::InvalidParameter(format!("buffer does not fit {}x{}", self.width, self.height))
        })?;
        image.save_with_format(&self.path, ImageFormat::Png)?;
        debug!(path = %self.path.display(), "saved png");
        Ok(())
    }
}
