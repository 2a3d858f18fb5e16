use std::{fmt, str::FromStr};

use crate::foundation::error::{TrackArtError, TrackArtResult};

/// One recorded track sample in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate from `(lat, lon)`.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Opaque RGB color. Serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure red, the default dot color.
    pub const RED: Self = Self::new(255, 0, 0);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
    pub fn parse_hex(s: &str) -> TrackArtResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(TrackArtError::invalid_config(format!(
                "color \"{s}\" must be #RRGGBB"
            )));
        }

        let byte = |pair: &str| {
            u8::from_str_radix(pair, 16).map_err(|_| {
                TrackArtError::invalid_config(format!("invalid hex byte \"{pair}\" in \"{s}\""))
            })
        };
        Ok(Self::new(
            byte(&digits[0..2])?,
            byte(&digits[2..4])?,
            byte(&digits[4..6])?,
        ))
    }

    /// Fully opaque straight RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = TrackArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = TrackArtError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        c.to_string()
    }
}

/// Straight-alpha RGBA8 raster, row-major and tightly packed.
///
/// Every compositing operation takes canvases by reference and returns a new one, so a caller
/// never observes a half-finished image.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Canvas with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: rgba.repeat(n),
        }
    }

    /// Wrap an existing straight RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> TrackArtResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(TrackArtError::invalid_config(format!(
                "rgba8 buffer for {width}x{height} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` buffer (for resampling and encoding).
    pub fn to_image(&self) -> TrackArtResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            TrackArtError::invalid_config(format!(
                "canvas buffer does not fit {}x{}",
                self.width, self.height
            ))
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the canvas has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Raw straight RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume into raw straight RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
