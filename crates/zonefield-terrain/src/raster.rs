//! Zone raster images and their decoded sample form.
//!
//! Zones hold their samples as encoded raster images (the form asset
//! glue produces): flat little-endian f32 channel data. A decoded
//! `Raster` is a row-major texel grid with direct sample access. The
//! elevation raster carries height in red and the hole flag in green;
//! the water raster carries depth in red.

use glam::IVec2;

use zonefield_core::error::TerrainError;

/// Channel layout of an encoded raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// One f32 channel (red). Green decodes to 0.
    R32F,
    /// Two f32 channels (red, green).
    Rg32F,
}

impl RasterFormat {
    /// Encoded size of one texel in bytes.
    pub fn bytes_per_texel(&self) -> usize {
        match self {
            RasterFormat::R32F => 4,
            RasterFormat::Rg32F => 8,
        }
    }
}

/// One decoded raster texel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Texel {
    pub r: f32,
    pub g: f32,
}

impl Texel {
    pub fn new(r: f32, g: f32) -> Self {
        Self { r, g }
    }
}

/// An encoded zone raster: dimensions, channel format, and the flat
/// little-endian payload, row-major from the top-left texel.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    format: RasterFormat,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an encoded payload. The payload is validated against the
    /// dimensions at decode time, not here.
    pub fn new(width: u32, height: u32, format: RasterFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// Encode a row-major texel slice. Channels beyond the format's
    /// count are dropped.
    pub fn from_texels(width: u32, height: u32, format: RasterFormat, texels: &[Texel]) -> Self {
        let mut data = Vec::with_capacity(texels.len() * format.bytes_per_texel());
        for texel in texels {
            data.extend_from_slice(&texel.r.to_le_bytes());
            if format == RasterFormat::Rg32F {
                data.extend_from_slice(&texel.g.to_le_bytes());
            }
        }
        Self::new(width, height, format, data)
    }

    /// A raster with every texel set to the same value.
    pub fn filled(width: u32, height: u32, format: RasterFormat, texel: Texel) -> Self {
        let texels = vec![texel; (width as usize) * (height as usize)];
        Self::from_texels(width, height, format, &texels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> RasterFormat {
        self.format
    }

    /// Actual payload length in bytes.
    pub fn payload_bytes(&self) -> usize {
        self.data.len()
    }

    /// Payload length the dimensions and format call for.
    pub fn expected_payload_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * self.format.bytes_per_texel()
    }

    /// Decode the payload into a sample grid.
    ///
    /// `zone` identifies the owning zone for error reporting. Fails if
    /// the payload length does not match the declared dimensions.
    pub fn decode(&self, zone: IVec2) -> Result<Raster, TerrainError> {
        let texel_count = (self.width as usize) * (self.height as usize);
        let expected_bytes = self.expected_payload_bytes();
        if self.data.len() != expected_bytes {
            return Err(TerrainError::MalformedRaster {
                zone,
                expected_bytes,
                actual_bytes: self.data.len(),
            });
        }

        let stride = self.format.bytes_per_texel();
        let mut texels = Vec::with_capacity(texel_count);
        for i in 0..texel_count {
            let offset = i * stride;
            let r = f32::from_le_bytes(self.data[offset..offset + 4].try_into().unwrap());
            let g = match self.format {
                RasterFormat::R32F => 0.0,
                RasterFormat::Rg32F => {
                    f32::from_le_bytes(self.data[offset + 4..offset + 8].try_into().unwrap())
                }
            };
            texels.push(Texel { r, g });
        }

        Ok(Raster {
            width: self.width,
            height: self.height,
            texels,
        })
    }
}

/// A decoded raster: row-major texels with bounds-checked access.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    texels: Vec<Texel>,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at integer texel coordinates. Panics if out of bounds;
    /// callers stay within the zone domain by construction.
    pub fn texel(&self, x: u32, y: u32) -> Texel {
        debug_assert!(x < self.width && y < self.height);
        self.texels[(y as usize) * (self.width as usize) + (x as usize)]
    }
}
