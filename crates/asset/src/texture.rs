//! RGBA8 textures: procedural UV grid or PNG from disk.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub label: String,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    pub const BYTES_PER_PIXEL: u32 = 4;

    pub fn from_rgba8(label: impl Into<String>, width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL as usize;
        if width == 0 || height == 0 {
            bail!("texture must not be empty ({width}x{height})");
        }
        if data.len() != expected {
            bail!(
                "RGBA8 data is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            );
        }
        Ok(Self {
            label: label.into(),
            data,
            width,
            height,
        })
    }

    /// Load texture from a PNG file.
    pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {}", path.display());

        let img = image::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::info!("Loaded texture {width}x{height}");
        Self::from_rgba8(path.display().to_string(), width, height, rgba.into_raw())
    }

    /// UV test grid: 8x8 cells tinted by their (u, v) coordinate, with dark
    /// grid lines on cell borders.
    pub fn uv_grid(size: u32) -> Self {
        let size = size.max(8);
        let cell = size / 8;
        let mut data = Vec::with_capacity((size * size * Self::BYTES_PER_PIXEL) as usize);

        for y in 0..size {
            for x in 0..size {
                let on_line = x % cell == 0 || y % cell == 0;
                let (cx, cy) = ((x / cell).min(7), (y / cell).min(7));
                let pixel = if on_line {
                    [32, 32, 32, 255]
                } else {
                    let checker = if (cx + cy) % 2 == 0 { 255 } else { 200 };
                    let r = (cx * 255 / 7) as u8;
                    let g = (cy * 255 / 7) as u8;
                    [r.max(40), g.max(40), checker, 255]
                };
                data.extend_from_slice(&pixel);
            }
        }

        Self {
            label: "uv_grid".into(),
            data,
            width: size,
            height: size,
        }
    }

    /// Bytes per texel row.
    pub fn row_pitch(&self) -> u32 {
        self.width * Self::BYTES_PER_PIXEL
    }

    pub fn is_valid(&self) -> bool {
        let expected = (self.row_pitch() * self.height) as usize;
        self.data.len() == expected && self.width > 0 && self.height > 0
    }
}
