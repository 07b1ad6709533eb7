use crate::math::hsv_to_rgb;

/// Linear RGB texture sampled with wrapping UVs.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<[f32; 3]>,
}

impl Texture {
    /// Returns `None` when `texels` does not hold exactly `width * height` entries.
    pub fn from_texels(width: u32, height: u32, texels: Vec<[f32; 3]>) -> Option<Self> {
        if width == 0 || height == 0 || texels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            texels,
        })
    }

    pub fn solid(color: [f32; 3]) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Two-tone checkerboard with `cells` squares per side, hues derived from `hue`.
    pub fn checker(size: u32, cells: u32, hue: f32) -> Self {
        let size = size.max(1);
        let cells = cells.max(1);
        let light = hsv_to_rgb(hue, 0.35, 0.95);
        let dark = hsv_to_rgb(hue + 0.5, 0.45, 0.55);
        let cell = (size / cells).max(1);

        let texels = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    light
                } else {
                    dark
                }
            })
            .collect();

        Self {
            width: size,
            height: size,
            texels,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Nearest-texel lookup; `uv` wraps in both directions and v = 0 is the top row.
    pub fn sample(&self, uv: [f32; 2]) -> [f32; 3] {
        let u = uv[0].rem_euclid(1.0);
        let v = uv[1].rem_euclid(1.0);
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.texels[(y * self.width + x) as usize]
    }
}
