/// Shared geometric and color primitives used across the surface and editor modules.
use serde::Deserialize;

/// Pointer position in surface coordinates. Sub-pixel precision is kept because
/// the shell reports fractional positions and the selection clamps them later.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn pixel(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Intersection with `[0, width) x [0, height)`, or `None` when nothing overlaps.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<PixelRect> {
        let left = i64::from(self.x).max(0);
        let top = i64::from(self.y).max(0);
        let right = self.right().min(i64::from(width));
        let bottom = self.bottom().min(i64::from(height));
        if right <= left || bottom <= top {
            return None;
        }
        Some(PixelRect::new(
            i32::try_from(left).ok()?,
            i32::try_from(top).ok()?,
            u32::try_from(right - left).ok()?,
            u32::try_from(bottom - top).ok()?,
        ))
    }
}

/// Straight-alpha RGBA color as the shell and config describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

const fn opaque_alpha() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Pixel bytes in the surface's internal order: premultiplied B, G, R, A.
    pub const fn to_premultiplied_bgra(self) -> [u8; 4] {
        match self.a {
            0 => [0, 0, 0, 0],
            255 => [self.b, self.g, self.r, 255],
            a => [
                premultiply(self.b, a),
                premultiply(self.g, a),
                premultiply(self.r, a),
                a,
            ],
        }
    }

    /// Inverse of [`Color::to_premultiplied_bgra`].
    pub const fn from_premultiplied_bgra(pixel: [u8; 4]) -> Self {
        let [b, g, r, a] = pixel;
        match a {
            0 => Color::TRANSPARENT,
            255 => Color::rgb(r, g, b),
            _ => Color::new(
                unpremultiply(r, a),
                unpremultiply(g, a),
                unpremultiply(b, a),
                a,
            ),
        }
    }
}

pub(crate) const fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u16 * alpha as u16 + 127) / 255) as u8
}

pub(crate) const fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    if alpha == 0 {
        return 0;
    }
    let value = (channel as u16 * 255 + alpha as u16 / 2) / alpha as u16;
    if value > 255 {
        255
    } else {
        value as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_color_maps_to_swapped_channels() {
        assert_eq!(Color::rgb(10, 20, 30).to_premultiplied_bgra(), [30, 20, 10, 255]);
    }

    #[test]
    fn transparent_color_maps_to_zero_bytes() {
        assert_eq!(Color::new(200, 100, 50, 0).to_premultiplied_bgra(), [0, 0, 0, 0]);
    }

    #[test]
    fn half_alpha_color_is_premultiplied() {
        let pixel = Color::new(255, 0, 100, 128).to_premultiplied_bgra();
        assert_eq!(pixel, [50, 0, 128, 128]);
        let back = Color::from_premultiplied_bgra(pixel);
        assert_eq!(back.r, 255);
        assert_eq!(back.a, 128);
    }

    #[test]
    fn clip_to_trims_rect_to_bounds() {
        let rect = PixelRect::new(-4, 6, 20, 10);
        assert_eq!(rect.clip_to(10, 10), Some(PixelRect::new(0, 6, 10, 4)));
        assert_eq!(PixelRect::new(12, 0, 3, 3).clip_to(10, 10), None);
    }

    #[test]
    fn canvas_point_pixel_floors_fractional_positions() {
        assert_eq!(CanvasPoint::new(3.7, -0.2).pixel(), (3, -1));
    }
}
