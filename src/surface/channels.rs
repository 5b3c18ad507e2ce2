use image::{Rgba, RgbaImage};

use super::{PixelSurface, SurfaceError, SurfaceResult, SurfaceView, BYTES_PER_PIXEL};
use crate::geometry::{premultiply, unpremultiply};

const RGB_BYTES_PER_PIXEL: usize = 3;

/// Exchanges the first and third byte of every 4-byte pixel in place.
pub fn swap_red_blue(pixels: &mut [u8]) {
    for pixel in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.swap(0, 2);
    }
}

/// Packs `view` into tightly strided R, G, B, A rows for the clipboard boundary.
pub fn external_from_bgra(view: SurfaceView<'_>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(view.width() as usize * view.height() as usize * 4);
    for row in view.rows() {
        bytes.extend_from_slice(row);
    }
    swap_red_blue(&mut bytes);
    bytes
}

/// Checks that `len` bytes hold `height` rows of `width` pixels at `stride`.
pub(crate) fn check_external_layout(
    len: usize,
    width: u32,
    height: u32,
    stride: usize,
    channels: usize,
) -> SurfaceResult<()> {
    let row_len = width as usize * channels;
    if stride < row_len {
        return Err(SurfaceError::StrideTooSmall { width, stride });
    }
    let expected = match height {
        0 => 0,
        rows => stride * (rows as usize - 1) + row_len,
    };
    if len < expected {
        return Err(SurfaceError::BufferTooSmall {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Builds a surface from externally ordered R, G, B(, A) rows. Three-channel
/// input gets full opacity.
pub fn bgra_from_external(
    bytes: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    has_alpha: bool,
) -> SurfaceResult<PixelSurface> {
    let channels = if has_alpha {
        BYTES_PER_PIXEL
    } else {
        RGB_BYTES_PER_PIXEL
    };
    let width = width.max(1);
    let height = height.max(1);
    check_external_layout(bytes.len(), width, height, stride, channels)?;
    let row_len = width as usize * channels;

    let mut surface = PixelSurface::new(width, height);
    let mut view = surface.view_mut();
    for y in 0..height {
        let offset = y as usize * stride;
        let src_row = &bytes[offset..offset + row_len];
        let dst_row = view.row_mut(y);
        for (src, dst) in src_row
            .chunks_exact(channels)
            .zip(dst_row.chunks_exact_mut(BYTES_PER_PIXEL))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = if has_alpha { src[3] } else { 255 };
        }
    }
    Ok(surface)
}

impl PixelSurface {
    /// Straight-alpha RGBA copy for codecs owned by the shell.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let view = self.view();
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let [b, g, r, a] = view.pixel(x, y).unwrap_or([0; 4]);
            Rgba([
                unpremultiply(r, a),
                unpremultiply(g, a),
                unpremultiply(b, a),
                a,
            ])
        })
    }

    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let mut surface = PixelSurface::new(image.width(), image.height());
        let mut view = surface.view_mut();
        for (y, row) in image.rows().enumerate() {
            let dst_row = view.row_mut(y as u32);
            for (pixel, dst) in row.zip(dst_row.chunks_exact_mut(BYTES_PER_PIXEL)) {
                let [r, g, b, a] = pixel.0;
                dst.copy_from_slice(&[
                    premultiply(b, a),
                    premultiply(g, a),
                    premultiply(r, a),
                    a,
                ]);
            }
        }
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_red_blue_exchanges_outer_channels_only() {
        let mut bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        swap_red_blue(&mut bytes);
        assert_eq!(bytes, [3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn external_from_bgra_drops_stride_padding_and_swaps() {
        let surface =
            PixelSurface::from_raw(1, 2, 8, vec![10, 20, 30, 40, 0, 0, 0, 0, 1, 2, 3, 4, 9, 9, 9, 9])
                .expect("valid raw surface");
        let bytes = external_from_bgra(surface.view());
        assert_eq!(bytes, vec![30, 20, 10, 40, 3, 2, 1, 4]);
    }

    #[test]
    fn bgra_from_external_synthesizes_alpha_for_rgb_rows() {
        // Two RGB pixels per row, padded to a stride of 8.
        let bytes = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12];
        let surface = bgra_from_external(&bytes, 2, 2, 8, false).expect("rgb rows");
        assert_eq!(surface.pixel(0, 0), Some([3, 2, 1, 255]));
        assert_eq!(surface.pixel(1, 0), Some([6, 5, 4, 255]));
        assert_eq!(surface.pixel(1, 1), Some([12, 11, 10, 255]));
    }

    #[test]
    fn bgra_from_external_keeps_alpha_for_rgba_rows() {
        let bytes = [1, 2, 3, 4];
        let surface = bgra_from_external(&bytes, 1, 1, 4, true).expect("rgba row");
        assert_eq!(surface.pixel(0, 0), Some([3, 2, 1, 4]));
    }

    #[test]
    fn bgra_from_external_rejects_truncated_input() {
        let err = bgra_from_external(&[0; 5], 2, 1, 4, true).expect_err("too short");
        assert!(matches!(err, SurfaceError::StrideTooSmall { .. }));
        let err = bgra_from_external(&[0; 5], 2, 1, 6, false).expect_err("too short");
        assert!(matches!(err, SurfaceError::BufferTooSmall { expected: 6, .. }));
    }

    #[test]
    fn rgba_image_conversion_round_trips_opaque_pixels() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        let surface = PixelSurface::from_rgba_image(&image);
        assert_eq!(surface.pixel(0, 0), Some([30, 20, 10, 255]));
        assert_eq!(surface.to_rgba_image(), image);
    }
}
