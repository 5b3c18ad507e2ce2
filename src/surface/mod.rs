//! Owned premultiplied pixel buffer the canvas paints into.

mod channels;
mod view;

pub(crate) use channels::check_external_layout;
pub use channels::{bgra_from_external, external_from_bgra, swap_red_blue};
pub use view::{SurfaceView, SurfaceViewMut};

use crate::geometry::{Color, PixelRect};
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("stride {stride} is smaller than {width} pixels of {BYTES_PER_PIXEL} bytes")]
    StrideTooSmall { width: u32, stride: usize },
    #[error("buffer holds {actual} bytes, {expected} required for {width}x{height}")]
    BufferTooSmall {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// How source pixels combine with the pixels already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Replace,
    Over,
}

/// Rows of B, G, R, A bytes with premultiplied alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

const fn row_stride(width: u32) -> usize {
    width as usize * BYTES_PER_PIXEL
}

impl PixelSurface {
    /// Fully transparent surface; dimensions are clamped to at least 1.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let stride = row_stride(width);
        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut surface = Self::new(width, height);
        surface.fill(color);
        surface
    }

    /// Adopts raw stride-aligned bytes already in the internal channel order.
    pub fn from_raw(width: u32, height: u32, stride: usize, data: Vec<u8>) -> SurfaceResult<Self> {
        let width = width.max(1);
        let height = height.max(1);
        if stride < row_stride(width) {
            return Err(SurfaceError::StrideTooSmall { width, stride });
        }
        let expected = stride * height as usize;
        if data.len() < expected {
            return Err(SurfaceError::BufferTooSmall {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let mut data = data;
        data.truncate(expected);
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }

    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    pub fn view(&self) -> SurfaceView<'_> {
        SurfaceView::new(&self.data, self.width, self.height, self.stride)
    }

    pub fn view_mut(&mut self) -> SurfaceViewMut<'_> {
        SurfaceViewMut::new(&mut self.data, self.width, self.height, self.stride)
    }

    /// Reallocates the buffer for new dimensions. Previous contents are discarded,
    /// so callers re-render afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Overwrites the contents with `other`, reallocating when either dimension differs.
    pub fn copy_from(&mut self, other: &PixelSurface) {
        if self.width != other.width || self.height != other.height {
            self.resize(other.width, other.height);
        }
        if self.stride == other.stride {
            self.data.copy_from_slice(&other.data);
            return;
        }
        self.blit(other.view(), 0, 0, BlendMode::Replace);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.view().pixel(x, y)
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        self.pixel(x, y).map(Color::from_premultiplied_bgra)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, bgra: [u8; 4]) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let offset = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&bgra);
        true
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn fill(&mut self, color: Color) {
        self.fill_rect(self.bounds(), color, BlendMode::Replace);
    }

    /// Paints `color` into `rect` (clipped). Nothing outside the rect is touched.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color, mode: BlendMode) {
        let source = color.to_premultiplied_bgra();
        let mut view = self.view_mut();
        let Some(mut target) = view.sub_view_mut(rect) else {
            return;
        };
        match mode {
            BlendMode::Replace => target.for_each_pixel_mut(|pixel| pixel.copy_from_slice(&source)),
            BlendMode::Over => target.for_each_pixel_mut(|pixel| composite_over(pixel, &source)),
        }
    }

    /// Copy of the sub-rectangle clipped to the surface, or `None` when it lies outside.
    pub fn read_region(&self, x: i32, y: i32, width: u32, height: u32) -> Option<PixelSurface> {
        let source = self.view().sub_view(PixelRect::new(x, y, width, height))?;
        let mut region = PixelSurface::new(source.width(), source.height());
        region.blit(source, 0, 0, BlendMode::Replace);
        Some(region)
    }

    /// Composites `source` with its top-left at `(dst_x, dst_y)`. Pixels falling
    /// outside the surface are dropped.
    pub fn blit(&mut self, source: SurfaceView<'_>, dst_x: i32, dst_y: i32, mode: BlendMode) {
        let target_rect = PixelRect::new(dst_x, dst_y, source.width(), source.height());
        let Some(clipped) = target_rect.clip_to(self.width, self.height) else {
            return;
        };
        let skip_x = u32::try_from(clipped.x - dst_x).unwrap_or(0);
        let skip_y = u32::try_from(clipped.y - dst_y).unwrap_or(0);
        let skip_bytes = skip_x as usize * BYTES_PER_PIXEL;
        let row_bytes = clipped.width as usize * BYTES_PER_PIXEL;

        let mut view = self.view_mut();
        let Some(mut target) = view.sub_view_mut(clipped) else {
            return;
        };
        for row in 0..clipped.height {
            let src_row = &source.row(row + skip_y)[skip_bytes..skip_bytes + row_bytes];
            let dst_row = target.row_mut(row);
            match mode {
                BlendMode::Replace => dst_row.copy_from_slice(src_row),
                BlendMode::Over => {
                    for (dst, src) in dst_row
                        .chunks_exact_mut(BYTES_PER_PIXEL)
                        .zip(src_row.chunks_exact(BYTES_PER_PIXEL))
                    {
                        composite_over(dst, src);
                    }
                }
            }
        }
    }
}

/// Premultiplied source-over for one pixel.
fn composite_over(dst: &mut [u8], src: &[u8]) {
    let src_alpha = src[3];
    if src_alpha == 255 {
        dst.copy_from_slice(src);
        return;
    }
    if src_alpha == 0 && src[..3].iter().all(|channel| *channel == 0) {
        return;
    }
    let inverse = 255 - u16::from(src_alpha);
    for (d, s) in dst.iter_mut().zip(src) {
        let value = u16::from(*s) + (u16::from(*d) * inverse + 127) / 255;
        *d = value.min(255) as u8;
    }
}
