use crate::geometry::PixelRect;

use super::BYTES_PER_PIXEL;

/// Read-only 2D window over stride-aligned pixel rows.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
}

/// Mutable counterpart of [`SurfaceView`].
#[derive(Debug)]
pub struct SurfaceViewMut<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

fn row_bounds(x: u32, y: u32, width: u32, stride: usize) -> (usize, usize) {
    let start = y as usize * stride + x as usize * BYTES_PER_PIXEL;
    (start, start + width as usize * BYTES_PER_PIXEL)
}

impl<'a> SurfaceView<'a> {
    pub(crate) fn new(data: &'a [u8], width: u32, height: u32, stride: usize) -> Self {
        debug_assert!(stride >= width as usize * BYTES_PER_PIXEL);
        debug_assert!(data.len() >= stride * height as usize);
        Self {
            data,
            width,
            height,
            stride,
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn row(&self, y: u32) -> &'a [u8] {
        let data: &'a [u8] = self.data;
        let (start, end) = row_bounds(0, y, self.width, self.stride);
        &data[start..end]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (start, _) = row_bounds(x, y, 1, self.stride);
        let mut pixel = [0_u8; 4];
        pixel.copy_from_slice(&self.data[start..start + BYTES_PER_PIXEL]);
        Some(pixel)
    }

    /// Narrows the view to `rect`, clipped to this view's bounds.
    pub fn sub_view(&self, rect: PixelRect) -> Option<SurfaceView<'a>> {
        let clipped = rect.clip_to(self.width, self.height)?;
        let data: &'a [u8] = self.data;
        let (start, _) = row_bounds(clipped.x as u32, clipped.y as u32, 0, self.stride);
        Some(SurfaceView {
            data: &data[start..],
            width: clipped.width,
            height: clipped.height,
            stride: self.stride,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> {
        let view = *self;
        (0..self.height).map(move |y| view.row(y))
    }
}

impl<'a> SurfaceViewMut<'a> {
    pub(crate) fn new(data: &'a mut [u8], width: u32, height: u32, stride: usize) -> Self {
        debug_assert!(stride >= width as usize * BYTES_PER_PIXEL);
        debug_assert!(data.len() >= stride * height as usize);
        Self {
            data,
            width,
            height,
            stride,
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let (start, end) = row_bounds(0, y, self.width, self.stride);
        &mut self.data[start..end]
    }

    pub fn sub_view_mut(&mut self, rect: PixelRect) -> Option<SurfaceViewMut<'_>> {
        let clipped = rect.clip_to(self.width, self.height)?;
        let (start, _) = row_bounds(clipped.x as u32, clipped.y as u32, 0, self.stride);
        Some(SurfaceViewMut {
            data: &mut self.data[start..],
            width: clipped.width,
            height: clipped.height,
            stride: self.stride,
        })
    }

    pub fn for_each_pixel_mut(&mut self, mut apply: impl FnMut(&mut [u8])) {
        for y in 0..self.height {
            for pixel in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                apply(pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_view_addresses_rows_through_stride_padding() {
        // 2x2 pixels with 4 bytes of row padding.
        let data: Vec<u8> = (0..24).collect();
        let view = SurfaceView::new(&data, 2, 2, 12);
        let sub = view.sub_view(PixelRect::new(1, 1, 5, 5)).expect("overlap");
        assert_eq!(sub.width(), 1);
        assert_eq!(sub.height(), 1);
        assert_eq!(sub.row(0), &[16, 17, 18, 19]);
        assert_eq!(view.pixel(0, 1), Some([12, 13, 14, 15]));
        assert_eq!(view.pixel(2, 0), None);
    }

    #[test]
    fn sub_view_mut_writes_only_inside_rect() {
        let mut data = vec![0_u8; 3 * 3 * 4];
        let mut view = SurfaceViewMut::new(&mut data, 3, 3, 12);
        let mut inner = view
            .sub_view_mut(PixelRect::new(1, 1, 1, 1))
            .expect("overlap");
        inner.for_each_pixel_mut(|pixel| pixel.copy_from_slice(&[9, 9, 9, 9]));
        assert_eq!(&data[16..20], &[9, 9, 9, 9]);
        assert_eq!(data.iter().filter(|byte| **byte == 9).count(), 4);
    }
}
