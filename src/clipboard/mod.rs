//! Clipboard boundary. Images crossing it use R, G, B(, A) byte order.

use std::cell::RefCell;

use thiserror::Error;

use crate::surface::{bgra_from_external, external_from_bgra, PixelSurface, SurfaceError, SurfaceView};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("failed to set clipboard image: {reason}")]
    SetImage { reason: String },
    #[error("failed to read clipboard image: {reason}")]
    GetImage { reason: String },
    #[error("clipboard image has an invalid layout: {source}")]
    InvalidImage {
        #[source]
        source: SurfaceError,
    },
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

/// Image as exchanged with other applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub has_alpha: bool,
}

impl ClipboardImage {
    /// Converts a region of the surface, swapping red and blue.
    pub fn from_surface_view(view: SurfaceView<'_>) -> Self {
        let width = view.width();
        let height = view.height();
        Self {
            bytes: external_from_bgra(view),
            width,
            height,
            stride: width as usize * 4,
            has_alpha: true,
        }
    }

    /// Converts into the surface's channel order, synthesizing opacity for RGB data.
    pub fn to_surface(&self) -> ClipboardResult<PixelSurface> {
        bgra_from_external(
            &self.bytes,
            self.width,
            self.height,
            self.stride,
            self.has_alpha,
        )
        .map_err(|source| ClipboardError::InvalidImage { source })
    }
}

/// External clipboard collaborator. `get_image` may block until the owning
/// application answers.
pub trait ClipboardBackend {
    fn set_image(&self, image: ClipboardImage) -> ClipboardResult<()>;
    fn get_image(&self) -> ClipboardResult<Option<ClipboardImage>>;
}

/// In-process clipboard, used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    image: RefCell<Option<ClipboardImage>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(image: ClipboardImage) -> Self {
        Self {
            image: RefCell::new(Some(image)),
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.borrow().is_some()
    }

    pub fn take(&self) -> Option<ClipboardImage> {
        self.image.borrow_mut().take()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn set_image(&self, image: ClipboardImage) -> ClipboardResult<()> {
        *self.image.borrow_mut() = Some(image);
        Ok(())
    }

    fn get_image(&self) -> ClipboardResult<Option<ClipboardImage>> {
        Ok(self.image.borrow().clone())
    }
}

#[cfg(feature = "system-clipboard")]
mod system {
    use std::borrow::Cow;

    use super::{ClipboardBackend, ClipboardError, ClipboardImage, ClipboardResult};
    use crate::surface::check_external_layout;

    /// OS clipboard through `arboard`, which speaks tightly packed RGBA.
    #[derive(Debug, Default)]
    pub struct SystemClipboard;

    fn open() -> ClipboardResult<arboard::Clipboard> {
        arboard::Clipboard::new().map_err(|err| ClipboardError::Unavailable {
            reason: err.to_string(),
        })
    }

    fn packed_rows(image: &ClipboardImage) -> ClipboardResult<Cow<'_, [u8]>> {
        let channels = if image.has_alpha { 4 } else { 3 };
        check_external_layout(
            image.bytes.len(),
            image.width,
            image.height,
            image.stride,
            channels,
        )
        .map_err(|source| ClipboardError::InvalidImage { source })?;

        let row_len = image.width as usize * 4;
        if image.has_alpha && image.stride == row_len {
            return Ok(Cow::Borrowed(&image.bytes));
        }
        let mut packed = Vec::with_capacity(row_len * image.height as usize);
        for y in 0..image.height as usize {
            let offset = y * image.stride;
            let row = &image.bytes[offset..offset + image.width as usize * channels];
            for pixel in row.chunks_exact(channels) {
                packed.extend_from_slice(&pixel[..3]);
                packed.push(if image.has_alpha { pixel[3] } else { 255 });
            }
        }
        Ok(Cow::Owned(packed))
    }

    impl ClipboardBackend for SystemClipboard {
        fn set_image(&self, image: ClipboardImage) -> ClipboardResult<()> {
            let data = arboard::ImageData {
                width: image.width as usize,
                height: image.height as usize,
                bytes: packed_rows(&image)?,
            };
            open()?
                .set_image(data)
                .map_err(|err| ClipboardError::SetImage {
                    reason: err.to_string(),
                })
        }

        fn get_image(&self) -> ClipboardResult<Option<ClipboardImage>> {
            match open()?.get_image() {
                Ok(data) => Ok(Some(ClipboardImage {
                    width: data.width as u32,
                    height: data.height as u32,
                    stride: data.width * 4,
                    has_alpha: true,
                    bytes: data.bytes.into_owned(),
                })),
                Err(arboard::Error::ContentNotAvailable) => Ok(None),
                Err(err) => Err(ClipboardError::GetImage {
                    reason: err.to_string(),
                }),
            }
        }
    }

}

#[cfg(feature = "system-clipboard")]
pub use system::SystemClipboard;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;

    #[test]
    fn from_surface_view_swaps_to_external_order() {
        let surface = PixelSurface::filled(2, 1, Color::rgb(10, 20, 30));
        let image = ClipboardImage::from_surface_view(surface.view());
        assert_eq!(image.bytes, vec![10, 20, 30, 255, 10, 20, 30, 255]);
        assert_eq!(image.stride, 8);
        assert!(image.has_alpha);
    }

    #[test]
    fn to_surface_restores_internal_order() {
        let surface = PixelSurface::filled(3, 2, Color::rgb(1, 2, 3));
        let image = ClipboardImage::from_surface_view(surface.view());
        assert_eq!(image.to_surface().expect("valid layout"), surface);
    }

    #[test]
    fn to_surface_reports_invalid_layout() {
        let image = ClipboardImage {
            bytes: vec![0; 3],
            width: 2,
            height: 2,
            stride: 8,
            has_alpha: true,
        };
        let err = image.to_surface().expect_err("buffer too short");
        assert!(format!("{err}").contains("invalid layout"));
    }

    #[test]
    fn memory_clipboard_stores_last_image() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.get_image().expect("memory clipboard").is_none());
        let image = ClipboardImage {
            bytes: vec![1, 2, 3],
            width: 1,
            height: 1,
            stride: 3,
            has_alpha: false,
        };
        clipboard.set_image(image.clone()).expect("memory clipboard");
        assert!(clipboard.has_image());
        assert_eq!(clipboard.get_image().expect("memory clipboard"), Some(image));
    }
}
