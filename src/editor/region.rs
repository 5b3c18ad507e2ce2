use super::{CanvasController, CanvasEvent};
use crate::clipboard::{ClipboardBackend, ClipboardImage, ClipboardResult};
use crate::geometry::PixelRect;
use crate::selection::Selection;
use crate::surface::BlendMode;

impl<C: ClipboardBackend> CanvasController<C> {
    pub fn has_selection(&self) -> bool {
        self.state.selection().is_active()
    }

    /// Normalized selection against the committed surface.
    pub fn selection_rect(&self) -> Option<PixelRect> {
        let (width, height) = self.state.surface.dimensions();
        self.state.selection().rect(width, height)
    }

    pub fn select_all(&mut self) {
        let (width, height) = self.state.surface.dimensions();
        self.state.set_selection(Selection::covering(width, height));
        self.state.push_event(CanvasEvent::RepaintRequested);
    }

    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
        self.state.push_event(CanvasEvent::RepaintRequested);
    }

    /// Empties the overlay, dropping any selection drawn on it.
    pub fn clear_overlay(&mut self) {
        self.state.clear_overlay();
        self.state.push_event(CanvasEvent::RepaintRequested);
    }

    /// Area a region operation acts on; `None` when the selection has no area.
    fn target_rect(&self) -> Option<PixelRect> {
        match self.state.selection().get() {
            Some(_) => self.selection_rect(),
            None => Some(self.state.surface.bounds()),
        }
    }

    /// Puts the selection, or the whole surface, on the clipboard. A cut also
    /// deletes the region once the clipboard accepted it.
    pub fn copy(&mut self, cut: bool) -> ClipboardResult<bool> {
        let Some(rect) = self.target_rect() else {
            tracing::debug!("copy skipped: selection is empty");
            return Ok(false);
        };
        let Some(view) = self.state.surface.view().sub_view(rect) else {
            return Ok(false);
        };
        self.clipboard.set_image(ClipboardImage::from_surface_view(view))?;
        tracing::debug!(?rect, cut, "copied region to clipboard");
        if cut {
            self.delete();
        }
        Ok(true)
    }

    pub fn cut(&mut self) -> ClipboardResult<bool> {
        self.copy(true)
    }

    /// Fills the selection, or the whole surface, with the secondary colour.
    /// The fill replaces pixels, so a transparent secondary leaves exact zeros.
    pub fn delete(&mut self) -> bool {
        let Some(rect) = self.target_rect() else {
            return false;
        };
        self.record_snapshot();
        let fill = self.state.secondary();
        self.state.surface.fill_rect(rect, fill, BlendMode::Replace);
        self.refresh();
        true
    }

    /// Pastes the clipboard image at the origin, growing the canvas to fit it.
    /// An empty clipboard is not an error.
    pub fn paste(&mut self) -> ClipboardResult<bool> {
        let Some(image) = self.clipboard.get_image()? else {
            tracing::debug!("paste skipped: clipboard holds no image");
            return Ok(false);
        };
        let pasted = image.to_surface()?;
        self.record_snapshot();

        let (width, height) = self.state.canvas_size();
        self.state
            .set_canvas_size(width.max(pasted.width()), height.max(pasted.height()));
        self.print();
        self.state
            .surface
            .blit(pasted.view(), 0, 0, BlendMode::Over);
        self.refresh();
        Ok(true)
    }

    /// Shrinks the surface to the selection.
    pub fn crop(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        let Some(rect) = self.selection_rect() else {
            tracing::debug!("crop skipped: selection is empty");
            return false;
        };
        let Some(cropped) = self
            .state
            .surface
            .read_region(rect.x, rect.y, rect.width, rect.height)
        else {
            return false;
        };
        self.record_snapshot();
        self.state.surface = cropped;
        self.state.set_canvas_size(rect.width, rect.height);
        self.print();
        self.refresh();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::clipboard::{ClipboardBackend, MemoryClipboard};
    use crate::config::CanvasConfig;
    use crate::editor::CanvasController;
    use crate::geometry::{CanvasPoint, Color, PixelRect};
    use crate::selection::Selection;
    use crate::surface::PixelSurface;

    fn controller(width: u32, height: u32) -> CanvasController<MemoryClipboard> {
        CanvasController::new(
            CanvasConfig {
                initial_width: width,
                initial_height: height,
                ..CanvasConfig::default()
            },
            MemoryClipboard::new(),
        )
    }

    fn select(canvas: &mut CanvasController<MemoryClipboard>, x0: f64, y0: f64, x1: f64, y1: f64) {
        canvas
            .state
            .set_selection(Selection::new(CanvasPoint::new(x0, y0), CanvasPoint::new(x1, y1)));
    }

    #[test]
    fn copy_without_selection_takes_whole_surface() {
        let mut canvas = controller(3, 2);
        assert!(canvas.copy(false).expect("memory clipboard"));
        let image = canvas.clipboard().take().expect("image copied");
        assert_eq!((image.width, image.height, image.stride), (3, 2, 12));
        assert!(image.bytes.iter().all(|byte| *byte == 255));
    }

    #[test]
    fn copy_with_empty_selection_is_a_no_op() {
        let mut canvas = controller(5, 5);
        select(&mut canvas, 2.0, 1.0, 2.0, 4.0);
        assert!(!canvas.copy(false).expect("memory clipboard"));
        assert!(!canvas.clipboard().has_image());
    }

    #[test]
    fn cut_copies_then_clears_region() {
        let mut canvas = controller(6, 6);
        canvas.load_image(PixelSurface::filled(6, 6, Color::rgb(200, 0, 0)));
        canvas.set_secondary(Color::TRANSPARENT);
        select(&mut canvas, 1.0, 1.0, 3.0, 4.0);

        assert!(canvas.cut().expect("memory clipboard"));
        let image = canvas.clipboard().get_image().expect("memory").expect("copied");
        assert_eq!((image.width, image.height), (2, 3));
        assert_eq!(&image.bytes[..4], &[200, 0, 0, 255]);
        assert_eq!(canvas.image().pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(canvas.image().pixel(3, 1), Some([0, 0, 200, 255]));
        assert!(canvas.has_undo());
    }

    #[test]
    fn delete_without_selection_zeroes_whole_surface_with_transparent_fill() {
        let mut canvas = controller(5, 3);
        canvas.load_image(PixelSurface::filled(5, 3, Color::rgb(17, 34, 51)));
        canvas.set_secondary(Color::TRANSPARENT);
        assert!(!canvas.has_selection());

        assert!(canvas.delete());
        assert!(canvas.image().data().iter().all(|byte| *byte == 0));
        assert!(canvas.has_undo());
    }

    #[test]
    fn opposite_corner_orderings_copy_and_delete_the_same_region() {
        let mut source = PixelSurface::filled(8, 6, Color::WHITE);
        for x in 0..8 {
            for y in 0..6 {
                source.set_pixel(x, y, [x as u8 * 20, y as u8 * 30, 7, 255]);
            }
        }
        let run = |x0: f64, y0: f64, x1: f64, y1: f64| {
            let mut canvas = controller(8, 6);
            canvas.load_image(source.clone());
            canvas.set_secondary(Color::TRANSPARENT);
            select(&mut canvas, x0, y0, x1, y1);
            assert!(canvas.cut().expect("memory clipboard"));
            let copied = canvas.clipboard().take().expect("image copied");
            (copied, canvas.image().clone())
        };

        let forward = run(1.0, 2.0, 6.0, 5.0);
        assert_eq!((forward.0.width, forward.0.height), (5, 3));
        assert_eq!(run(6.0, 5.0, 1.0, 2.0), forward);
        assert_eq!(run(1.0, 5.0, 6.0, 2.0), forward);
        assert_eq!(run(6.0, 2.0, 1.0, 5.0), forward);
    }

    #[test]
    fn paste_grows_canvas_and_fills_new_area() {
        let mut canvas = controller(2, 2);
        canvas.set_secondary(Color::rgb(0, 0, 90));
        let source = PixelSurface::filled(4, 1, Color::rgb(1, 2, 3));
        canvas
            .clipboard()
            .set_image(crate::clipboard::ClipboardImage::from_surface_view(source.view()))
            .expect("memory clipboard");

        assert!(canvas.paste().expect("memory clipboard"));
        assert_eq!(canvas.canvas_size(), (4, 2));
        assert_eq!(canvas.image().color_at(3, 0), Some(Color::rgb(1, 2, 3)));
        assert_eq!(canvas.image().color_at(3, 1), Some(Color::rgb(0, 0, 90)));
        assert_eq!(canvas.image().color_at(0, 1), Some(Color::WHITE));
    }

    #[test]
    fn crop_requires_a_selection() {
        let mut canvas = controller(4, 4);
        assert!(!canvas.crop());
        assert!(!canvas.has_undo());
    }

    #[test]
    fn crop_keeps_selected_pixels_and_clears_selection() {
        let mut canvas = controller(8, 8);
        let mut image = PixelSurface::filled(8, 8, Color::WHITE);
        image.set_pixel(5, 2, Color::BLACK.to_premultiplied_bgra());
        canvas.load_image(image);
        select(&mut canvas, 7.0, 6.0, 4.0, 1.0);

        assert!(canvas.crop());
        assert_eq!(canvas.image().dimensions(), (3, 5));
        assert_eq!(canvas.image().color_at(1, 1), Some(Color::BLACK));
        assert!(!canvas.has_selection());
        assert_eq!(canvas.selection_rect(), None::<PixelRect>);
    }
}
