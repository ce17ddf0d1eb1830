//! Horizontal item strips.
//!
//! Both strips are composed around an [`ItemRow`] and expose the same
//! small capability set through [`Strip`].

mod icons;
mod row;
mod scroll;
mod thumbnails;

pub use icons::{IconSizingPolicy, IconStrip};
pub use row::{ItemRow, RowEdge, Separator};
pub use scroll::{ScrollDirection, ScrollRequest, ScrollState};
pub use thumbnails::{Thumb, ThumbnailStrip, preview_scale};

use switcher_types::{Rect, Size};

pub trait Strip {
    fn row(&self) -> &ItemRow;

    fn row_mut(&mut self) -> &mut ItemRow;

    /// Natural width including strip padding. Rows are single-line so the
    /// available height does not change it.
    fn compute_width(&self, _for_height: i32) -> i32 {
        self.row().preferred_width()
    }

    /// Natural height including strip padding for the given width.
    fn compute_height(&mut self, for_width: i32) -> i32;

    fn layout(&mut self, bounds: Rect, edge: RowEdge) {
        self.row_mut().allocate(bounds, edge);
    }

    fn highlight(&mut self, index: usize) -> Option<ScrollRequest> {
        self.row_mut().highlight(index)
    }

    fn add_entry(&mut self, size: Size) -> usize {
        self.row_mut().add_entry(size)
    }
}
