//! Single-row layout shared by both strips.
//!
//! Coordinates of item allocations are relative to the row content origin
//! (inside the strip padding, before the scroll anchor is applied).

use tracing::debug;

use super::scroll::{ScrollDirection, ScrollRequest, ScrollState};
use switcher_types::{Rect, Sides, Size};

/// Boundary marker between two groups of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    /// Index of the first entry after the separator
    pub before: usize,
    pub width: i32,
}

/// Where the surrounding overlay ends, needed for edge-dependent sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEdge {
    /// Screen right edge minus the overlay's right padding
    pub right_limit: i32,
    /// Width a scroll-to-right keeps the highlighted item inside
    pub visible_width: i32,
}

#[derive(Debug, Clone)]
pub struct ItemRow {
    entries: Vec<Size>,
    separator: Option<Separator>,
    spacing: i32,
    square: bool,
    padding: Sides,
    allocations: Vec<Rect>,
    separator_alloc: Option<Rect>,
    clip: Rect,
    bounds: Rect,
    visible_width: i32,
    highlighted: Option<usize>,
    scroll: ScrollState,
}

impl ItemRow {
    #[must_use]
    pub fn new(spacing: i32, padding: Sides, square: bool) -> Self {
        Self {
            entries: Vec::new(),
            separator: None,
            spacing,
            square,
            padding,
            allocations: Vec::new(),
            separator_alloc: None,
            clip: Rect::default(),
            bounds: Rect::default(),
            visible_width: 0,
            highlighted: None,
            scroll: ScrollState::default(),
        }
    }

    /// Append an entry and return its index.
    pub fn add_entry(&mut self, size: Size) -> usize {
        self.entries.push(size);
        self.entries.len() - 1
    }

    pub fn set_entry_size(&mut self, index: usize, size: Size) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = size;
        }
    }

    /// Place a separator after the entries added so far.
    pub fn add_separator(&mut self, width: i32) {
        self.separator = Some(Separator {
            before: self.entries.len(),
            width,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[Size] {
        &self.entries
    }

    #[must_use]
    pub fn separator(&self) -> Option<Separator> {
        self.separator
    }

    #[must_use]
    pub fn padding(&self) -> Sides {
        self.padding
    }

    #[must_use]
    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Widest entry; for square rows heights count as widths too.
    #[must_use]
    pub fn max_child_width(&self) -> i32 {
        self.entries
            .iter()
            .map(|s| if self.square { s.width.max(s.height) } else { s.width })
            .max()
            .unwrap_or(0)
    }

    fn separator_extent(&self) -> i32 {
        self.separator.map_or(0, |s| s.width + self.spacing)
    }

    fn gap_count(&self) -> i32 {
        count(self.entries.len()).saturating_sub(1)
    }

    /// Natural width of the content, excluding strip padding.
    #[must_use]
    pub fn content_width(&self) -> i32 {
        if self.entries.is_empty() {
            return 0;
        }
        count(self.entries.len()) * self.max_child_width()
            + self.spacing * self.gap_count()
            + self.separator_extent()
    }

    #[must_use]
    pub fn content_height(&self) -> i32 {
        let max_height = self.entries.iter().map(|s| s.height).max().unwrap_or(0);
        if self.square {
            max_height.max(self.max_child_width())
        } else {
            max_height
        }
    }

    #[must_use]
    pub fn preferred_width(&self) -> i32 {
        self.content_width() + self.padding.horizontal()
    }

    #[must_use]
    pub fn preferred_height(&self) -> i32 {
        self.content_height() + self.padding.vertical()
    }

    /// Assign every entry its box inside `bounds` (the strip's screen box).
    pub fn allocate(&mut self, bounds: Rect, edge: RowEdge) {
        self.bounds = bounds;
        self.visible_width = edge.visible_width;

        let content_w = bounds.width - self.padding.horizontal();
        let content_h = bounds.height - self.padding.vertical();

        let n = count(self.entries.len());
        let mut total_spacing = self.spacing * self.gap_count();
        let separator_width = self.separator.map_or(0, |s| s.width);
        if self.separator.is_some() {
            total_spacing += self.spacing;
        }

        let mut child_w = if n == 0 {
            0
        } else {
            (content_w - total_spacing - separator_width).max(0) / n
        };

        // Pixel parity with the screen edge: full-width strips size from
        // the first entry instead of dividing the remaining width
        if bounds.right() == edge.right_limit {
            if self.square {
                child_w = content_h;
            } else if let Some(first) = self.entries.first() {
                child_w = first.width;
            }
        }

        self.allocations.clear();
        self.separator_alloc = None;
        let mut x = 0;
        for (i, entry) in self.entries.iter().enumerate() {
            if let Some(sep) = self.separator
                && sep.before == i
            {
                self.separator_alloc = Some(Rect::new(x, 0, sep.width, content_h));
                x += self.spacing + sep.width;
            }
            let y = (content_h - entry.height) / 2;
            self.allocations.push(Rect::new(x, y, child_w, entry.height));
            x += self.spacing + child_w;
        }

        self.clip = Rect::new(
            0,
            -self.padding.top,
            bounds.width - self.padding.horizontal(),
            bounds.height + self.padding.bottom,
        );
        self.scroll.natural_width = self.content_width();
        self.scroll.available_width = content_w;
    }

    /// Mark `index` highlighted and work out whether the row must scroll.
    ///
    /// The logical anchor moves to the scroll target right away; the
    /// returned request lets the caller animate towards it.
    pub fn highlight(&mut self, index: usize) -> Option<ScrollRequest> {
        let item = *self.allocations.get(index)?;
        self.highlighted = Some(index);

        let pos_x = self.padding.left + item.x - self.scroll.anchor;
        let direction = if pos_x + item.width > self.bounds.width {
            self.scroll.can_scroll_left = true;
            self.scroll.anchor = item.right() - self.visible_width;
            ScrollDirection::Right
        } else if pos_x < 0 {
            self.scroll.can_scroll_right = true;
            self.scroll.anchor = item.x;
            ScrollDirection::Left
        } else {
            return None;
        };

        debug!(
            "row scroll {:?} to anchor {} for item {}",
            direction, self.scroll.anchor, index
        );
        Some(ScrollRequest {
            direction,
            anchor: self.scroll.anchor,
        })
    }

    /// Called once a scroll animation completes.
    pub fn settle_scroll(&mut self, direction: ScrollDirection) {
        let last = self.entries.len().checked_sub(1);
        match direction {
            ScrollDirection::Left if self.highlighted == Some(0) => {
                self.scroll.can_scroll_left = false;
            }
            ScrollDirection::Right if self.highlighted.is_some() && self.highlighted == last => {
                self.scroll.can_scroll_right = false;
            }
            _ => {}
        }
    }

    /// On-screen box of entry `index`, with the scroll anchor applied.
    #[must_use]
    pub fn screen_rect(&self, index: usize) -> Option<Rect> {
        self.allocations.get(index).map(|r| {
            r.translate(
                self.bounds.x + self.padding.left - self.scroll.anchor,
                self.bounds.y + self.padding.top,
            )
        })
    }

    #[must_use]
    pub fn allocation(&self, index: usize) -> Option<Rect> {
        self.allocations.get(index).copied()
    }

    #[must_use]
    pub fn separator_allocation(&self) -> Option<Rect> {
        self.separator_alloc
    }

    #[must_use]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }
}

// Entry counts are bounded by what fits in a screen row
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn count(n: usize) -> i32 {
    n as i32
}
