use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Scroll the row must perform so the highlighted item becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub direction: ScrollDirection,
    /// New horizontal anchor of the row content
    pub anchor: i32,
}

/// Horizontal scroll position and edge-fade bookkeeping for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub anchor: i32,
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    pub natural_width: i32,
    pub available_width: i32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            anchor: 0,
            can_scroll_left: false,
            can_scroll_right: true,
            natural_width: 0,
            available_width: 0,
        }
    }
}

impl ScrollState {
    #[must_use]
    pub fn needs_scroll(&self) -> bool {
        self.natural_width > self.available_width
    }

    #[must_use]
    pub fn left_fade_visible(&self) -> bool {
        self.needs_scroll() && self.can_scroll_left
    }

    #[must_use]
    pub fn right_fade_visible(&self) -> bool {
        self.needs_scroll() && self.can_scroll_right
    }
}
