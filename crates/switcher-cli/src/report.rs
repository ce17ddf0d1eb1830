//! Static layout reports for tuning the config without a display.

use serde::Serialize;

use switcher_core::config::Config;
use switcher_core::overlay::place_icon_strip;
use switcher_core::strip::{IconStrip, Strip};
use switcher_types::Rect;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub icon_size: i32,
    pub strip: Rect,
    /// Screen box of every item before any scrolling
    pub items: Vec<Rect>,
    /// Whether the row overflows and will scroll
    pub scrollable: bool,
}

/// Place an icon strip of `count` items on `screen`.
#[must_use]
pub fn icon_layout(config: &Config, screen: Rect, count: usize) -> LayoutReport {
    let layout = &config.layout;
    let mut strip = IconStrip::new(count, layout);
    let bounds = place_icon_strip(&mut strip, screen, layout.overlay_padding);

    let row = strip.row();
    LayoutReport {
        icon_size: strip.icon_size(),
        strip: bounds,
        items: (0..row.len()).filter_map(|i| row.screen_rect(i)).collect(),
        scrollable: row.scroll().needs_scroll(),
    }
}
