//! Placement of the strips on the overlay.
//!
//! The overlay covers the whole screen. The icon strip is centered and
//! clamped to the overlay padding; the thumbnail strip hangs below it,
//! centered under the highlighted icon.

use serde::Serialize;

use crate::host::Host;
use crate::strip::{IconStrip, RowEdge, Strip, ThumbnailStrip};
use switcher_types::{Rect, Sides};

/// Screen boxes of the visible strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OverlayLayout {
    pub strip: Rect,
    pub thumbnails: Option<Rect>,
}

fn row_edge(screen: Rect, padding: Sides, strip_padding: Sides) -> RowEdge {
    RowEdge {
        right_limit: screen.right() - padding.right,
        visible_width: screen.width - padding.horizontal() - strip_padding.horizontal(),
    }
}

/// Size the icon strip for the screen width, center it, and lay it out.
pub fn place_icon_strip(strip: &mut IconStrip, screen: Rect, padding: Sides) -> Rect {
    let height = strip.compute_height(screen.width - padding.horizontal());
    let width = strip.compute_width(height);

    let x1 = (screen.x + padding.left).max(screen.x + (screen.width - width).div_euclid(2));
    let x2 = (screen.right() - padding.right).min(x1 + width);
    let y1 = screen.y + (screen.height - height).div_euclid(2);
    let bounds = Rect::from_corners(x1, y1, x2, y1 + height);

    let edge = row_edge(screen, padding, strip.row().padding());
    strip.layout(bounds, edge);
    bounds
}

/// Materialize the previews and place the thumbnail strip `spacing` below
/// the icon strip, centered under `icon`.
pub fn place_thumbnails(
    strip: &mut ThumbnailStrip,
    host: &dyn Host,
    icon: Rect,
    strip_bottom: i32,
    screen: Rect,
    padding: Sides,
    spacing: i32,
) -> Rect {
    let y1 = strip_bottom + spacing;
    strip.add_clones(host, screen.bottom() - padding.bottom - y1);

    let width = strip.compute_width(-1);
    let height = strip.compute_height(width);

    let min_x = screen.x + padding.left;
    let mut x1 = min_x.max((2 * icon.x + icon.width - width).div_euclid(2));
    let limit = screen.right() - padding.horizontal();
    if x1 + width > limit {
        let offset = x1 + width - limit;
        x1 = min_x.max(x1 - offset - padding.horizontal());
    }
    let x2 = (x1 + width).min(screen.right() - padding.right);
    let bounds = Rect::from_corners(x1, y1, x2, y1 + height);

    let edge = row_edge(screen, padding, strip.row().padding());
    strip.layout(bounds, edge);
    bounds
}
