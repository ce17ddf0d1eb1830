//! Tests for icon strip sizing, placement and scrolling on a full screen

use super::fixtures::SCREEN;
use crate::config::LayoutConfig;
use crate::overlay::place_icon_strip;
use crate::strip::{IconStrip, ScrollDirection, ScrollRequest, Strip};
use switcher_types::Rect;

fn placed(count: usize, screen: Rect) -> (IconStrip, Rect) {
    let layout = LayoutConfig::default();
    let mut strip = IconStrip::new(count, &layout);
    let bounds = place_icon_strip(&mut strip, screen, layout.overlay_padding);
    (strip, bounds)
}

#[test]
fn test_few_items_are_centered_at_largest_size() {
    let (strip, bounds) = placed(3, SCREEN);

    assert_eq!(strip.icon_size(), 96);
    assert_eq!(bounds, Rect::new(740, 462, 440, 156));

    let row = strip.row();
    let xs: Vec<i32> = (0..3).map(|i| row.allocation(i).unwrap().x).collect();
    assert_eq!(xs, vec![0, 142, 284]);
    assert_eq!(row.allocation(1), Some(Rect::new(142, 0, 132, 132)));
    assert_eq!(row.screen_rect(0), Some(Rect::new(752, 474, 132, 132)));
    assert_eq!(row.screen_rect(1).map(|r| r.x), Some(894));
}

#[test]
fn test_placement_follows_screen_origin() {
    let (strip, bounds) = placed(3, Rect::new(1920, 0, 1920, 1080));

    assert_eq!(bounds, Rect::new(2660, 462, 440, 156));
    assert_eq!(
        strip.row().screen_rect(0),
        Some(Rect::new(2672, 474, 132, 132))
    );
}

#[test]
fn test_icon_size_shrinks_with_item_count() {
    let sizes: Vec<i32> = [2, 14, 20, 40]
        .into_iter()
        .map(|n| placed(n, SCREEN).0.icon_size())
        .collect();
    assert_eq!(sizes, vec![96, 64, 48, 22]);
}

#[test]
fn test_overflowing_strip_is_clamped_to_padding() {
    let (strip, bounds) = placed(40, SCREEN);

    assert_eq!(bounds, Rect::new(8, 499, 1904, 82));
    let row = strip.row();
    assert_eq!(row.allocation(0).map(|r| r.width), Some(58));
    assert_eq!(row.allocation(1).map(|r| r.x), Some(68));
    assert_eq!(row.clip(), Rect::new(0, -12, 1880, 94));

    let scroll = row.scroll();
    assert_eq!(scroll.natural_width, 2710);
    assert_eq!(scroll.available_width, 1880);
    assert!(scroll.needs_scroll());
    assert!(!scroll.left_fade_visible());
    assert!(scroll.right_fade_visible());
}

#[test]
fn test_stepping_right_scrolls_once_item_leaves_view() {
    let (mut strip, _) = placed(40, SCREEN);

    for i in 0..27 {
        assert_eq!(strip.highlight(i), None, "item {i} is visible");
    }
    assert_eq!(
        strip.highlight(27),
        Some(ScrollRequest {
            direction: ScrollDirection::Right,
            anchor: 14,
        })
    );
    assert_eq!(strip.row().screen_rect(27).map(|r| r.x), Some(1842));
    assert!(strip.row().scroll().left_fade_visible());
}

#[test]
fn test_wrapping_scrolls_across_whole_row() {
    let (mut strip, _) = placed(40, SCREEN);

    let request = strip.highlight(39).unwrap();
    assert_eq!(request.direction, ScrollDirection::Right);
    assert_eq!(request.anchor, 830);
    strip.row_mut().settle_scroll(ScrollDirection::Right);
    assert!(!strip.row().scroll().right_fade_visible());

    let request = strip.highlight(0).unwrap();
    assert_eq!(request.direction, ScrollDirection::Left);
    assert_eq!(request.anchor, 0);
    assert!(strip.row().scroll().right_fade_visible());
    strip.row_mut().settle_scroll(ScrollDirection::Left);
    assert!(!strip.row().scroll().left_fade_visible());
}

#[test]
fn test_settle_mid_row_keeps_both_fades() {
    let (mut strip, _) = placed(40, SCREEN);

    strip.highlight(30);
    strip.row_mut().settle_scroll(ScrollDirection::Right);
    let scroll = strip.row().scroll();
    assert!(scroll.left_fade_visible());
    assert!(scroll.right_fade_visible());
}

#[test]
fn test_compute_width_ignores_height() {
    let (strip, _) = placed(3, SCREEN);
    assert_eq!(strip.compute_width(-1), strip.compute_width(1000));
    assert_eq!(strip.compute_width(-1), 440);
}
