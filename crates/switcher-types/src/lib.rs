//! Shared types for switcher components.
//!
//! This crate provides the data model used by switcher-core and the
//! switcher CLI. All types are serializable so sessions can be scripted
//! and replayed from JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

// ============================================================================
// Items
// ============================================================================

/// A selectable entry in the switcher (an input method engine or an app).
///
/// Items are immutable once handed to the switcher; the session only
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable identity reported when the item is committed
    pub name: String,

    /// Human readable label shown under the icon
    pub label: String,

    /// Icon reference or short textual glyph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconSource>,

    /// Sub-entries (windows) that can be previewed as thumbnails
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<WindowEntry>,
}

impl Item {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            icon: None,
            windows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, name: impl Into<String>) -> Self {
        self.icon = Some(IconSource::Named { name: name.into() });
        self
    }

    #[must_use]
    pub fn with_glyph(mut self, text: impl Into<String>) -> Self {
        self.icon = Some(IconSource::Glyph { text: text.into() });
        self
    }

    #[must_use]
    pub fn with_windows(mut self, windows: Vec<WindowEntry>) -> Self {
        self.windows = windows;
        self
    }
}

/// How an item's icon is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IconSource {
    /// Themed icon looked up by name
    Named { name: String },
    /// Short text drawn in place of an icon (e.g. "あ", "EN")
    Glyph { text: String },
}

/// A window belonging to an item, shown in the thumbnail strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Workspace the window lives on
    #[serde(default)]
    pub workspace: u32,
}

impl WindowEntry {
    pub fn new(id: impl Into<String>, workspace: u32) -> Self {
        Self {
            id: id.into(),
            title: None,
            workspace,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Opaque host handle to a live preview surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewHandle(pub u64);

// ============================================================================
// Keyboard
// ============================================================================

/// Modifier bitmask using the X11/IBus bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierMask(pub u32);

impl ModifierMask {
    pub const EMPTY: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const LOCK: Self = Self(1 << 1);
    pub const CONTROL: Self = Self(1 << 2);
    pub const MOD1: Self = Self(1 << 3);
    pub const MOD2: Self = Self(1 << 4);
    pub const MOD3: Self = Self(1 << 5);
    pub const MOD4: Self = Self(1 << 6);
    pub const MOD5: Self = Self(1 << 7);
    pub const SUPER: Self = Self(1 << 26);
    pub const HYPER: Self = Self(1 << 27);
    pub const META: Self = Self(1 << 28);

    /// Every bit a key event state may legitimately carry.
    pub const MODIFIER_MASK: Self = Self(0x5c00_1fff);

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Lowest set bit of the mask, or empty for an empty mask.
    ///
    /// Releasing this single modifier is what ends a switching session.
    #[must_use]
    pub const fn primary(self) -> Self {
        Self(self.0 & self.0.wrapping_neg())
    }
}

impl BitOr for ModifierMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModifierMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModifierMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for ModifierMask {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// X11 key symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keysym(pub u32);

impl Keysym {
    pub const SPACE: Self = Self(0x0020);
    pub const GRAVE: Self = Self(0x0060);
    pub const TAB: Self = Self(0xff09);
    pub const ISO_LEFT_TAB: Self = Self(0xfe20);
    pub const RETURN: Self = Self(0xff0d);
    pub const ESCAPE: Self = Self(0xff1b);
    pub const LEFT: Self = Self(0xff51);
    pub const RIGHT: Self = Self(0xff53);
    pub const SUPER_L: Self = Self(0xffeb);
    pub const SHIFT_L: Self = Self(0xffe1);
    pub const CONTROL_L: Self = Self(0xffe3);
    pub const ALT_L: Self = Self(0xffe9);

    /// Parse a key name (case-insensitive) into a keysym.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let sym = match lower.as_str() {
            "space" => Self::SPACE,
            "grave" | "`" => Self::GRAVE,
            "tab" => Self::TAB,
            "iso_left_tab" => Self::ISO_LEFT_TAB,
            "return" | "enter" => Self::RETURN,
            "escape" | "esc" => Self::ESCAPE,
            "left" => Self::LEFT,
            "right" => Self::RIGHT,
            _ => {
                let mut chars = lower.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                // Latin-1 keysyms coincide with their lowercase code points
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    Self(u32::from(c))
                } else {
                    return None;
                }
            }
        };
        Some(sym)
    }
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Which way a trigger moves the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A key combination that cycles the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerBinding {
    pub keysym: Keysym,
    pub modifiers: ModifierMask,
    #[serde(default)]
    pub reverse: bool,
}

impl TriggerBinding {
    #[must_use]
    pub const fn new(keysym: Keysym, modifiers: ModifierMask, reverse: bool) -> Self {
        Self {
            keysym,
            modifiers,
            reverse,
        }
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Index into a fixed-length item list that wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    /// Returns `None` for an empty list or an out-of-range index.
    #[must_use]
    pub const fn new(index: usize, len: usize) -> Option<Self> {
        if index < len {
            Some(Self { index, len })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            len: self.len,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            len: self.len,
        }
    }

    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => self.next(),
            Direction::Backward => self.previous(),
        }
    }

    /// Jump to `index`, ignoring out-of-range values.
    #[must_use]
    pub const fn with_index(self, index: usize) -> Self {
        if index < self.len {
            Self {
                index,
                len: self.len,
            }
        } else {
            self
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from two corners (x2/y2 exclusive)
    #[must_use]
    pub const fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }
}

/// Per-side lengths (padding)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sides {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub bottom: i32,
}

impl Sides {
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}
