use tracing::debug;

use super::Strip;
use super::row::ItemRow;
use crate::config::LayoutConfig;
use switcher_types::{Sides, Size};

pub const DEFAULT_ICON_SIZES: [i32; 5] = [96, 64, 48, 32, 22];

/// Picks one icon size for the whole strip from a descending list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSizingPolicy {
    sizes: Vec<i32>,
}

impl Default for IconSizingPolicy {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_ICON_SIZES.to_vec(),
        }
    }
}

impl IconSizingPolicy {
    /// An empty list falls back to the default sizes.
    #[must_use]
    pub fn new(sizes: Vec<i32>) -> Self {
        if sizes.is_empty() {
            return Self::default();
        }
        Self { sizes }
    }

    #[must_use]
    pub fn sizes(&self) -> &[i32] {
        &self.sizes
    }

    #[must_use]
    pub fn largest(&self) -> i32 {
        self.sizes.first().copied().unwrap_or(DEFAULT_ICON_SIZES[0])
    }

    #[must_use]
    pub fn smallest(&self) -> i32 {
        self.sizes
            .last()
            .copied()
            .unwrap_or(DEFAULT_ICON_SIZES[DEFAULT_ICON_SIZES.len() - 1])
    }

    /// Largest size where `size * count + spacing * (count - 1)` fits.
    #[must_use]
    pub fn choose(&self, count: usize, spacing: i32, available: i32) -> i32 {
        let gaps = i32::try_from(count.saturating_sub(1)).unwrap_or(i32::MAX);
        self.choose_for_row(count, spacing.saturating_mul(gaps), 0, available)
    }

    /// Like [`choose`](Self::choose) but each entry also carries `chrome`
    /// pixels (label, padding, border) on top of the icon itself.
    #[must_use]
    pub fn choose_for_row(
        &self,
        count: usize,
        total_spacing: i32,
        chrome: i32,
        available: i32,
    ) -> i32 {
        if count <= 1 {
            return self.largest();
        }
        let n = i32::try_from(count).unwrap_or(i32::MAX);
        self.sizes
            .iter()
            .copied()
            .find(|size| {
                (size + chrome)
                    .saturating_mul(n)
                    .saturating_add(total_spacing)
                    <= available
            })
            .unwrap_or_else(|| self.smallest())
    }
}

/// The main strip: one square box per item with an icon and a label.
#[derive(Debug, Clone)]
pub struct IconStrip {
    row: ItemRow,
    policy: IconSizingPolicy,
    item_padding: Sides,
    item_border: i32,
    label_height: i32,
    icon_size: i32,
}

impl IconStrip {
    #[must_use]
    pub fn new(count: usize, layout: &LayoutConfig) -> Self {
        let mut strip = Self {
            row: ItemRow::new(layout.item_spacing, layout.strip_padding, true),
            policy: IconSizingPolicy::new(layout.icon_sizes.clone()),
            item_padding: layout.item_padding,
            item_border: layout.item_border,
            label_height: layout.label_height,
            icon_size: 0,
        };
        // Sized by the first compute_height
        for _ in 0..count {
            strip.add_entry(Size::default());
        }
        strip
    }

    /// Size of the icon inside every item box.
    #[must_use]
    pub fn icon_size(&self) -> i32 {
        self.icon_size
    }

    #[must_use]
    pub fn policy(&self) -> &IconSizingPolicy {
        &self.policy
    }

    /// Vertical space around the icon: label plus box padding and border.
    fn chrome(&self) -> i32 {
        self.label_height + self.item_padding.horizontal() + 2 * self.item_border
    }
}

impl Strip for IconStrip {
    fn row(&self) -> &ItemRow {
        &self.row
    }

    fn row_mut(&mut self) -> &mut ItemRow {
        &mut self.row
    }

    fn compute_height(&mut self, for_width: i32) -> i32 {
        let available = for_width - self.row.padding().horizontal();
        let gaps = i32::try_from(self.row.len().saturating_sub(1)).unwrap_or(0);
        let mut total_spacing = self.row.spacing() * gaps;
        if let Some(sep) = self.row.separator() {
            total_spacing += sep.width + self.row.spacing();
        }

        let chrome = self.chrome();
        let size = self
            .policy
            .choose_for_row(self.row.len(), total_spacing, chrome, available);
        if size != self.icon_size {
            debug!("icon size {} for {} items", size, self.row.len());
        }
        self.icon_size = size;

        let entry = Size::new(
            size + self.item_padding.horizontal() + 2 * self.item_border,
            size + chrome,
        );
        for i in 0..self.row.len() {
            self.row.set_entry_size(i, entry);
        }
        self.row.preferred_height()
    }
}
