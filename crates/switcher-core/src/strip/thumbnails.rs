use tracing::{debug, trace};

use super::Strip;
use super::row::ItemRow;
use crate::config::LayoutConfig;
use crate::host::Host;
use switcher_types::{PreviewHandle, Sides, Size, WindowEntry};

/// Uniform downscale that fits a preview into `max_size` wide and
/// `available_height` tall without ever upscaling.
#[must_use]
pub fn preview_scale(natural: Size, max_size: i32, available_height: i32) -> f64 {
    let width = f64::from(natural.width.max(1));
    let height = f64::from(natural.height.max(1));
    let scale = 1.0_f64
        .min(f64::from(max_size) / width)
        .min(f64::from(available_height) / height);
    scale.max(0.0)
}

/// A live preview clone placed in the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumb {
    pub window: WindowEntry,
    pub preview: PreviewHandle,
    /// Displayed clone size after scaling
    pub size: Size,
}

/// Secondary strip listing the windows of the highlighted item.
#[derive(Debug, Clone)]
pub struct ThumbnailStrip {
    row: ItemRow,
    windows: Vec<WindowEntry>,
    thumbs: Vec<Option<Thumb>>,
    clones_added: bool,
    max_size: i32,
    label_height: i32,
    label_spacing: i32,
    item_padding: Sides,
}

impl ThumbnailStrip {
    /// Build the strip for `windows`, current workspace first.
    #[must_use]
    pub fn new(
        windows: &[WindowEntry],
        active_workspace: u32,
        layout: &LayoutConfig,
        max_size: i32,
    ) -> Self {
        let (current, others): (Vec<_>, Vec<_>) = windows
            .iter()
            .cloned()
            .partition(|w| w.workspace == active_workspace);

        let bare = Size::new(
            layout.item_padding.horizontal(),
            layout.label_height + layout.thumbnail_label_spacing + layout.item_padding.vertical(),
        );
        let separated = !current.is_empty() && !others.is_empty();
        let current_count = current.len();

        let mut ordered = current;
        ordered.extend(others);

        let mut strip = Self {
            row: ItemRow::new(layout.item_spacing, layout.strip_padding, false),
            thumbs: vec![None; ordered.len()],
            windows: ordered,
            clones_added: false,
            max_size,
            label_height: layout.label_height,
            label_spacing: layout.thumbnail_label_spacing,
            item_padding: layout.item_padding,
        };
        for i in 0..strip.windows.len() {
            if separated && i == current_count {
                strip.row.add_separator(layout.separator_width);
            }
            strip.add_entry(bare);
        }
        strip
    }

    /// Windows in display order.
    #[must_use]
    pub fn windows(&self) -> &[WindowEntry] {
        &self.windows
    }

    #[must_use]
    pub fn thumb(&self, index: usize) -> Option<&Thumb> {
        self.thumbs.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn clones_added(&self) -> bool {
        self.clones_added
    }

    /// Fetch previews and size every entry for `available_height` pixels
    /// below the strip's top edge. Only the first call has any effect.
    pub fn add_clones(&mut self, host: &dyn Host, available_height: i32) {
        if self.clones_added || self.windows.is_empty() {
            return;
        }
        self.clones_added = true;

        let strip_padding = self.row.padding();
        let total_padding = self.item_padding.horizontal()
            + self.item_padding.vertical()
            + strip_padding.horizontal()
            + strip_padding.vertical();
        let chrome = self.label_height + total_padding + self.label_spacing;
        let available = (available_height - chrome).min(self.max_size);
        let bin_extra =
            self.item_padding.vertical() + strip_padding.vertical() - self.label_spacing;
        let bin_height = self.max_size.min(available + bin_extra);
        let entry_height =
            bin_height + self.label_height + self.label_spacing + self.item_padding.vertical();

        for (i, window) in self.windows.iter().enumerate() {
            let Some(preview) = host.preview_handle(window) else {
                trace!("no preview for window {}", window.id);
                continue;
            };
            let natural = host.preview_size(preview);
            let scale = preview_scale(natural, self.max_size, available);
            let size = Size::new(scaled(natural.width, scale), scaled(natural.height, scale));

            self.row.set_entry_size(
                i,
                Size::new(size.width + self.item_padding.horizontal(), entry_height),
            );
            self.thumbs[i] = Some(Thumb {
                window: window.clone(),
                preview,
                size,
            });
        }

        debug!(
            "thumbnail clones sized for {}px (bin {}px)",
            available, bin_height
        );
    }
}

// Preview dimensions are screen sized, far below f64 precision limits
#[allow(clippy::cast_possible_truncation)]
fn scaled(length: i32, scale: f64) -> i32 {
    (f64::from(length) * scale).round() as i32
}

impl Strip for ThumbnailStrip {
    fn row(&self) -> &ItemRow {
        &self.row
    }

    fn row_mut(&mut self) -> &mut ItemRow {
        &mut self.row
    }

    fn compute_height(&mut self, _for_width: i32) -> i32 {
        self.row.preferred_height()
    }
}
