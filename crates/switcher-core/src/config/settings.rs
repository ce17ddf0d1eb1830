use crate::keys::binding_from_shortcut;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use switcher_types::{ModifierMask, Sides, TriggerBinding};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,

    #[serde(default = "default_bindings")]
    pub bindings: Vec<BindingConfig>,

    /// Modifier bits never considered when matching bindings
    #[serde(default = "default_ignored_modifiers")]
    pub ignored_modifiers: ModifierMask,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            layout: LayoutConfig::default(),
            thumbnails: ThumbnailConfig::default(),
            bindings: default_bindings(),
            ignored_modifiers: default_ignored_modifiers(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values serde cannot: icon sizes, lengths and shortcuts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let sizes = &self.layout.icon_sizes;
        if sizes.is_empty() {
            return Err(Error::Config("layout.iconSizes is empty".to_string()));
        }
        if sizes.iter().any(|&s| s <= 0) {
            return Err(Error::Config(
                "layout.iconSizes must be positive".to_string(),
            ));
        }
        if sizes.windows(2).any(|w| w[0] <= w[1]) {
            return Err(Error::Config(
                "layout.iconSizes must be strictly descending".to_string(),
            ));
        }
        if self.layout.item_spacing < 0 || self.layout.separator_width < 0 {
            return Err(Error::Config(
                "layout spacing and separator width must not be negative".to_string(),
            ));
        }
        if self.thumbnails.max_size <= 0 {
            return Err(Error::Config(
                "thumbnails.maxSize must be positive".to_string(),
            ));
        }
        if self.bindings.is_empty() {
            return Err(Error::Config("no trigger bindings".to_string()));
        }
        self.trigger_bindings()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(())
    }

    /// Parse every configured shortcut.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShortcut`] for the first unparseable entry.
    pub fn trigger_bindings(&self) -> Result<Vec<TriggerBinding>> {
        self.bindings
            .iter()
            .map(|b| binding_from_shortcut(&b.shortcut, b.reverse))
            .collect()
    }
}

/// Delays and animation durations, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingConfig {
    /// Transparent period before the overlay becomes visible
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: u64,

    /// Hover is ignored this long after opening or a keyboard step
    #[serde(default = "default_hover_disable")]
    pub hover_disable_ms: u64,

    /// Hover dwell needed to switch items while thumbnails are shown
    #[serde(default = "default_hover_enter_delay")]
    pub hover_enter_delay_ms: u64,

    #[serde(default = "default_thumbnail_delay")]
    pub thumbnail_delay_ms: u64,

    #[serde(default = "default_scroll")]
    pub scroll_ms: u64,

    #[serde(default = "default_fade_out")]
    pub fade_out_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay(),
            hover_disable_ms: default_hover_disable(),
            hover_enter_delay_ms: default_hover_enter_delay(),
            thumbnail_delay_ms: default_thumbnail_delay(),
            scroll_ms: default_scroll(),
            fade_out_ms: default_fade_out(),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    #[must_use]
    pub fn hover_disable(&self) -> Duration {
        Duration::from_millis(self.hover_disable_ms)
    }

    #[must_use]
    pub fn hover_enter_delay(&self) -> Duration {
        Duration::from_millis(self.hover_enter_delay_ms)
    }

    #[must_use]
    pub fn thumbnail_delay(&self) -> Duration {
        Duration::from_millis(self.thumbnail_delay_ms)
    }

    #[must_use]
    pub fn scroll(&self) -> Duration {
        Duration::from_millis(self.scroll_ms)
    }

    #[must_use]
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

/// Geometry of the overlay, strips and item boxes, in pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Candidate icon sizes, largest first
    #[serde(default = "default_icon_sizes")]
    pub icon_sizes: Vec<i32>,

    #[serde(default = "default_item_spacing")]
    pub item_spacing: i32,

    #[serde(default = "default_separator_width")]
    pub separator_width: i32,

    #[serde(default = "default_overlay_padding")]
    pub overlay_padding: Sides,

    #[serde(default = "default_strip_padding")]
    pub strip_padding: Sides,

    #[serde(default = "default_item_padding")]
    pub item_padding: Sides,

    #[serde(default = "default_item_border")]
    pub item_border: i32,

    #[serde(default = "default_label_height")]
    pub label_height: i32,

    /// Gap between a thumbnail and its title
    #[serde(default = "default_thumbnail_label_spacing")]
    pub thumbnail_label_spacing: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            icon_sizes: default_icon_sizes(),
            item_spacing: default_item_spacing(),
            separator_width: default_separator_width(),
            overlay_padding: default_overlay_padding(),
            strip_padding: default_strip_padding(),
            item_padding: default_item_padding(),
            item_border: default_item_border(),
            label_height: default_label_height(),
            thumbnail_label_spacing: default_thumbnail_label_spacing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Largest dimension a preview clone may take
    #[serde(default = "default_thumbnail_max")]
    pub max_size: i32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: default_thumbnail_max(),
        }
    }
}

/// A trigger shortcut as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingConfig {
    pub shortcut: String,

    #[serde(default)]
    pub reverse: bool,
}

fn default_bindings() -> Vec<BindingConfig> {
    vec![
        BindingConfig {
            shortcut: "Super+space".to_string(),
            reverse: false,
        },
        BindingConfig {
            shortcut: "Super+Shift+space".to_string(),
            reverse: true,
        },
    ]
}

fn default_ignored_modifiers() -> ModifierMask {
    ModifierMask::LOCK | ModifierMask::MOD2
}

fn default_reveal_delay() -> u64 {
    150
}

fn default_hover_disable() -> u64 {
    500
}

fn default_hover_enter_delay() -> u64 {
    200
}

fn default_thumbnail_delay() -> u64 {
    500
}

fn default_scroll() -> u64 {
    100
}

fn default_fade_out() -> u64 {
    100
}

fn default_icon_sizes() -> Vec<i32> {
    vec![96, 64, 48, 32, 22]
}

fn default_item_spacing() -> i32 {
    10
}

fn default_separator_width() -> i32 {
    2
}

fn default_overlay_padding() -> Sides {
    Sides::uniform(8)
}

fn default_strip_padding() -> Sides {
    Sides::uniform(12)
}

fn default_item_padding() -> Sides {
    Sides::uniform(6)
}

fn default_item_border() -> i32 {
    2
}

fn default_label_height() -> i32 {
    20
}

fn default_thumbnail_label_spacing() -> i32 {
    4
}

fn default_true() -> bool {
    true
}

fn default_thumbnail_max() -> i32 {
    256
}
