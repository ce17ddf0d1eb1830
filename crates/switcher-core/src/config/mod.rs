mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{BindingConfig, Config, LayoutConfig, ThumbnailConfig, TimingConfig};
pub use validation::warn_unknown_fields;
