//! Library side of the switcher CLI: scripted replay and layout reports.

pub mod error;
pub mod replay;
pub mod report;

pub use error::{CliError, Result};
