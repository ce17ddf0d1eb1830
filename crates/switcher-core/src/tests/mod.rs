//! Test module for switcher-core
//!
//! Scenario tests for:
//! - Session lifecycle (grab, reveal, commit, cancel, fade-out)
//! - Keyboard, wheel, hover and click selection
//! - Icon strip sizing, placement and scrolling
//! - Thumbnail strip partitioning, scaling and placement
//! - Configuration loading and validation

// Test modules use exact float comparisons and test-specific casts
#![allow(clippy::float_cmp, clippy::cast_possible_truncation)]

mod config_tests;
mod strip_tests;
