//! Interface to the windowing host.
//!
//! The switcher never talks to a display server directly. Everything it
//! needs from the outside world (the modal grab, timers, animations and
//! live previews) goes through [`Host`], and ambient state such as the
//! screen geometry or the current modifier state is passed in explicitly
//! with every call as a [`Context`].

use std::time::Duration;

use serde::Serialize;

use crate::strip::ScrollDirection;
use switcher_types::{ModifierMask, Point, PreviewHandle, Rect, Size, WindowEntry};

/// Token returned for every scheduled timer or started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerId(pub u64);

/// How the modal grab is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrabMode {
    /// Keyboard and pointer
    Exclusive,
    /// Someone else already holds the pointer; grab the keyboard only
    KeyboardOnly,
}

/// Deferred work handed back to the controller when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Make the overlay opaque after the initial delay
    Reveal,
    /// Start accepting hover-driven selection
    EnableHover,
    /// Delayed hover over an icon while thumbnails are shown
    HoverEnter(usize),
    /// Build the thumbnail strip for the highlighted item
    ShowThumbnails,
    /// The icon strip finished scrolling
    ScrollSettled(ScrollDirection),
    /// The closing fade finished
    FadeOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationTarget {
    Overlay,
    IconStrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatedProperty {
    /// Horizontal scroll anchor of a strip's item row
    AnchorX,
    Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    EaseOutQuad,
}

/// A property tween; the host reports completion by firing `on_complete`.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub target: AnimationTarget,
    pub property: AnimatedProperty,
    pub final_value: f64,
    pub duration: Duration,
    pub easing: Easing,
    pub on_complete: Task,
}

/// Services the switcher consumes from the windowing host.
///
/// All callbacks are delivered on the host's single event loop by calling
/// [`SwitchController::on_timer`](crate::SwitchController::on_timer) with the
/// token and task that were handed out here.
pub trait Host {
    /// Try to take the modal input grab.
    fn acquire_grab(&mut self, mode: GrabMode, time: u32) -> bool;

    /// Drop the modal grab. Must tolerate being called without a grab.
    fn release_grab(&mut self);

    fn schedule(&mut self, delay: Duration, task: Task) -> TimerId;

    /// Cancel a timer or animation. Unknown or already fired ids are a no-op.
    fn cancel(&mut self, id: TimerId);

    fn start_animation(&mut self, animation: Animation) -> TimerId;

    fn preview_handle(&self, entry: &WindowEntry) -> Option<PreviewHandle>;

    fn preview_size(&self, handle: PreviewHandle) -> Size;

    fn set_opacity(&mut self, opacity: u8);

    /// Remove the overlay from the screen
    fn hide(&mut self);
}

/// Snapshot of ambient host state at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Primary monitor the overlay covers
    pub screen: Rect,
    /// Modifiers currently held (pointer modifier state)
    pub modifiers: ModifierMask,
    /// Modifiers the host asks us to ignore (`CapsLock`, `NumLock`)
    pub ignored_modifiers: ModifierMask,
    pub pointer: Option<Point>,
    pub time: u32,
    pub active_workspace: u32,
}

impl Context {
    #[must_use]
    pub fn new(screen: Rect, modifiers: ModifierMask) -> Self {
        Self {
            screen,
            modifiers,
            ignored_modifiers: ModifierMask::LOCK | ModifierMask::MOD2,
            pointer: None,
            time: 0,
            active_workspace: 0,
        }
    }

    #[must_use]
    pub fn with_modifiers(self, modifiers: ModifierMask) -> Self {
        Self { modifiers, ..self }
    }

    #[must_use]
    pub fn with_pointer(self, pointer: Point) -> Self {
        Self {
            pointer: Some(pointer),
            ..self
        }
    }

    #[must_use]
    pub fn with_workspace(self, active_workspace: u32) -> Self {
        Self {
            active_workspace,
            ..self
        }
    }
}
