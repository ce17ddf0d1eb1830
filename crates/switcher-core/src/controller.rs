//! The modal switching session.
//!
//! A [`SwitchController`] owns at most one session at a time. Sessions
//! start with [`SwitchController::show`], consume input through
//! [`SwitchController::handle`] and timer completions through
//! [`SwitchController::on_timer`], and end by committing or cancelling.
//! Committing yields exactly one [`SwitcherEvent`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::debounce::HoverDebouncer;
use crate::host::{
    AnimatedProperty, Animation, AnimationTarget, Context, Easing, GrabMode, Host, Task, TimerId,
};
use crate::keys::{effective_state, match_trigger};
use crate::overlay::{OverlayLayout, place_icon_strip, place_thumbnails};
use crate::strip::{IconStrip, Strip, ThumbnailStrip};
use crate::{Error, Result};
use switcher_types::{Item, Keysym, ModifierMask, Selection, TriggerBinding};

/// Lifecycle of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Opening,
    Open,
    Committing,
    Cancelling,
    Closed,
}

/// The one outward event of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwitcherEvent {
    SelectionCommitted { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelDirection {
    Up,
    Down,
}

/// Input delivered while the modal grab is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyPress { keysym: Keysym, state: ModifierMask },
    /// Release state is read from [`Context::modifiers`]
    KeyRelease { keysym: Keysym },
    Wheel { direction: WheelDirection },
    /// Button press on the overlay outside any item
    ButtonPress,
    ItemEntered { index: usize },
    ItemClicked { index: usize },
}

#[derive(Debug)]
struct Session {
    items: Arc<[Item]>,
    primary: ModifierMask,
    selection: Selection,
    icons: IconStrip,
    thumbnails: Option<ThumbnailStrip>,
    layout: OverlayLayout,
    debouncer: HoverDebouncer,
    reveal_timer: Option<TimerId>,
    hover_enter_timer: Option<TimerId>,
    thumbnail_timer: Option<TimerId>,
    scroll_animation: Option<TimerId>,
    fade_animation: Option<TimerId>,
    revealed: bool,
    grab_held: bool,
}

impl Session {
    fn release_grab(&mut self, host: &mut dyn Host) {
        if self.grab_held {
            host.release_grab();
            self.grab_held = false;
        }
    }

    fn cancel_timers(&mut self, host: &mut dyn Host) {
        self.debouncer.cancel(host);
        for id in [
            self.reveal_timer.take(),
            self.hover_enter_timer.take(),
            self.thumbnail_timer.take(),
            self.scroll_animation.take(),
        ]
        .into_iter()
        .flatten()
        {
            host.cancel(id);
        }
    }

    fn drop_thumbnails(&mut self) {
        if self.thumbnails.take().is_some() {
            trace!("discarding thumbnail strip");
        }
        self.layout.thumbnails = None;
    }

    fn select(&mut self, host: &mut dyn Host, config: &Config, index: usize) {
        self.selection = self.selection.with_index(index);
        let index = self.selection.index();
        debug!("selected item {} ({})", index, self.items[index].name);

        if let Some(request) = self.icons.highlight(index) {
            if let Some(previous) = self.scroll_animation.take() {
                host.cancel(previous);
            }
            self.scroll_animation = Some(host.start_animation(Animation {
                target: AnimationTarget::IconStrip,
                property: AnimatedProperty::AnchorX,
                final_value: f64::from(request.anchor),
                duration: config.timing.scroll(),
                easing: Easing::EaseOutQuad,
                on_complete: Task::ScrollSettled(request.direction),
            }));
        }

        if config.thumbnails.enabled {
            self.drop_thumbnails();
            if let Some(previous) = self.thumbnail_timer.take() {
                host.cancel(previous);
            }
            self.thumbnail_timer =
                Some(host.schedule(config.timing.thumbnail_delay(), Task::ShowThumbnails));
        }
    }

    /// Hover selection, subject to the debounce gate.
    fn enter_item(&mut self, host: &mut dyn Host, config: &Config, index: usize) {
        if !self.debouncer.permits() {
            trace!("hover on item {} ignored while debouncing", index);
            return;
        }
        if index != self.selection.index() {
            self.select(host, config, index);
        }
    }

    fn show_thumbnails(&mut self, host: &mut dyn Host, ctx: &Context, config: &Config) {
        let index = self.selection.index();
        let item = &self.items[index];
        if item.windows.is_empty() {
            return;
        }
        let Some(icon) = self.icons.row().screen_rect(index) else {
            return;
        };

        let layout = &config.layout;
        let mut strip = ThumbnailStrip::new(
            &item.windows,
            ctx.active_workspace,
            layout,
            config.thumbnails.max_size,
        );
        let bounds = place_thumbnails(
            &mut strip,
            host,
            icon,
            self.layout.strip.bottom(),
            ctx.screen,
            layout.overlay_padding,
            layout.item_spacing,
        );
        debug!(
            "showing {} thumbnails for {} at {:?}",
            strip.windows().len(),
            item.name,
            bounds
        );
        self.layout.thumbnails = Some(bounds);
        self.thumbnails = Some(strip);
    }
}

/// Drives switching sessions against a [`Host`].
#[derive(Debug)]
pub struct SwitchController {
    config: Config,
    bindings: Vec<TriggerBinding>,
    phase: Phase,
    session: Option<Session>,
}

impl SwitchController {
    /// Create a controller using the bindings named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShortcut`] if a configured shortcut does not
    /// parse.
    pub fn new(config: Config) -> Result<Self> {
        let bindings = config.trigger_bindings()?;
        Ok(Self {
            config,
            bindings,
            phase: Phase::Idle,
            session: None,
        })
    }

    /// Replace the trigger bindings, e.g. with ones supplied per session.
    #[must_use]
    pub fn with_bindings(mut self, bindings: Vec<TriggerBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    /// Open the switcher over `items`.
    ///
    /// `mask` is the modifier combination of the shortcut that opened the
    /// switcher; releasing its lowest bit commits. Returns the committed
    /// event when that modifier was already released by the time the grab
    /// was taken.
    ///
    /// # Errors
    ///
    /// - [`Error::SessionActive`] while a previous session is still alive
    /// - [`Error::InsufficientItems`] for fewer than two items
    /// - [`Error::GrabUnavailable`] if both grab attempts fail
    pub fn show(
        &mut self,
        host: &mut dyn Host,
        ctx: &Context,
        items: impl Into<Arc<[Item]>>,
        mask: ModifierMask,
    ) -> Result<Option<SwitcherEvent>> {
        if self.session.is_some() {
            warn!("refusing to open: session still active ({:?})", self.phase);
            return Err(Error::SessionActive);
        }

        let items: Arc<[Item]> = items.into();
        let Some(selection) = Selection::new(1, items.len()) else {
            warn!("refusing to open with {} item(s)", items.len());
            self.phase = Phase::Idle;
            return Err(Error::InsufficientItems(items.len()));
        };

        if !host.acquire_grab(GrabMode::Exclusive, ctx.time) {
            debug!("exclusive grab failed, retrying keyboard-only");
            if !host.acquire_grab(GrabMode::KeyboardOnly, ctx.time) {
                warn!("modal grab unavailable");
                self.phase = Phase::Idle;
                return Err(Error::GrabUnavailable);
            }
        }
        self.phase = Phase::Opening;

        let layout = &self.config.layout;
        let mut icons = IconStrip::new(items.len(), layout);
        // One layout pass while transparent so fast switches never flash
        host.set_opacity(0);
        let strip = place_icon_strip(&mut icons, ctx.screen, layout.overlay_padding);

        let primary = mask.primary();
        info!(
            "switcher opened with {} items (primary modifier {:#x})",
            items.len(),
            primary.bits()
        );

        self.session = Some(Session {
            items,
            primary,
            selection,
            icons,
            thumbnails: None,
            layout: OverlayLayout {
                strip,
                thumbnails: None,
            },
            debouncer: HoverDebouncer::new(self.config.timing.hover_disable()),
            reveal_timer: None,
            hover_enter_timer: None,
            thumbnail_timer: None,
            scroll_animation: None,
            fade_animation: None,
            revealed: false,
            grab_held: true,
        });

        let config = &self.config;
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        session.select(host, config, 1);

        // The modifier may have been released before the grab was taken
        if !ctx.modifiers.intersects(primary) {
            debug!("primary modifier already released, committing");
            return Ok(self.finish(host, true));
        }

        session.reveal_timer = Some(host.schedule(config.timing.reveal_delay(), Task::Reveal));
        session.debouncer.arm(host);
        self.phase = Phase::Open;
        Ok(None)
    }

    /// Dispatch one input event. Only an open session reacts.
    pub fn handle(
        &mut self,
        host: &mut dyn Host,
        ctx: &Context,
        event: InputEvent,
    ) -> Option<SwitcherEvent> {
        if self.phase != Phase::Open {
            trace!("ignoring {:?} in phase {:?}", event, self.phase);
            return None;
        }
        let config = &self.config;
        let session = self.session.as_mut()?;

        match event {
            InputEvent::KeyPress { keysym, state } => {
                session.debouncer.arm(host);
                let state = effective_state(state, ctx.ignored_modifiers);
                if let Some(direction) = match_trigger(&self.bindings, keysym, state) {
                    let next = session.selection.step(direction).index();
                    session.select(host, config, next);
                    None
                } else {
                    debug!("key {} is not a trigger, cancelling", keysym);
                    self.finish(host, false)
                }
            }
            InputEvent::KeyRelease { .. } => {
                if ctx.modifiers.intersects(session.primary) {
                    None
                } else {
                    self.finish(host, true)
                }
            }
            InputEvent::Wheel { direction } => {
                let next = match direction {
                    WheelDirection::Up => session.selection.previous(),
                    WheelDirection::Down => session.selection.next(),
                };
                session.select(host, config, next.index());
                None
            }
            InputEvent::ButtonPress => self.finish(host, false),
            InputEvent::ItemEntered { index } => {
                if index >= session.items.len() {
                    return None;
                }
                if session.thumbnails.is_some() {
                    if let Some(previous) = session.hover_enter_timer.take() {
                        host.cancel(previous);
                    }
                    session.hover_enter_timer = Some(
                        host.schedule(config.timing.hover_enter_delay(), Task::HoverEnter(index)),
                    );
                } else {
                    session.enter_item(host, config, index);
                }
                None
            }
            InputEvent::ItemClicked { index } => {
                if index >= session.items.len() {
                    return None;
                }
                session.select(host, config, index);
                self.finish(host, true)
            }
        }
    }

    /// Deliver a fired timer or a finished animation.
    pub fn on_timer(&mut self, host: &mut dyn Host, ctx: &Context, id: TimerId, task: Task) {
        let config = &self.config;
        let Some(session) = self.session.as_mut() else {
            trace!("timer {:?} ({:?}) fired without a session", id, task);
            return;
        };

        match task {
            Task::Reveal if session.reveal_timer == Some(id) => {
                session.reveal_timer = None;
                session.revealed = true;
                host.set_opacity(u8::MAX);
                debug!("overlay revealed");
            }
            Task::EnableHover => {
                if session.debouncer.on_elapsed(id) {
                    trace!("hover selection enabled");
                }
            }
            Task::HoverEnter(index) if session.hover_enter_timer == Some(id) => {
                session.hover_enter_timer = None;
                let inside = ctx
                    .pointer
                    .zip(session.icons.row().screen_rect(index))
                    .is_some_and(|(pointer, rect)| rect.contains(pointer));
                if inside {
                    session.enter_item(host, config, index);
                }
            }
            Task::ShowThumbnails if session.thumbnail_timer == Some(id) => {
                session.thumbnail_timer = None;
                session.show_thumbnails(host, ctx, config);
            }
            Task::ScrollSettled(direction) if session.scroll_animation == Some(id) => {
                session.scroll_animation = None;
                session.icons.row_mut().settle_scroll(direction);
            }
            Task::FadeOut if session.fade_animation == Some(id) => {
                self.discard(host);
            }
            _ => trace!("ignoring stale timer {:?} ({:?})", id, task),
        }
    }

    /// Cancel the session from outside, as if the user had dismissed it.
    pub fn dismiss(&mut self, host: &mut dyn Host) {
        self.finish(host, false);
    }

    /// Commit or cancel. Only the first call per session has any effect.
    fn finish(&mut self, host: &mut dyn Host, commit: bool) -> Option<SwitcherEvent> {
        if !matches!(self.phase, Phase::Opening | Phase::Open) {
            return None;
        }
        let fade_out = self.config.timing.fade_out();
        let session = self.session.as_mut()?;

        let event = if commit {
            let item = &session.items[session.selection.index()];
            info!("committed {}", item.name);
            self.phase = Phase::Committing;
            Some(SwitcherEvent::SelectionCommitted {
                name: item.name.clone(),
            })
        } else {
            info!("switcher cancelled");
            self.phase = Phase::Cancelling;
            None
        };

        session.release_grab(host);
        session.cancel_timers(host);

        if session.revealed {
            session.fade_animation = Some(host.start_animation(Animation {
                target: AnimationTarget::Overlay,
                property: AnimatedProperty::Opacity,
                final_value: 0.0,
                duration: fade_out,
                easing: Easing::EaseOutQuad,
                on_complete: Task::FadeOut,
            }));
        } else {
            self.discard(host);
        }
        event
    }

    fn discard(&mut self, host: &mut dyn Host) {
        if let Some(mut session) = self.session.take() {
            session.release_grab(host);
            session.cancel_timers(host);
            host.hide();
        }
        self.phase = Phase::Closed;
        debug!("session discarded");
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn bindings(&self) -> &[TriggerBinding] {
        &self.bindings
    }

    /// Current selection while a session exists.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.session.as_ref().map(|s| s.selection)
    }

    #[must_use]
    pub fn layout(&self) -> Option<OverlayLayout> {
        self.session.as_ref().map(|s| s.layout)
    }

    #[must_use]
    pub fn icon_strip(&self) -> Option<&IconStrip> {
        self.session.as_ref().map(|s| &s.icons)
    }

    #[must_use]
    pub fn thumbnail_strip(&self) -> Option<&ThumbnailStrip> {
        self.session.as_ref().and_then(|s| s.thumbnails.as_ref())
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.revealed)
    }

    #[must_use]
    pub fn hover_enabled(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.debouncer.permits())
    }

    /// Whether the icon strip has a scroll animation in flight.
    #[must_use]
    pub fn scrolling(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.scroll_animation.is_some())
    }
}
