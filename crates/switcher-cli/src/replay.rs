//! Scripted switching sessions.
//!
//! A [`Script`] names the items, the shortcut that opened the switcher and
//! a list of input events at fixed offsets. [`run`] opens the switcher
//! against a [`ReplayHost`], feeds the events when they come due, fires
//! timers and animations on the tokio clock, and reports everything the
//! host was asked to do as an [`Outcome`].

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep_until};
use tokio_util::time::{DelayQueue, delay_queue};
use tracing::{debug, info, trace};

use switcher_core::config::Config;
use switcher_core::host::{
    AnimatedProperty, Animation, AnimationTarget, Context, GrabMode, Host, Task, TimerId,
};
use switcher_core::keys::parse_shortcut;
use switcher_core::overlay::OverlayLayout;
use switcher_core::{InputEvent, Phase, SwitchController, SwitcherEvent};
use switcher_types::{Item, ModifierMask, Point, PreviewHandle, Rect, Size, WindowEntry};

use crate::error::{CliError, Result};

fn default_screen() -> Rect {
    Rect::new(0, 0, 1920, 1080)
}

fn default_shortcut() -> String {
    "Super+space".to_string()
}

/// A recorded session to replay
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    #[serde(default = "default_screen")]
    pub screen: Rect,

    pub items: Vec<Item>,

    /// Shortcut that opened the switcher; its modifiers are held at start
    #[serde(default = "default_shortcut")]
    pub shortcut: String,

    #[serde(default)]
    pub active_workspace: u32,

    /// Results of successive grab attempts; attempts past the end succeed
    #[serde(default)]
    pub grab: Vec<bool>,

    /// Natural preview size per window id
    #[serde(default)]
    pub previews: HashMap<String, Size>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One input event at an offset from opening
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub at_ms: u64,

    /// Modifier state from this step on; unchanged when absent
    #[serde(default)]
    pub modifiers: Option<ModifierMask>,

    #[serde(default)]
    pub pointer: Option<Point>,

    pub event: InputEvent,
}

impl Script {
    /// Parse and check a script.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or steps out of order.
    pub fn from_json(content: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    /// Read a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid script.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Steps must be in time order.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidScript`] naming the first step that runs
    /// backwards.
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self
            .steps
            .windows(2)
            .position(|pair| pair[1].at_ms < pair[0].at_ms)
        {
            return Err(CliError::InvalidScript(format!(
                "step {} at {}ms comes before the previous step",
                i + 1,
                self.steps[i + 1].at_ms
            )));
        }
        Ok(())
    }
}

/// Something the host was asked to do, or a change in what is displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Action {
    Grab { mode: GrabMode, granted: bool },
    ReleaseGrab,
    Opacity { value: u8 },
    Animate {
        target: AnimationTarget,
        property: AnimatedProperty,
        to: f64,
        duration_ms: u64,
    },
    Hide,
    /// Selection or strip placement changed
    Frame {
        selected: usize,
        layout: OverlayLayout,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// Result of a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub events: Vec<SwitcherEvent>,
    /// Why the switcher refused to open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub phase: Phase,
    pub trace: Vec<TraceEntry>,
}

impl Outcome {
    /// Name of the committed item, if any.
    #[must_use]
    pub fn committed(&self) -> Option<&str> {
        self.events.iter().find_map(|event| match event {
            SwitcherEvent::SelectionCommitted { name } => Some(name.as_str()),
        })
    }

    /// Actions in order, without timestamps.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.trace.iter().map(|entry| &entry.action)
    }
}

/// Host backed by a tokio [`DelayQueue`]. Animations have no renderer and
/// simply complete after their duration.
#[derive(Debug)]
pub struct ReplayHost {
    start: Instant,
    queue: DelayQueue<(TimerId, Task)>,
    keys: HashMap<TimerId, delay_queue::Key>,
    next_id: u64,
    grab_results: VecDeque<bool>,
    previews: Vec<(String, Size)>,
    trace: Vec<TraceEntry>,
}

impl ReplayHost {
    #[must_use]
    pub fn new(grab_results: Vec<bool>, previews: HashMap<String, Size>) -> Self {
        Self {
            start: Instant::now(),
            queue: DelayQueue::new(),
            keys: HashMap::new(),
            next_id: 0,
            grab_results: grab_results.into(),
            previews: previews.into_iter().collect(),
            trace: Vec::new(),
        }
    }

    #[must_use]
    pub fn start(&self) -> Instant {
        self.start
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn record(&mut self, action: Action) {
        let at_ms = self.elapsed_ms();
        trace!("{at_ms}ms: {action:?}");
        self.trace.push(TraceEntry { at_ms, action });
    }

    fn enqueue(&mut self, delay: Duration, task: Task) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let key = self.queue.insert((id, task), delay);
        self.keys.insert(id, key);
        id
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Wait for the next timer or animation to come due.
    pub async fn next_due(&mut self) -> Option<(TimerId, Task)> {
        let (id, task) = self.queue.next().await?.into_inner();
        self.keys.remove(&id);
        Some((id, task))
    }

    #[must_use]
    pub fn into_trace(self) -> Vec<TraceEntry> {
        self.trace
    }
}

impl Host for ReplayHost {
    fn acquire_grab(&mut self, mode: GrabMode, _time: u32) -> bool {
        let granted = self.grab_results.pop_front().unwrap_or(true);
        self.record(Action::Grab { mode, granted });
        granted
    }

    fn release_grab(&mut self) {
        self.record(Action::ReleaseGrab);
    }

    fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
        self.enqueue(delay, task)
    }

    fn cancel(&mut self, id: TimerId) {
        // Keys leave the map as soon as they expire, so every key left is live
        if let Some(key) = self.keys.remove(&id) {
            self.queue.remove(&key);
        }
    }

    fn start_animation(&mut self, animation: Animation) -> TimerId {
        self.record(Action::Animate {
            target: animation.target,
            property: animation.property,
            to: animation.final_value,
            duration_ms: u64::try_from(animation.duration.as_millis()).unwrap_or(u64::MAX),
        });
        self.enqueue(animation.duration, animation.on_complete)
    }

    fn preview_handle(&self, entry: &WindowEntry) -> Option<PreviewHandle> {
        let index = self.previews.iter().position(|(id, _)| *id == entry.id)?;
        u64::try_from(index).ok().map(PreviewHandle)
    }

    fn preview_size(&self, handle: PreviewHandle) -> Size {
        usize::try_from(handle.0)
            .ok()
            .and_then(|i| self.previews.get(i))
            .map(|(_, size)| *size)
            .unwrap_or_default()
    }

    fn set_opacity(&mut self, opacity: u8) {
        self.record(Action::Opacity { value: opacity });
    }

    fn hide(&mut self) {
        self.record(Action::Hide);
    }
}

enum Wake {
    Timer(TimerId, Task),
    Step,
}

/// Record a frame whenever the selection or placement changed.
fn note_frame(
    controller: &SwitchController,
    host: &mut ReplayHost,
    last: &mut Option<(usize, OverlayLayout)>,
) {
    let Some(frame) = controller
        .selection()
        .zip(controller.layout())
        .map(|(selection, layout)| (selection.index(), layout))
    else {
        return;
    };
    if *last != Some(frame) {
        host.record(Action::Frame {
            selected: frame.0,
            layout: frame.1,
        });
        *last = Some(frame);
    }
}

/// Replay `script` and report what happened.
///
/// The replay ends when the session closes, or when no step is left and
/// nothing is scheduled.
///
/// # Errors
///
/// Returns an error if the script or config is unusable. A switcher that
/// refuses to open is reported in [`Outcome::error`] instead.
pub async fn run(script: Script, config: Config) -> Result<Outcome> {
    script.validate()?;
    let (_, mask) = parse_shortcut(&script.shortcut)?;
    let mut controller = SwitchController::new(config)?;
    let mut host = ReplayHost::new(script.grab, script.previews);
    let start = host.start();

    let mut ctx = Context::new(script.screen, mask).with_workspace(script.active_workspace);
    ctx.ignored_modifiers = controller.config().ignored_modifiers;

    let mut events = Vec::new();
    match controller.show(&mut host, &ctx, script.items, mask) {
        Ok(event) => events.extend(event),
        Err(err) => {
            info!("switcher refused to open: {err}");
            return Ok(Outcome {
                events,
                error: Some(err.to_string()),
                phase: controller.phase(),
                trace: host.into_trace(),
            });
        }
    }

    let mut last_frame = None;
    note_frame(&controller, &mut host, &mut last_frame);

    let mut steps: VecDeque<Step> = script.steps.into();
    while controller.phase() != Phase::Closed {
        let deadline = steps
            .front()
            .map(|step| start + Duration::from_millis(step.at_ms));

        let wake = tokio::select! {
            biased;
            Some((id, task)) = host.next_due(), if host.has_pending() => Wake::Timer(id, task),
            () = sleep_until(deadline.unwrap_or(start)), if deadline.is_some() => Wake::Step,
            else => break,
        };

        match wake {
            Wake::Timer(id, task) => {
                debug!("timer {:?} fired: {:?}", id, task);
                controller.on_timer(&mut host, &ctx, id, task);
            }
            Wake::Step => {
                let Some(step) = steps.pop_front() else {
                    continue;
                };
                if let Some(modifiers) = step.modifiers {
                    ctx.modifiers = modifiers;
                }
                if step.pointer.is_some() {
                    ctx.pointer = step.pointer;
                }
                debug!("step at {}ms: {:?}", step.at_ms, step.event);
                events.extend(controller.handle(&mut host, &ctx, step.event));
            }
        }
        note_frame(&controller, &mut host, &mut last_frame);
    }

    let outcome = Outcome {
        events,
        error: None,
        phase: controller.phase(),
        trace: host.into_trace(),
    };
    if let Some(name) = outcome.committed() {
        info!("replay committed {name}");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use switcher_types::Keysym;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("item{i}"), format!("Item {i}")))
            .collect()
    }

    fn script(n: usize, steps: Vec<Step>) -> Script {
        Script {
            screen: default_screen(),
            items: items(n),
            shortcut: default_shortcut(),
            active_workspace: 0,
            grab: Vec::new(),
            previews: HashMap::new(),
            steps,
        }
    }

    fn step(at_ms: u64, modifiers: Option<ModifierMask>, event: InputEvent) -> Step {
        Step {
            at_ms,
            modifiers,
            pointer: None,
            event,
        }
    }

    fn press_space(at_ms: u64) -> Step {
        step(
            at_ms,
            None,
            InputEvent::KeyPress {
                keysym: Keysym::SPACE,
                state: ModifierMask::SUPER,
            },
        )
    }

    fn release_super(at_ms: u64) -> Step {
        step(
            at_ms,
            Some(ModifierMask::EMPTY),
            InputEvent::KeyRelease {
                keysym: Keysym::SUPER_L,
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_switch_never_reveals() {
        let outcome = run(script(3, vec![release_super(40)]), Config::default())
            .await
            .unwrap();

        assert_eq!(outcome.committed(), Some("item1"));
        assert_eq!(outcome.phase, Phase::Closed);
        assert!(
            !outcome
                .actions()
                .any(|a| *a == Action::Opacity { value: 255 })
        );
        assert_eq!(outcome.actions().last(), Some(&Action::Hide));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_switch_reveals_and_fades() {
        let steps = vec![press_space(300), release_super(600)];
        let outcome = run(script(3, steps), Config::default()).await.unwrap();

        assert_eq!(outcome.committed(), Some("item2"));
        assert_eq!(outcome.phase, Phase::Closed);

        let reveal = outcome
            .trace
            .iter()
            .find(|e| e.action == Action::Opacity { value: 255 })
            .unwrap();
        assert!(reveal.at_ms >= 150);

        assert!(outcome.actions().any(|a| matches!(
            a,
            Action::Animate {
                target: AnimationTarget::Overlay,
                property: AnimatedProperty::Opacity,
                ..
            }
        )));
        let hide = outcome.trace.last().unwrap();
        assert_eq!(hide.action, Action::Hide);
        assert!(hide.at_ms >= 700);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_follow_selection() {
        let steps = vec![press_space(300), press_space(400), release_super(500)];
        let outcome = run(script(3, steps), Config::default()).await.unwrap();

        let selected: Vec<usize> = outcome
            .actions()
            .filter_map(|a| match a {
                Action::Frame { selected, .. } => Some(*selected),
                _ => None,
            })
            .collect();
        assert_eq!(selected, vec![1, 2, 0]);
        assert_eq!(outcome.committed(), Some("item0"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refusal_is_reported() {
        let outcome = run(script(1, Vec::new()), Config::default())
            .await
            .unwrap();

        assert_eq!(outcome.phase, Phase::Idle);
        assert!(outcome.events.is_empty());
        assert!(outcome.error.unwrap().contains("at least two items"));
        assert!(outcome.trace.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_grab_retry_is_traced() {
        let mut script = script(2, vec![release_super(10)]);
        script.grab = vec![false];
        let outcome = run(script, Config::default()).await.unwrap();

        let grabs: Vec<&Action> = outcome
            .actions()
            .filter(|a| matches!(a, Action::Grab { .. }))
            .collect();
        assert_eq!(
            grabs,
            vec![
                &Action::Grab {
                    mode: GrabMode::Exclusive,
                    granted: false
                },
                &Action::Grab {
                    mode: GrabMode::KeyboardOnly,
                    granted: true
                },
            ]
        );
        assert_eq!(outcome.committed(), Some("item1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_ends_when_nothing_is_left() {
        let outcome = run(script(3, Vec::new()), Config::default())
            .await
            .unwrap();

        assert_eq!(outcome.phase, Phase::Open);
        assert!(outcome.events.is_empty());
        assert!(outcome.actions().any(|a| *a == Action::Opacity { value: 255 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_script() {
        let script = Script::from_json(include_str!("../demos/cycle-back.json")).unwrap();
        let outcome = run(script, Config::default()).await.unwrap();

        assert_eq!(outcome.committed(), Some("browser"));
        assert_eq!(outcome.phase, Phase::Closed);
    }

    #[test]
    fn test_steps_must_be_ordered() {
        let script = script(3, vec![press_space(300), press_space(100)]);
        assert!(matches!(
            script.validate(),
            Err(CliError::InvalidScript(message)) if message.contains("100ms")
        ));
    }

    #[test]
    fn test_script_defaults() {
        let script = Script::from_json(r#"{"items": [{"name": "a", "label": "A"}]}"#).unwrap();
        assert_eq!(script.screen, default_screen());
        assert_eq!(script.shortcut, "Super+space");
        assert!(script.steps.is_empty());
    }

    #[test]
    fn test_trace_entry_json_shape() {
        let entry = TraceEntry {
            at_ms: 150,
            action: Action::Opacity { value: 255 },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"atMs": 150, "action": "opacity", "value": 255})
        );
    }
}
