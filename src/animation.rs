//! Animation player for pre-rendered glyph frames.
//!
//! The player never sleeps or spawns anything itself. Starting playback or
//! accepting a tick returns a [`ScheduledTick`] that the host delivers back
//! through [`AnimationPlayer::update`] once its delay has elapsed. Every tick
//! carries the player's session id and generation tag; ticks whose identity
//! no longer matches are dropped, so superseded timers never need to be
//! cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::compositor::CompositedFrame;

/// One frame of an animation sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Rendered text shown for this frame
    pub text: String,
    /// How long the frame stays on screen
    pub duration: Duration,
}

impl AnimationFrame {
    pub fn new(text: String, duration: Duration) -> Self {
        Self { text, duration }
    }

    /// Pair rendered text with the delay of the frame it came from.
    pub fn from_composited(text: String, frame: &CompositedFrame) -> Self {
        Self::new(text, frame.duration())
    }
}

/// Identity of one player instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

impl SessionId {
    /// Allocate a process-unique session id.
    pub fn next() -> Self {
        SessionId(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap an id produced by an external generator.
    pub const fn from_raw(id: u64) -> Self {
        SessionId(id)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A deferred tick addressed to a player.
///
/// A `None` field matches any player; this is mainly useful in tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvent {
    pub session: Option<SessionId>,
    pub generation: Option<u64>,
}

impl TickEvent {
    pub fn new(session: SessionId, generation: u64) -> Self {
        Self {
            session: Some(session),
            generation: Some(generation),
        }
    }

    /// A tick that matches whatever player receives it.
    pub fn any() -> Self {
        Self::default()
    }
}

/// A tick the host must deliver after `delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTick {
    pub delay: Duration,
    pub event: TickEvent,
}

/// Input handled by [`AnimationPlayer::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent<'a> {
    /// A previously scheduled tick has come due
    Tick(TickEvent),
    /// A host input signal, such as a key name
    Input(&'a str),
}

/// Current state of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    /// Frozen on the current frame
    Stopped,
    /// Advancing on every accepted tick
    Playing,
}

/// Looping player over an immutable frame sequence.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use glyphcast_core::{AnimationFrame, AnimationPlayer, AnimationState, PlayerEvent};
///
/// let frames = vec![
///     AnimationFrame::new("a".into(), Duration::from_millis(20)),
///     AnimationFrame::new("b".into(), Duration::from_millis(30)),
/// ];
/// let mut player = AnimationPlayer::new(frames, vec!["esc".into()]);
///
/// // The host sleeps for `tick.delay`, then feeds the event back
/// let tick = player.start().unwrap();
/// assert_eq!(tick.delay, Duration::from_millis(20));
///
/// let next = player.update(PlayerEvent::Tick(tick.event)).unwrap();
/// assert_eq!(player.view(), "b");
/// assert_eq!(next.delay, Duration::from_millis(30));
///
/// player.update(PlayerEvent::Input("esc"));
/// assert_eq!(player.state(), AnimationState::Stopped);
/// ```
#[derive(Clone, Debug)]
pub struct AnimationPlayer {
    frames: Vec<AnimationFrame>,
    stop_signals: Vec<String>,
    current_frame: usize,
    state: AnimationState,
    session: SessionId,
    generation: u64,
}

impl AnimationPlayer {
    /// Create a stopped player with a fresh session id.
    pub fn new(frames: Vec<AnimationFrame>, stop_signals: Vec<String>) -> Self {
        Self::with_session(frames, stop_signals, SessionId::next())
    }

    /// Create a stopped player with an injected session id.
    pub fn with_session(frames: Vec<AnimationFrame>, stop_signals: Vec<String>, session: SessionId) -> Self {
        Self {
            frames,
            stop_signals,
            current_frame: 0,
            state: AnimationState::Stopped,
            session,
            generation: 0,
        }
    }

    /// Start or restart playback from the current frame.
    ///
    /// Leaving the stopped state bumps the generation, so ticks scheduled
    /// before a stop can never reach the new run.
    /// Returns the first tick to schedule, or None if there are no frames.
    pub fn start(&mut self) -> Option<ScheduledTick> {
        if self.frames.is_empty() {
            return None;
        }
        if self.state == AnimationState::Stopped {
            self.generation += 1;
        }
        self.state = AnimationState::Playing;
        log::debug!(
            "animation {} playing from frame {}",
            self.session.get(),
            self.current_frame
        );
        self.schedule()
    }

    /// Stop playback, keeping the current frame.
    ///
    /// Ticks already in flight are dropped when they arrive.
    pub fn stop(&mut self) {
        if self.state == AnimationState::Playing {
            log::debug!(
                "animation {} stopped at frame {}",
                self.session.get(),
                self.current_frame
            );
        }
        self.state = AnimationState::Stopped;
    }

    /// Feed an event to the player.
    ///
    /// Returns the next tick to schedule, if any.
    pub fn update(&mut self, event: PlayerEvent<'_>) -> Option<ScheduledTick> {
        match event {
            PlayerEvent::Tick(tick) => self.on_tick(tick),
            PlayerEvent::Input(signal) => {
                self.on_input(signal);
                None
            }
        }
    }

    /// Handle a delivered tick.
    ///
    /// Stale or foreign ticks, and any tick while stopped, are ignored.
    pub fn on_tick(&mut self, tick: TickEvent) -> Option<ScheduledTick> {
        if self.state != AnimationState::Playing || !self.accepts(tick) {
            log::trace!("animation {} dropped tick {:?}", self.session.get(), tick);
            return None;
        }

        self.current_frame = (self.current_frame + 1) % self.frames.len();
        self.generation += 1;
        self.schedule()
    }

    /// Handle a host input signal.
    ///
    /// Returns true if the signal stopped playback.
    pub fn on_input(&mut self, signal: &str) -> bool {
        if self.state == AnimationState::Playing && self.stop_signals.iter().any(|s| s == signal) {
            self.stop();
            return true;
        }
        false
    }

    /// Whether a tick is addressed to this player's current generation.
    pub fn accepts(&self, tick: TickEvent) -> bool {
        let session_ok = tick.session.map_or(true, |session| session == self.session);
        let generation_ok = tick.generation.map_or(true, |generation| generation == self.generation);
        session_ok && generation_ok
    }

    /// Text of the current frame.
    pub fn view(&self) -> &str {
        self.frames
            .get(self.current_frame)
            .map(|frame| frame.text.as_str())
            .unwrap_or("")
    }

    #[inline]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == AnimationState::Playing
    }

    #[inline]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn schedule(&self) -> Option<ScheduledTick> {
        let frame = self.frames.get(self.current_frame)?;
        Some(ScheduledTick {
            delay: frame.duration,
            event: TickEvent::new(self.session, self.generation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMES: [&str; 7] = ["⣿", "⣷", "⣧", "⣇", "⣆", "⣄", "⣀"];

    fn player() -> AnimationPlayer {
        let frames = FRAMES
            .iter()
            .enumerate()
            .map(|(i, text)| AnimationFrame::new(text.to_string(), Duration::from_millis(20 + i as u64)))
            .collect();
        AnimationPlayer::new(frames, vec!["esc".into()])
    }

    #[test]
    fn test_start_schedules_current_frame_duration() {
        let mut p = player();
        assert_eq!(p.state(), AnimationState::Stopped);

        let tick = p.start().unwrap();
        assert!(p.is_playing());
        assert_eq!(tick.delay, Duration::from_millis(20));
        assert_eq!(tick.event, TickEvent::new(p.session(), 1));
        assert_eq!(p.current_frame(), 0);
    }

    #[test]
    fn test_accepted_tick_advances_and_reschedules() {
        let mut p = player();
        let tick = p.start().unwrap();

        let next = p.update(PlayerEvent::Tick(tick.event)).unwrap();
        assert_eq!(p.current_frame(), 1);
        assert_eq!(p.generation(), 2);
        assert_eq!(p.view(), "⣷");
        // Delay comes from the new current frame
        assert_eq!(next.delay, Duration::from_millis(21));
        assert_eq!(next.event, TickEvent::new(p.session(), 2));
    }

    #[test]
    fn test_wraparound() {
        let mut p = player();
        let mut tick = p.start().unwrap();
        for _ in 0..10 {
            tick = p.update(PlayerEvent::Tick(tick.event)).unwrap();
        }
        assert_eq!(p.current_frame(), 10 % 7);
        assert_eq!(p.view(), "⣇");
    }

    #[test]
    fn test_wildcard_ticks_are_accepted() {
        let mut p = player();
        p.start();
        for _ in 0..7 {
            p.on_tick(TickEvent::any());
        }
        assert_eq!(p.current_frame(), 0);

        let session_only = TickEvent {
            session: Some(p.session()),
            generation: None,
        };
        p.on_tick(session_only);
        assert_eq!(p.current_frame(), 1);
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut p = player();
        let first = p.start().unwrap();
        p.on_tick(first.event);
        assert_eq!(p.current_frame(), 1);

        // Same tick delivered twice (e.g. a retriggered start)
        assert!(p.on_tick(first.event).is_none());
        assert_eq!(p.current_frame(), 1);
    }

    #[test]
    fn test_ticks_isolated_between_players() {
        let mut a = player();
        let a_tick = a.start().unwrap();

        let mut b = player();
        assert_ne!(a.session(), b.session());
        b.start();

        assert!(b.on_tick(a_tick.event).is_none());
        assert_eq!(b.current_frame(), 0);
    }

    #[test]
    fn test_stop_signal() {
        let mut p = player();
        p.start();

        assert!(!p.on_input("enter"));
        assert!(p.is_playing());

        assert!(p.update(PlayerEvent::Input("esc")).is_none());
        assert_eq!(p.state(), AnimationState::Stopped);
    }

    #[test]
    fn test_stop_drops_in_flight_ticks() {
        let mut p = player();
        let tick = p.start().unwrap();
        p.stop();

        assert!(p.on_tick(tick.event).is_none());
        assert_eq!(p.current_frame(), 0);
        assert_eq!(p.view(), "⣿");
    }

    #[test]
    fn test_restart_resumes_from_current_frame() {
        let mut p = player();
        let mut tick = p.start().unwrap();
        for _ in 0..3 {
            tick = p.on_tick(tick.event).unwrap();
        }
        p.stop();
        assert_eq!(p.current_frame(), 3);

        let resumed = p.start().unwrap();
        assert!(p.is_playing());
        assert_eq!(resumed.delay, Duration::from_millis(23));
        p.on_tick(resumed.event);
        assert_eq!(p.current_frame(), 4);

        // The tick pending before the stop is now stale
        assert!(p.on_tick(tick.event).is_none());
        assert_eq!(p.current_frame(), 4);
    }

    #[test]
    fn test_tick_from_before_stop_cannot_reach_restart() {
        let mut p = player();
        let old = p.start().unwrap();
        p.stop();

        let resumed = p.start().unwrap();
        assert_ne!(old.event, resumed.event);

        // The pre-stop timer fires first
        assert!(p.on_tick(old.event).is_none());
        assert_eq!(p.current_frame(), 0);

        assert!(p.on_tick(resumed.event).is_some());
        assert_eq!(p.current_frame(), 1);
    }

    #[test]
    fn test_start_while_playing_keeps_single_chain() {
        let mut p = player();
        let first = p.start().unwrap();
        let again = p.start().unwrap();
        assert_eq!(first.event, again.event);

        let next = p.on_tick(first.event).unwrap();
        assert!(p.on_tick(again.event).is_none());
        assert_eq!(p.current_frame(), 1);
        assert!(p.on_tick(next.event).is_some());
        assert_eq!(p.current_frame(), 2);
    }

    #[test]
    fn test_injected_session() {
        let mut p = AnimationPlayer::with_session(
            vec![AnimationFrame::new("x".into(), Duration::ZERO)],
            Vec::new(),
            SessionId::from_raw(42),
        );
        let tick = p.start().unwrap();
        assert_eq!(tick.event.session, Some(SessionId::from_raw(42)));
        assert_eq!(p.on_tick(TickEvent::new(SessionId::from_raw(7), 0)), None);
        assert!(p.on_tick(tick.event).is_some());
    }

    #[test]
    fn test_empty_player() {
        let mut p = AnimationPlayer::new(Vec::new(), Vec::new());
        assert!(p.start().is_none());
        assert!(!p.is_playing());
        assert_eq!(p.view(), "");
    }
}
