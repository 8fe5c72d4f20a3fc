use crate::store::CueStore;

use std::cell::Cell;

use log::debug;

/// Anything that can report the current playback position in seconds.
pub trait PlaybackClock {
    fn current_time(&self) -> f64;
}

impl<T: PlaybackClock + ?Sized> PlaybackClock for &T {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, time: f64) {
        self.now.set(time);
    }

    pub fn advance(&self, delta: f64) {
        self.now.set(self.now.get() + delta);
    }
}

impl PlaybackClock for ManualClock {
    fn current_time(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CueChange {
    Shown(String),
    Hidden,
}

/// Subtitles attached to a player. Poll [`Overlay::tick`] from the player's
/// periodic time observer to find out when the visible text changes.
pub struct Overlay<C> {
    store: CueStore,
    clock: C,
    shown: Option<String>,
}

impl<C: PlaybackClock> Overlay<C> {
    pub fn new(store: CueStore, clock: C) -> Self {
        Self {
            store,
            clock,
            shown: None,
        }
    }

    pub fn store(&self) -> &CueStore {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Text active at the clock's current position.
    pub fn current_text(&self) -> Option<&str> {
        self.store.lookup(self.clock.current_time())
    }

    pub fn text_at(&self, time: f64) -> Option<&str> {
        self.store.lookup(time)
    }

    /// Text shown as of the last tick.
    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    pub fn tick(&mut self) -> Option<CueChange> {
        let time = self.clock.current_time();
        let text = self.store.lookup(time);
        if text == self.shown.as_deref() {
            return None;
        }

        let change = match text {
            Some(text) => {
                debug!("showing cue at {:.3}s: {:?}", time, text);
                CueChange::Shown(text.to_string())
            }
            None => {
                debug!("hiding cue at {:.3}s", time);
                CueChange::Hidden
            }
        };
        self.shown = text.map(str::to_string);
        Some(change)
    }
}
