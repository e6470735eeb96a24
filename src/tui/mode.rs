use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::shared::{HOLD_GRACE_FRAMES, REPEAT_WINDOW_FRAMES};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressKind {
    Fresh,    // key was up
    HeldOver, // key still counted as down, but too long ago to be auto-repeat
    Repeat,   // auto-repeat of a held key
}

// Terminals can't be asked whether a key is down, so we remember it from the
// event stream. With release reporting that's exact; without it a key counts
// as down while presses for it keep arriving.
#[derive(Clone, Debug)]
pub struct KeyTracker {
    frame: u64,
    release_events: bool,
    down: HashMap<KeyCode, u64>, // key -> last frame a press or repeat was seen
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            frame: 0,
            release_events,
            down: HashMap::new(),
        }
    }

    pub fn advance_frame(&mut self) {
        self.frame += 1;
        if !self.release_events {
            let frame = self.frame;
            self.down.retain(|_, last| frame - *last < HOLD_GRACE_FRAMES);
        }
    }

    pub fn press(&mut self, code: KeyCode) -> PressKind {
        let previous = self.down.insert(code, self.frame);
        match previous {
            None => PressKind::Fresh,
            Some(_) if self.release_events => PressKind::HeldOver, // missed the release
            Some(last) if self.frame - last <= REPEAT_WINDOW_FRAMES => PressKind::Repeat,
            Some(_) => PressKind::HeldOver,
        }
    }

    pub fn repeat(&mut self, code: KeyCode) {
        self.down.insert(code, self.frame);
    }

    /// Returns whether the key was down.
    pub fn release(&mut self, code: KeyCode) -> bool {
        self.down.remove(&code).is_some()
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.down.contains_key(&code)
    }
}
