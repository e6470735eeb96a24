use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use super::mode::{KeyTracker, PressKind};
use crate::shared::{InputEvent, Key};

pub const EXIT_KEY: KeyCode = KeyCode::Esc;

// Collect input until the frame deadline. This doubles as the frame pacing
// wait: whatever arrives while we block here is handled next frame.
pub fn poll_input(deadline: Instant, tracker: &mut KeyTracker) -> anyhow::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            break;
        }
        match event::read()? {
            Event::Key(key) => events.extend(handle_key(key, tracker)),
            Event::Resize(cols, rows) => events.push(InputEvent::Resize { cols, rows }),
            _ => {}
        }
    }
    Ok(events)
}

// resolve a raw key event against what's already held
pub fn handle_key(key: KeyEvent, tracker: &mut KeyTracker) -> Option<InputEvent> {
    let mapped = map_key(key.code);
    match key.kind {
        KeyEventKind::Press => match tracker.press(key.code) {
            PressKind::Fresh => Some(InputEvent::KeyDown { key: mapped, held_over: false }),
            PressKind::HeldOver => Some(InputEvent::KeyDown { key: mapped, held_over: true }),
            PressKind::Repeat => None,
        },
        KeyEventKind::Repeat => {
            tracker.repeat(key.code);
            None
        }
        KeyEventKind::Release => tracker.release(key.code).then_some(InputEvent::KeyUp(mapped)),
    }
}

// Esc is the grown-up's key, everything else (ctrl+c included) is for mashing
fn map_key(code: KeyCode) -> Key {
    if code == EXIT_KEY { Key::Exit } else { Key::Trigger }
}
