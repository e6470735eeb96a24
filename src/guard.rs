use crate::shared::{EXIT_HOLD_FRAMES, HINT_FRAMES};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    Escalating, // exit key went down, counting held frames
    Exit,
}

/// The grown-up's way out: hold the exit key long enough and the app closes.
///
/// Counting is in frames. The frame the key goes down is held frame 1, each
/// following frame with the key still down adds one, and the guard trips once
/// the count passes `EXIT_HOLD_FRAMES`. The hint message has its own timer and
/// hiding it does not disarm the guard; only a key-up does that.
#[derive(Clone, Debug)]
pub struct ExitGuard {
    state: GuardState,
    message_timer: i32,
    show_message: bool,
    held_frames: u32,
    pressed_this_frame: bool,
}

impl Default for ExitGuard {
    fn default() -> Self {
        Self {
            state: GuardState::Idle,
            message_timer: 0,
            show_message: false,
            held_frames: 0,
            pressed_this_frame: false,
        }
    }
}

impl ExitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn held_frames(&self) -> u32 {
        self.held_frames
    }

    pub fn message_visible(&self) -> bool {
        self.show_message
    }

    // a fresh press also re-arms an escalation whose key-up went missing
    pub fn exit_key_down(&mut self) {
        if self.state == GuardState::Exit {
            return;
        }
        self.state = GuardState::Escalating;
        self.message_timer = HINT_FRAMES;
        self.show_message = true;
        self.held_frames = 1;
        self.pressed_this_frame = true;
    }

    pub fn exit_key_up(&mut self) {
        if self.state != GuardState::Escalating {
            return;
        }
        self.state = GuardState::Idle;
        self.message_timer = 0;
        self.show_message = false;
        self.held_frames = 0;
        self.pressed_this_frame = false;
    }

    /// Advance one frame. `exit_key_down` is whether the key is physically down right now.
    pub fn tick(&mut self, exit_key_down: bool) -> GuardState {
        if self.state != GuardState::Escalating {
            return self.state;
        }

        if self.show_message {
            self.message_timer -= 1;
            if self.message_timer <= 0 {
                self.show_message = false;
            }
        }

        if self.pressed_this_frame {
            // the press already counted this frame as 1
            self.pressed_this_frame = false;
        } else if exit_key_down {
            self.held_frames += 1;
            if self.held_frames > EXIT_HOLD_FRAMES {
                self.state = GuardState::Exit;
            }
        } else {
            // key is up but no key-up event came: re-arm at 1 rather than disarming
            self.held_frames = 1;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // press on frame 1 and keep holding through frame `frames`
    fn hold(guard: &mut ExitGuard, frames: u32) -> GuardState {
        guard.exit_key_down();
        let mut state = guard.tick(true);
        for _ in 1..frames {
            state = guard.tick(true);
        }
        state
    }

    #[test]
    fn test_idle_by_default() {
        let mut guard = ExitGuard::new();
        assert_eq!(guard.state(), GuardState::Idle);
        assert!(!guard.message_visible());
        assert_eq!(guard.tick(true), GuardState::Idle);
        assert_eq!(guard.held_frames(), 0);
    }

    #[test]
    fn test_press_arms_and_shows_hint() {
        let mut guard = ExitGuard::new();
        guard.exit_key_down();
        assert_eq!(guard.state(), GuardState::Escalating);
        assert!(guard.message_visible());
        assert_eq!(guard.held_frames(), 1);
        guard.tick(true);
        assert_eq!(guard.held_frames(), 1);
        guard.tick(true);
        assert_eq!(guard.held_frames(), 2);
    }

    #[test]
    fn test_holding_181_frames_exits() {
        let mut guard = ExitGuard::new();
        assert_eq!(hold(&mut guard, 180), GuardState::Escalating);
        assert_eq!(guard.held_frames(), 180);
        assert_eq!(guard.tick(true), GuardState::Exit);
        assert_eq!(guard.state(), GuardState::Exit);
    }

    #[test]
    fn test_release_at_179_returns_to_idle() {
        let mut guard = ExitGuard::new();
        assert_eq!(hold(&mut guard, 179), GuardState::Escalating);
        guard.exit_key_up();
        assert_eq!(guard.state(), GuardState::Idle);
        assert_eq!(guard.held_frames(), 0);
        assert!(!guard.message_visible());
        assert_eq!(guard.tick(false), GuardState::Idle);
    }

    #[test]
    fn test_release_at_180_does_not_exit() {
        let mut guard = ExitGuard::new();
        assert_eq!(hold(&mut guard, 180), GuardState::Escalating);
        guard.exit_key_up();
        for _ in 0..300 {
            assert_eq!(guard.tick(false), GuardState::Idle);
        }
    }

    #[test]
    fn test_hint_hides_but_guard_stays_armed() {
        let mut guard = ExitGuard::new();
        hold(&mut guard, 179);
        assert!(guard.message_visible());
        guard.tick(true); // frame 180, timer runs out
        assert!(!guard.message_visible());
        assert_eq!(guard.state(), GuardState::Escalating);
        assert_eq!(guard.tick(true), GuardState::Exit);
    }

    #[test]
    fn test_missed_key_up_rearms_to_one() {
        let mut guard = ExitGuard::new();
        hold(&mut guard, 100);
        assert_eq!(guard.held_frames(), 100);
        // key physically up, no key-up event
        assert_eq!(guard.tick(false), GuardState::Escalating);
        assert_eq!(guard.held_frames(), 1);
        // holding again starts counting from there
        for _ in 0..180 {
            guard.tick(true);
        }
        assert_eq!(guard.held_frames(), 181);
        assert_eq!(guard.state(), GuardState::Exit);
    }

    #[test]
    fn test_second_press_resets_the_hold() {
        let mut guard = ExitGuard::new();
        hold(&mut guard, 150);
        guard.exit_key_down();
        assert_eq!(guard.held_frames(), 1);
        assert!(guard.message_visible());
        assert_eq!(hold(&mut guard, 180), GuardState::Escalating);
    }

    #[test]
    fn test_exit_is_terminal() {
        let mut guard = ExitGuard::new();
        hold(&mut guard, 181);
        assert_eq!(guard.state(), GuardState::Exit);
        guard.exit_key_up();
        guard.exit_key_down();
        assert_eq!(guard.tick(false), GuardState::Exit);
    }
}
