// The middle layer owns all app state: the sound bank, the live shapes and the
// exit guard. The tui feeds it input events and renders whatever
// `display_state()` says; the audio thread only ever sees the commands it returns.

use rand::Rng;

use crate::audio::{SampleBuffer, SampleId};
use crate::audio_api::{AudioCommand, TriggerParams};
use crate::guard::{ExitGuard, GuardState};
use crate::scene::ShapeRegistry;
use crate::shared::{InputEvent, Key, MAX_SHAPES, screen_size_px};
use crate::synth::{PcmBuffer, SoundBank};

/// What the renderer needs for one frame.
pub struct DisplayState<'a> {
    pub shapes: &'a ShapeRegistry,
    pub show_exit_hint: bool,
}

pub struct Middle<R: Rng> {
    rng: R,
    bank: SoundBank,
    shapes: ShapeRegistry,
    guard: ExitGuard,
    screen_width: u32,
    screen_height: u32,
}

impl<R: Rng> Middle<R> {
    pub fn new(bank: SoundBank, rng: R, cols: u16, rows: u16) -> Self {
        let (screen_width, screen_height) = screen_size_px(cols, rows);
        Self {
            rng,
            bank,
            shapes: ShapeRegistry::new(MAX_SHAPES),
            guard: ExitGuard::new(),
            screen_width,
            screen_height,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<AudioCommand> {
        match event {
            InputEvent::KeyDown { key: Key::Trigger, .. } => self.trigger().into_iter().collect(),
            InputEvent::KeyDown { key: Key::Exit, held_over: false } => {
                self.guard.exit_key_down();
                log::info!("exit key down, hold to quit");
                vec![]
            }
            InputEvent::KeyDown { key: Key::Exit, held_over: true } => vec![],
            InputEvent::KeyUp(Key::Exit) => {
                if self.guard.state() == GuardState::Escalating {
                    log::info!("exit key released after {} frames", self.guard.held_frames());
                }
                self.guard.exit_key_up();
                vec![]
            }
            InputEvent::KeyUp(Key::Trigger) => vec![],
            InputEvent::Resize { cols, rows } => {
                (self.screen_width, self.screen_height) = screen_size_px(cols, rows);
                log::info!("resized to {}x{} px", self.screen_width, self.screen_height);
                vec![]
            }
        }
    }

    // one random tone plus one new shape
    fn trigger(&mut self) -> Option<AudioCommand> {
        if let Some(evicted) = self.shapes.register_trigger(&mut self.rng, self.screen_width, self.screen_height) {
            log::trace!("{} shapes, evicted the oldest at ({}, {})", self.shapes.len(), evicted.x, evicted.y);
        }
        let entry = self.bank.pick(&mut self.rng)?;
        log::debug!("play {} {} ({})", entry.note, entry.params.timbre.label(), entry.id);
        Some(AudioCommand::Trigger(TriggerParams::one_shot(entry.id)))
    }

    /// Advance one frame: the exit guard first, then the shape fade.
    pub fn tick(&mut self, exit_key_down: bool) -> GuardState {
        let state = self.guard.tick(exit_key_down);
        if state == GuardState::Exit {
            log::info!("exit key held long enough, quitting");
        }
        self.shapes.update();
        state
    }

    pub fn display_state(&self) -> DisplayState<'_> {
        DisplayState {
            shapes: &self.shapes,
            show_exit_hint: self.guard.message_visible(),
        }
    }

    #[cfg(test)]
    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    #[cfg(test)]
    pub fn guard(&self) -> &ExitGuard {
        &self.guard
    }

    #[cfg(test)]
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}

/// Everything the engine needs before the first frame: every bank tone and the
/// ambient drone registered at the device rate, then the drone started on a loop.
pub fn startup_commands(bank: &SoundBank, ambient: &PcmBuffer, device_rate: u32) -> Vec<AudioCommand> {
    let mut cmds: Vec<AudioCommand> = bank
        .entries()
        .iter()
        .map(|entry| AudioCommand::RegisterSample {
            id: entry.id,
            buffer: SampleBuffer::from_pcm(&entry.pcm, device_rate),
        })
        .collect();

    let ambient_id = SampleId::next();
    cmds.push(AudioCommand::RegisterSample {
        id: ambient_id,
        buffer: SampleBuffer::from_pcm(ambient, device_rate),
    });
    cmds.push(AudioCommand::Trigger(TriggerParams::looped(ambient_id)));
    cmds
}
