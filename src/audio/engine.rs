use std::collections::HashMap;

use crate::audio_api::{AudioCommand, TriggerParams};

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::sample_id::SampleId;
use super::voice::Voice;

// room for a good handful of mashed keys before the voice list has to grow
const VOICE_CAPACITY: usize = 256;

struct PlayingVoice {
    sample_id: SampleId,
    voice: Voice,
}

/// Lives on the audio thread: owns every registered buffer and the voices playing them.
pub struct Engine {
    samples: HashMap<SampleId, SampleBuffer>,
    voices: Vec<PlayingVoice>, // no voice limit, every trigger gets its own
}

impl Engine {
    pub fn new() -> Self {
        Self {
            samples: HashMap::new(),
            voices: Vec::with_capacity(VOICE_CAPACITY),
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSample { id, buffer } => {
                self.samples.insert(id, buffer);
            }
            AudioCommand::Trigger(t) => self.trigger_voice(t),
        }
    }

    fn trigger_voice(&mut self, t: TriggerParams) {
        // ids come from the bank, an unknown one means it was never registered
        if !self.samples.contains_key(&t.sample_id) {
            return;
        }
        self.voices.push(PlayingVoice {
            sample_id: t.sample_id,
            voice: Voice::new(t.gain, t.looping),
        });
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    // fill one callback's worth of frames with the mix of every live voice
    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());

        for pv in &mut self.voices {
            if let Some(buffer) = self.samples.get(&pv.sample_id) {
                pv.voice.render_into(buffer, out);
            } else {
                pv.voice.active = false;
            }
        }
        self.voices.retain(|pv| pv.voice.active);

        for f in out.iter_mut() {
            *f = f.clamped();
        }
    }
}
