pub use crate::audio::{SampleBuffer, SampleId};

#[derive(Clone, Debug, PartialEq)]
pub struct TriggerParams {
    pub sample_id: SampleId,
    pub gain: f32,
    pub looping: bool, // true plays forever, there is no stop command
}

impl TriggerParams {
    pub fn one_shot(sample_id: SampleId) -> Self {
        Self { sample_id, gain: 1.0, looping: false }
    }

    pub fn looped(sample_id: SampleId) -> Self {
        Self { sample_id, gain: 1.0, looping: true }
    }
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't allocate or render sound inside the callback, so every
    // buffer is synthesized up front and handed over once under an id
    RegisterSample { id: SampleId, buffer: SampleBuffer },

    // Fire-and-forget playback of a registered buffer; voices overlap freely
    Trigger(TriggerParams),
}
