// Procedural sound: every tone and the ambient drone are computed from sines
// at startup, no audio files involved. Nothing in here touches a device, so
// all of it runs fine under `cargo test`.

pub mod ambient;
pub mod bank;
pub mod tone;

use crate::shared::SAMPLE_RATE;

pub use ambient::synthesize_ambient;
pub use bank::{BankEntry, SoundBank};
pub use tone::{Timbre, ToneParams};

/// Signed 16-bit stereo PCM at `SAMPLE_RATE`, left/right per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcmBuffer {
    pub frames: Vec<[i16; 2]>,
}

impl PcmBuffer {
    // scale a mono signal in roughly [-1, 1] to i16 and duplicate it to both channels
    pub fn from_mono(signal: impl IntoIterator<Item = f64>) -> Self {
        let frames = signal
            .into_iter()
            .map(|s| {
                let v = to_i16(s * i16::MAX as f64);
                [v, v]
            })
            .collect();
        Self { frames }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames.len() as f64 / SAMPLE_RATE as f64
    }
}

// number of frames for `duration` seconds, truncated like an int cast
pub fn frame_count(duration: f64) -> usize {
    (SAMPLE_RATE as f64 * duration) as usize
}

// time in seconds of frame `i`
#[inline]
pub fn frame_time(i: usize) -> f64 {
    i as f64 / SAMPLE_RATE as f64
}

#[inline]
fn to_i16(x: f64) -> i16 {
    // truncates toward zero after clamping, same as a plain int16 cast of an in-range value
    x.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}
