use super::frame::StereoFrame;
use crate::shared::SAMPLE_RATE;
use crate::synth::PcmBuffer;

#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // the audio data array, already at the device rate
}

impl SampleBuffer {
    // Convert a synthesized 16-bit buffer into engine frames at the device's rate
    pub fn from_pcm(pcm: &PcmBuffer, target_rate: u32) -> Self {
        let frames: Vec<StereoFrame> = pcm.frames.iter().map(|&p| StereoFrame::from_i16(p)).collect();
        let data = if target_rate != SAMPLE_RATE {
            resample_linear(&frames, SAMPLE_RATE, target_rate)
        } else {
            frames
        };
        Self { data }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

pub fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    // plain linear interpolation; the tones are smooth sines so it's good enough
    if source_rate == target_rate {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        // fractional position in the source buffer
        let src_pos = i as f64 / ratio; // ex. 3.7
        let idx = src_pos.floor() as usize; // ex. 3
        let frac = (src_pos - idx as f64) as f32; // ex. 0.7
        if idx >= frames.len().saturating_sub(1) { // past the last pair, hold the tail
            out.push(*frames.last().unwrap_or(&StereoFrame::zero()));
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame { // blend via frac
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}
