use std::f64::consts::TAU;

use super::{PcmBuffer, frame_count, frame_time};

pub const AMBIENT_SECONDS: f64 = 4.0;
pub const AMBIENT_GAIN: f64 = 0.1;

// C2, G2, C3, E3
pub const DRONE_FREQUENCIES: [f64; 4] = [65.4, 98.1, 130.8, 164.8];

const DECAY_AMP: f64 = 0.1;
const DECAY_RATE: f64 = 0.5;
const PULSE_AMP: f64 = 0.05;
const PULSE_HZ: f64 = 0.5;

fn drone_at(t: f64) -> f64 {
    let decay = (-DECAY_RATE * t).exp();
    let pulse = 1.0 + (TAU * PULSE_HZ * t).sin();
    DRONE_FREQUENCIES
        .iter()
        .map(|&f| {
            let s = (TAU * f * t).sin();
            DECAY_AMP * s * decay + PULSE_AMP * s * pulse
        })
        .sum()
}

/// The low background drone, meant to be played on an endless loop.
pub fn synthesize_ambient() -> PcmBuffer {
    let n = frame_count(AMBIENT_SECONDS);
    PcmBuffer::from_mono((0..n).map(|i| drone_at(frame_time(i)) * AMBIENT_GAIN))
}
