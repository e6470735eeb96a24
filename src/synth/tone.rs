use std::f64::consts::TAU;

use super::{PcmBuffer, frame_count, frame_time};

/// Harmonic recipe plus amplitude envelope that gives a tone its character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timbre {
    Bell,
    Soft,
    Bouncy,
    Normal,
}

impl Timbre {
    pub const ALL: [Timbre; 4] = [Timbre::Bell, Timbre::Soft, Timbre::Bouncy, Timbre::Normal];

    // (multiple of the base frequency, weight)
    pub fn harmonics(self) -> &'static [(f64, f64)] {
        match self {
            Timbre::Bell => &[(1.0, 1.0), (2.0, 0.3), (3.0, 0.2), (5.0, 0.1)],
            Timbre::Soft => &[(1.0, 1.0), (2.0, 0.1)],
            Timbre::Bouncy => &[(1.0, 1.0), (1.5, 0.2)],
            Timbre::Normal => &[(1.0, 1.0), (2.0, 0.3), (3.0, 0.2)],
        }
    }

    pub fn envelope(self, t: f64) -> f64 {
        match self {
            Timbre::Bell => (-4.0 * t).exp(),
            Timbre::Soft => (-2.0 * t).exp(),
            // 8 Hz tremolo on top of the decay
            Timbre::Bouncy => (-t).exp() * (1.0 + (TAU * 8.0 * t).sin()),
            Timbre::Normal => (-3.0 * t).exp(),
        }
    }

    /// Upper bound of `envelope(t)`; only the tremolo can exceed the plain decay.
    #[cfg(test)]
    pub fn envelope_ceiling(self, t: f64) -> f64 {
        match self {
            Timbre::Bouncy => 2.0 * (-t).exp(),
            _ => self.envelope(t),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timbre::Bell => "bell",
            Timbre::Soft => "soft",
            Timbre::Bouncy => "bouncy",
            Timbre::Normal => "normal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneParams {
    pub frequency: f64, // Hz
    pub duration: f64,  // seconds
    pub volume: f64,    // 0.0 to 1.0
    pub timbre: Timbre,
}

impl ToneParams {
    pub fn new(frequency: f64, duration: f64, volume: f64, timbre: Timbre) -> Self {
        Self { frequency, duration, volume, timbre }
    }

    // instantaneous value before volume and integer scaling
    pub fn signal_at(&self, t: f64) -> f64 {
        let raw: f64 = self
            .timbre
            .harmonics()
            .iter()
            .map(|&(multiple, weight)| weight * (TAU * self.frequency * multiple * t).sin())
            .sum();
        raw * self.timbre.envelope(t)
    }
}

/// Render a tone to stereo PCM. Pure: the same params always give the same buffer.
pub fn synthesize(params: &ToneParams) -> PcmBuffer {
    let n = frame_count(params.duration);
    PcmBuffer::from_mono((0..n).map(|i| params.signal_at(frame_time(i)) * params.volume))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::SAMPLE_RATE;

    fn params(timbre: Timbre) -> ToneParams {
        ToneParams::new(440.0, 0.4, 0.2, timbre)
    }

    fn peak(frames: &[[i16; 2]]) -> i32 {
        frames.iter().map(|f| (f[0] as i32).abs()).max().unwrap_or(0)
    }

    #[test]
    fn test_length_matches_duration() {
        for timbre in Timbre::ALL {
            for &duration in &[0.1, 0.3, 0.4, 0.5, 1.25] {
                let p = ToneParams::new(330.0, duration, 0.5, timbre);
                let expected = SAMPLE_RATE as f64 * duration;
                let len = synthesize(&p).len() as f64;
                assert!((len - expected).abs() <= 1.0, "{timbre:?} {duration}s gave {len}");
            }
        }
    }

    #[test]
    fn test_channels_identical() {
        for timbre in Timbre::ALL {
            let pcm = synthesize(&params(timbre));
            assert!(pcm.frames.iter().all(|[l, r]| l == r));
        }
    }

    #[test]
    fn test_full_volume_stays_in_range() {
        // weights sum to 1.6 for bell, so the raw product overshoots i16 and must be clamped
        for timbre in Timbre::ALL {
            let pcm = synthesize(&ToneParams::new(262.0, 0.5, 1.0, timbre));
            let peak = peak(&pcm.frames);
            assert!(peak <= 32768);
            assert!(peak > 0);
        }
    }

    #[test]
    fn test_is_deterministic() {
        for timbre in Timbre::ALL {
            assert_eq!(synthesize(&params(timbre)), synthesize(&params(timbre)));
        }
    }

    #[test]
    fn test_first_sample_is_silent() {
        // every component is a sine starting at phase 0
        for timbre in Timbre::ALL {
            assert_eq!(synthesize(&params(timbre)).frames[0], [0, 0]);
        }
    }

    #[test]
    fn test_envelope_decays() {
        for timbre in [Timbre::Bell, Timbre::Soft, Timbre::Normal] {
            let end = params(timbre).duration;
            assert!(timbre.envelope(end) < timbre.envelope(0.0));
            assert!(timbre.envelope_ceiling(end) < timbre.envelope_ceiling(0.0));
        }
        // bouncy ripples above 1 but its ceiling still decays
        assert!(Timbre::Bouncy.envelope_ceiling(0.3) < Timbre::Bouncy.envelope_ceiling(0.0));
    }

    #[test]
    fn test_tail_quieter_than_head() {
        let window = SAMPLE_RATE as usize / 50; // 20ms, several periods at 440Hz
        for timbre in [Timbre::Bell, Timbre::Soft, Timbre::Normal] {
            let pcm = synthesize(&params(timbre));
            let head = peak(&pcm.frames[..window]);
            let tail = peak(&pcm.frames[pcm.len() - window..]);
            assert!(tail < head, "{timbre:?}: tail {tail} head {head}");
        }
    }

    #[test]
    fn test_samples_bounded_by_envelope_ceiling() {
        for timbre in Timbre::ALL {
            let p = params(timbre);
            let weight_sum: f64 = timbre.harmonics().iter().map(|&(_, w)| w).sum();
            let pcm = synthesize(&p);
            for (i, frame) in pcm.frames.iter().enumerate() {
                let t = i as f64 / SAMPLE_RATE as f64;
                let bound = p.volume * 32767.0 * weight_sum * timbre.envelope_ceiling(t) + 1.0;
                assert!((frame[0] as f64).abs() <= bound, "{timbre:?} frame {i}");
            }
        }
    }

    #[test]
    fn test_bouncy_tremolo_reaches_zero() {
        // 1 + sin(2*pi*8t) is zero at t = 3/32 s
        let t = 3.0 / 32.0;
        assert!(Timbre::Bouncy.envelope(t).abs() < 1e-9);
    }
}
