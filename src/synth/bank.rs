use rand::Rng;
use rand::seq::SliceRandom;

use crate::audio::SampleId;

use super::PcmBuffer;
use super::tone::{Timbre, ToneParams, synthesize};

pub const BANK_VOLUME: f64 = 0.2;

// C major from C4 up to G5
pub const NOTES: [(&str, f64); 12] = [
    ("C4", 262.0),
    ("D4", 294.0),
    ("E4", 330.0),
    ("F4", 349.0),
    ("G4", 392.0),
    ("A4", 440.0),
    ("B4", 494.0),
    ("C5", 523.0),
    ("D5", 587.0),
    ("E5", 659.0),
    ("F5", 698.0),
    ("G5", 784.0),
];

pub fn duration_for(timbre: Timbre) -> f64 {
    match timbre {
        Timbre::Bell => 0.4,
        Timbre::Soft => 0.5,
        Timbre::Bouncy => 0.3,
        Timbre::Normal => 0.4,
    }
}

#[derive(Clone, Debug)]
pub struct BankEntry {
    pub id: SampleId,
    pub note: &'static str,
    pub params: ToneParams,
    pub pcm: PcmBuffer,
}

/// Every note in every timbre, rendered once at startup and never touched again.
#[derive(Clone, Debug)]
pub struct SoundBank {
    entries: Vec<BankEntry>,
}

impl SoundBank {
    pub fn build() -> Self {
        let entries = NOTES
            .iter()
            .flat_map(|&(note, frequency)| {
                Timbre::ALL.into_iter().map(move |timbre| {
                    let params = ToneParams::new(frequency, duration_for(timbre), BANK_VOLUME, timbre);
                    BankEntry {
                        id: SampleId::next(),
                        note,
                        params,
                        pcm: synthesize(&params),
                    }
                })
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[BankEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Uniform pick over all entries.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&BankEntry> {
        self.entries.choose(rng)
    }
}
