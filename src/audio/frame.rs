// The smallest unit of audio the mixer works in; one stereo frame
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn zero() -> Self { // just giving `default` a better name for clarity
        Self::default()
    }

    pub fn from_i16(pair: [i16; 2]) -> Self {
        const SCALE: f32 = 1.0 / 32768.0;
        Self {
            left: pair[0] as f32 * SCALE,
            right: pair[1] as f32 * SCALE,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            left: self.left.clamp(-1.0, 1.0),
            right: self.right.clamp(-1.0, 1.0),
        }
    }
}
