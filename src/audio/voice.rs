use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

/// One playing instance of a registered buffer.
#[derive(Clone, Debug)]
pub struct Voice {
    pub pos: usize,
    pub gain: f32,
    pub looping: bool,
    pub active: bool,
}

impl Voice {
    pub fn new(gain: f32, looping: bool) -> Self {
        Self {
            pos: 0,
            gain,
            looping,
            active: true,
        }
    }

    // mix this voice into the output block, advancing the playhead
    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        if !self.active {
            return;
        }
        let data = &buffer.data;
        if data.is_empty() {
            self.active = false;
            return;
        }

        for frame in out.iter_mut() {
            if self.pos >= data.len() {
                if self.looping {
                    self.pos = 0;
                } else {
                    self.active = false;
                    break;
                }
            }
            let sample = data[self.pos];
            frame.left += sample.left * self.gain;
            frame.right += sample.right * self.gain;
            self.pos += 1;
        }

        // one-shots that ended exactly on the block boundary
        if !self.looping && self.pos >= data.len() {
            self.active = false;
        }
    }
}
