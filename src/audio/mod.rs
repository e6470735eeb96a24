use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::AudioCommand;
use crate::shared::SAMPLE_RATE;

mod engine;
mod frame;
mod sample_buffer;
mod sample_id;
mod voice;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;
pub use sample_id::SampleId;

use engine::Engine;

const PREFERRED_CHANNELS: u16 = 2;
const PREFERRED_BUFFER_FRAMES: u32 = 2048;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _output_stream: cpal::Stream, // playback stops when this drops
}

impl AudioHandle {
    pub fn send(&self, cmd: AudioCommand) {
        if self.tx.try_send(cmd).is_err() {
            log::warn!("audio command queue full, dropping command");
        }
    }

    /// Rate the device actually runs at; buffers must be registered at this rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let (config, sample_format) = choose_config(&device)?;

    let sample_rate = config.sample_rate.0;
    let channels = config.channels as usize;
    log::info!(
        "audio: {} @ {} Hz, {} channels, {:?}, buffer {:?}",
        device.name().unwrap_or_else(|_| "unknown device".into()),
        sample_rate,
        channels,
        sample_format,
        config.buffer_size,
    );

    let output_stream = match sample_format {
        cpal::SampleFormat::F32 => build_output_stream::<f32>(&device, &config, rx, channels)?,
        cpal::SampleFormat::I16 => build_output_stream::<i16>(&device, &config, rx, channels)?,
        cpal::SampleFormat::U16 => build_output_stream::<u16>(&device, &config, rx, channels)?,
        other => anyhow::bail!("unsupported sample format {other:?} (f32, i16 and u16 only)"),
    };
    output_stream.play().context("failed to play output stream")?;

    Ok(AudioHandle {
        tx,
        sample_rate,
        _output_stream: output_stream,
    })
}

// Ask for 44.1k stereo with a 2048 frame buffer; take the device default otherwise
fn choose_config(device: &cpal::Device) -> anyhow::Result<(cpal::StreamConfig, cpal::SampleFormat)> {
    let supported: Vec<_> = device
        .supported_output_configs()
        .context("could not query output configs")?
        .collect();

    let preferred = supported.into_iter().find(|c| {
        c.channels() == PREFERRED_CHANNELS
            && c.min_sample_rate().0 <= SAMPLE_RATE
            && c.max_sample_rate().0 >= SAMPLE_RATE
            && matches!(
                c.sample_format(),
                cpal::SampleFormat::F32 | cpal::SampleFormat::I16 | cpal::SampleFormat::U16
            )
    });

    if let Some(range) = preferred {
        let buffer_size = match range.buffer_size() {
            cpal::SupportedBufferSize::Range { min, max }
                if (*min..=*max).contains(&PREFERRED_BUFFER_FRAMES) =>
            {
                cpal::BufferSize::Fixed(PREFERRED_BUFFER_FRAMES)
            }
            _ => cpal::BufferSize::Default,
        };
        let supported = range.with_sample_rate(cpal::SampleRate(SAMPLE_RATE));
        let sample_format = supported.sample_format();
        let mut config: cpal::StreamConfig = supported.into();
        config.buffer_size = buffer_size;
        return Ok((config, sample_format));
    }

    let fallback = device.default_output_config().context("no default output config")?;
    log::info!("audio: no stereo 44.1 kHz config, using device default");
    let sample_format = fallback.sample_format();
    Ok((fallback.into(), sample_format))
}

// ── Output stream ─────────────────────────────────────────────────

fn build_output_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
) -> anyhow::Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let mut engine = Engine::new();
    // grown on the first callback if the host hands out bigger blocks
    let mut mix = vec![StereoFrame::zero(); PREFERRED_BUFFER_FRAMES as usize];

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels.max(1);
            if mix.len() < n_frames {
                mix.resize(n_frames, StereoFrame::zero());
            }
            let block = &mut mix[..n_frames];
            engine.render_block(block);
            write_interleaved(data, channels, block);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// spread stereo frames over however many channels the device has
fn write_interleaved<T>(data: &mut [T], channels: usize, frames: &[StereoFrame])
where
    T: Sample + FromSample<f32>,
{
    if channels == 0 {
        return;
    }
    for (out, f) in data.chunks_exact_mut(channels).zip(frames) {
        match out {
            [mono] => *mono = T::from_sample(f.left),
            [left, right, rest @ ..] => {
                *left = T::from_sample(f.left);
                *right = T::from_sample(f.right);
                rest.fill(T::EQUILIBRIUM);
            }
            [] => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<StereoFrame> {
        vec![
            StereoFrame { left: 0.5, right: -0.5 },
            StereoFrame { left: 1.0, right: 0.0 },
        ]
    }

    #[test]
    fn test_write_stereo_f32() {
        let mut data = vec![9.0f32; 4];
        write_interleaved(&mut data, 2, &frames());
        assert_eq!(data, vec![0.5, -0.5, 1.0, 0.0]);
    }

    #[test]
    fn test_write_surround_pads_with_silence() {
        let mut data = vec![9.0f32; 8];
        write_interleaved(&mut data, 4, &frames());
        assert_eq!(data, vec![0.5, -0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_write_mono_takes_left() {
        let mut data = vec![9.0f32; 2];
        write_interleaved(&mut data, 1, &frames());
        assert_eq!(data, vec![0.5, 1.0]);
    }

    #[test]
    fn test_write_i16() {
        let mut data = vec![1i16; 4];
        write_interleaved(&mut data, 2, &frames());
        assert_eq!(data[2], i16::MAX);
        assert_eq!(data[3], 0);
        assert!(data[0] > 16000 && data[1] < -16000);
    }
}
