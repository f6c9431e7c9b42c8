//! Audio playback: base64 blob → file on disk → PCM → output device.
//!
//! Decoding goes through rodio's container probing, so whatever format the
//! speech service returns (WAV, MP3, FLAC, OGG) is accepted.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::speech::AudioBlob;

/// Decoded interleaved samples plus their format.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub channels: u16,
    pub sample_rate: u32,
    /// Bytes per sample in `samples`.
    pub sample_width: u16,
    pub samples: Vec<f32>,
}

impl PcmAudio {
    pub fn duration(&self) -> Duration {
        if self.channels == 0 || self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as f64 / f64::from(self.channels);
        Duration::from_secs_f64(frames / f64::from(self.sample_rate))
    }
}

/// Decode an audio file into PCM.
pub fn decode_file(path: &Path) -> Result<PcmAudio> {
    let file = File::open(path).map_err(|e| Error::file_access(path, e))?;
    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| Error::Decode(format!("{}: {e}", path.display())))?;

    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<f32> = decoder.collect();

    Ok(PcmAudio {
        channels,
        sample_rate,
        sample_width: std::mem::size_of::<f32>() as u16,
        samples,
    })
}

/// Something that can play a PCM buffer to completion.
pub trait AudioOutput {
    fn play(&mut self, audio: &PcmAudio) -> Result<()>;
}

/// Plays through the system's default output device.
#[derive(Debug, Default)]
pub struct RodioOutput;

impl AudioOutput for RodioOutput {
    fn play(&mut self, audio: &PcmAudio) -> Result<()> {
        // Held only for this playback; dropping it releases the device.
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Device(format!("Failed to open audio output: {e}")))?;

        let sink = Sink::connect_new(stream.mixer());
        sink.append(SamplesBuffer::new(
            audio.channels,
            audio.sample_rate,
            audio.samples.clone(),
        ));
        sink.sleep_until_end();
        stream.log_on_drop(false);
        Ok(())
    }
}

pub struct AudioPlayer<O> {
    output_path: PathBuf,
    output: O,
}

impl<O: AudioOutput> AudioPlayer<O> {
    pub fn new(output_path: impl Into<PathBuf>, output: O) -> Self {
        Self {
            output_path: output_path.into(),
            output,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Decode, persist and play `blob`, returning once playback has finished.
    pub fn play(&mut self, blob: &AudioBlob) -> Result<()> {
        let bytes = blob.decode()?;
        fs::write(&self.output_path, &bytes).map_err(|e| Error::file_access(&self.output_path, e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.output_path.display());

        let audio = decode_file(&self.output_path)?;
        info!(
            "Playing audio: {} ch, {} Hz, {:.1}s",
            audio.channels,
            audio.sample_rate,
            audio.duration().as_secs_f64()
        );

        let t_play = Instant::now();
        self.output.play(&audio)?;
        debug!("Playback finished ({:.0}ms)", t_play.elapsed().as_secs_f64() * 1000.0);
        Ok(())
    }
}
