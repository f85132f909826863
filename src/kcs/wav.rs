use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use hound::{SampleFormat, WavSpec, WavWriter};

use super::{Encoder, KcsError, SampleSink, CENTER};

/// Mono 8-bit PCM at `framerate` Hz.
pub fn wav_spec(framerate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: framerate,
        bits_per_sample: 8,
        sample_format: SampleFormat::Int,
    }
}

/// Writes unsigned 8-bit samples into a WAV container.
pub struct WavSink<W: Write + Seek> {
    writer: WavWriter<W>,
}

impl WavSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P, framerate: u32) -> Result<Self, hound::Error> {
        Ok(Self {
            writer: WavWriter::create(path, wav_spec(framerate))?,
        })
    }
}

impl<W: Write + Seek> WavSink<W> {
    pub fn new(inner: W, framerate: u32) -> Result<Self, hound::Error> {
        Ok(Self {
            writer: WavWriter::new(inner, wav_spec(framerate))?,
        })
    }

    /// Update the WAV header and flush the underlying writer.
    pub fn finalize(self) -> Result<(), hound::Error> {
        self.writer.finalize()
    }
}

impl<W: Write + Seek> SampleSink for WavSink<W> {
    type Error = hound::Error;

    fn write_samples(&mut self, samples: &[u8]) -> Result<(), Self::Error> {
        // hound takes 8-bit samples as signed and stores them offset by 128
        for sample in samples {
            self.writer
                .write_sample(sample.wrapping_sub(CENTER) as i8)?;
        }
        Ok(())
    }
}

/// Encode `data` with `encoder` into a WAV file at `path`.
#[tracing::instrument(skip(encoder, data))]
pub fn write_wav(path: &Path, encoder: &Encoder, data: &[u8]) -> Result<(), KcsError> {
    let mut sink = WavSink::create(path, encoder.config().framerate)?;
    encoder.write_stream(&mut sink, data)?;
    sink.finalize()?;
    Ok(())
}
