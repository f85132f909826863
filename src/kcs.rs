//! Kansas City Standard audio encoding.
//!
//! Each byte is sent as a start bit, eight data bits (most significant first) and a parity
//! bit. Every bit is one full cycle of a square wave, at the ones frequency for a 1 and at
//! the zero frequency for a 0. Blocks of carrier tone (ones) lead and trail the data.
//!
//! See <http://en.wikipedia.org/wiki/Kansas_City_standard>.

use std::convert::Infallible;

use thiserror::Error;

use crate::{
    config::{Framerate, OnesFrequency, ZeroFrequency},
    hexcodec::{self, HexError},
};

/// 8-bit unsigned PCM writer.
pub mod wav;

/// Center point of the generated waves.
pub const CENTER: u8 = 128;

#[derive(Error, Debug)]
pub enum KcsError {
    #[error("A {freq} Hz pulse does not fit in a {framerate} Hz stream")]
    EmptyPulse { freq: u32, framerate: u32 },
    #[error("Wav error: {0}")]
    Wav(#[from] hound::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KcsConfig {
    /// Samples per second
    pub framerate: u32,
    /// Frequency of a 1 bit in Hz
    pub ones_freq: u32,
    /// Frequency of a 0 bit in Hz
    pub zero_freq: u32,
    /// Peak to peak amplitude of the square waves
    pub amplitude: u8,
    /// Seconds of carrier tone before the data
    pub leader_secs: u32,
    /// Seconds of carrier tone after the data
    pub trailer_secs: u32,
}

impl Default for KcsConfig {
    fn default() -> Self {
        Self {
            framerate: Framerate::default().hz(),
            ones_freq: OnesFrequency::default().hz(),
            zero_freq: ZeroFrequency::default().hz(),
            amplitude: 225,
            leader_secs: 2,
            trailer_secs: 0,
        }
    }
}

/// One cycle of a square wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulse(Vec<u8>);

impl Pulse {
    pub fn samples(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Create a single square wave cycle of `freq` Hz: `framerate / freq / 2` samples below
/// [`CENTER`] followed by as many above it.
#[tracing::instrument]
pub fn make_pulse(freq: u32, framerate: u32, amplitude: u8) -> Pulse {
    let half = framerate.checked_div(freq).unwrap_or(0) as usize / 2;
    let low = CENTER - amplitude / 2;
    let high = CENTER + amplitude / 2;

    let mut samples = vec![low; half];
    samples.resize(half * 2, high);
    Pulse(samples)
}

/// XOR of all bits of `byte`.
pub fn parity(byte: u8) -> u8 {
    (byte.count_ones() & 1) as u8
}

/// Destination of generated samples.
pub trait SampleSink {
    type Error;

    fn write_samples(&mut self, samples: &[u8]) -> Result<(), Self::Error>;
}

impl SampleSink for Vec<u8> {
    type Error = Infallible;

    fn write_samples(&mut self, samples: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(samples);
        Ok(())
    }
}

/// The pulses encoding one byte: start bit, eight data bits and the parity bit.
#[derive(Debug, Clone, Copy)]
pub struct EncodedByteFrame<'a> {
    pulses: [&'a Pulse; 10],
}

impl<'a> EncodedByteFrame<'a> {
    pub fn pulses(&self) -> &[&'a Pulse; 10] {
        &self.pulses
    }

    pub fn samples(&self) -> impl Iterator<Item = u8> + 'a {
        let pulses = self.pulses;
        pulses.into_iter().flat_map(|p| p.samples().iter().copied())
    }

    pub fn write_to<S: SampleSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        for pulse in self.pulses {
            sink.write_samples(pulse.samples())?;
        }
        Ok(())
    }
}

/// Encodes bytes with the two pulses computed once up front.
#[derive(Debug)]
pub struct Encoder {
    config: KcsConfig,
    one_pulse: Pulse,
    zero_pulse: Pulse,
}

impl Encoder {
    #[tracing::instrument]
    pub fn new(config: &KcsConfig) -> Result<Self, KcsError> {
        let one_pulse = make_pulse(config.ones_freq, config.framerate, config.amplitude);
        let zero_pulse = make_pulse(config.zero_freq, config.framerate, config.amplitude);

        for (freq, pulse) in [(config.ones_freq, &one_pulse), (config.zero_freq, &zero_pulse)] {
            if pulse.is_empty() {
                return Err(KcsError::EmptyPulse {
                    freq,
                    framerate: config.framerate,
                });
            }
        }

        Ok(Self {
            config: *config,
            one_pulse,
            zero_pulse,
        })
    }

    pub fn config(&self) -> &KcsConfig {
        &self.config
    }

    pub fn one_pulse(&self) -> &Pulse {
        &self.one_pulse
    }

    pub fn zero_pulse(&self) -> &Pulse {
        &self.zero_pulse
    }

    fn bit_pulse(&self, bit: bool) -> &Pulse {
        if bit {
            &self.one_pulse
        } else {
            &self.zero_pulse
        }
    }

    /// Encode a single byte.
    ///
    /// The parity bit is sent inverted: a zero pulse for odd parity, a one pulse for even.
    pub fn encode_byte(&self, byte: u8) -> EncodedByteFrame<'_> {
        let mut pulses = [&self.zero_pulse; 10];
        for (ix, pulse) in pulses[1..9].iter_mut().enumerate() {
            *pulse = self.bit_pulse(byte & (0x80 >> ix) != 0);
        }
        pulses[9] = self.bit_pulse(parity(byte) == 0);

        EncodedByteFrame { pulses }
    }

    /// Encode a hex byte token, e.g. `"A5"`. Empty tokens produce no frame.
    pub fn encode_token(&self, token: &str) -> Result<Option<EncodedByteFrame<'_>>, HexError> {
        if token.is_empty() {
            return Ok(None);
        }
        let byte = hexcodec::parse_byte(token)?;
        Ok(Some(self.encode_byte(byte)))
    }

    /// Number of one pulses making up one second of carrier tone.
    fn pulses_per_second(&self) -> usize {
        self.config.framerate as usize / self.one_pulse.len()
    }

    fn write_carrier<S: SampleSink>(&self, sink: &mut S, seconds: u32) -> Result<(), S::Error> {
        for _ in 0..seconds {
            for _ in 0..self.pulses_per_second() {
                sink.write_samples(self.one_pulse.samples())?;
            }
        }
        Ok(())
    }

    /// Write the leader, every byte of `data` and the trailer to `sink`.
    #[tracing::instrument(skip(self, sink, data))]
    pub fn write_stream<S: SampleSink>(&self, sink: &mut S, data: &[u8]) -> Result<(), S::Error> {
        self.write_carrier(sink, self.config.leader_secs)?;
        for byte in data {
            self.encode_byte(*byte).write_to(sink)?;
        }
        self.write_carrier(sink, self.config.trailer_secs)?;

        tracing::debug!("Encoded {} bytes", data.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn encoder(leader_secs: u32, trailer_secs: u32) -> Encoder {
        Encoder::new(&KcsConfig {
            leader_secs,
            trailer_secs,
            ..KcsConfig::default()
        })
        .unwrap()
    }

    /// The bits a frame encodes, telling pulses apart by identity.
    fn frame_bits(encoder: &Encoder, frame: &EncodedByteFrame) -> Vec<u8> {
        frame
            .pulses()
            .iter()
            .map(|p| std::ptr::eq(*p, encoder.one_pulse()) as u8)
            .collect()
    }

    #[test]
    fn test_make_pulse() {
        let pulse = make_pulse(1200, 22050, 225);
        assert_eq!(pulse.len(), 18);
        assert_eq!(&pulse.samples()[..9], &[16; 9]);
        assert_eq!(&pulse.samples()[9..], &[240; 9]);

        assert_eq!(make_pulse(2400, 22050, 225).len(), 8);
        assert_eq!(make_pulse(1000, 48000, 100).samples(), {
            let mut expected = vec![78; 24];
            expected.extend([178; 24]);
            expected
        });
    }

    #[test]
    fn test_make_pulse_amplitude_bounds() {
        let pulse = make_pulse(2400, 22050, 255);
        assert_eq!(&pulse.samples()[..4], &[1; 4]);
        assert_eq!(&pulse.samples()[4..], &[255; 4]);
        assert_eq!(make_pulse(2400, 22050, 0).samples(), &[128; 8]);
    }

    #[test]
    fn test_make_pulse_too_high() {
        assert!(make_pulse(9600, 4800, 225).is_empty());
        assert!(make_pulse(0, 4800, 225).is_empty());
        assert!(matches!(
            Encoder::new(&KcsConfig {
                framerate: 4800,
                ones_freq: 9600,
                ..KcsConfig::default()
            }),
            Err(KcsError::EmptyPulse { freq: 9600, .. })
        ));
    }

    #[test]
    fn test_parity() {
        for byte in 0..=255u8 {
            let mut ones = 0;
            for bit in 0..8 {
                ones += (byte >> bit) & 1;
            }
            assert_eq!(parity(byte), ones % 2, "{:#04x}", byte);
        }
    }

    #[test]
    fn test_encode_byte() {
        let encoder = encoder(0, 0);
        let tests = vec![
            // start, 8 data bits, inverted parity
            (0xA5, vec![0, 1, 0, 1, 0, 0, 1, 0, 1, 1]),
            (0x00, vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1]),
            (0xFF, vec![0, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
            (0x01, vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 0]),
            (0x80, vec![0, 1, 0, 0, 0, 0, 0, 0, 0, 0]),
        ];

        for (byte, expected) in tests {
            assert_eq!(frame_bits(&encoder, &encoder.encode_byte(byte)), expected);
        }
    }

    #[test]
    fn test_encode_token() {
        let encoder = encoder(0, 0);
        assert!(encoder.encode_token("").unwrap().is_none());

        let frame = encoder.encode_token("a5").unwrap().unwrap();
        assert_eq!(
            frame_bits(&encoder, &frame),
            frame_bits(&encoder, &encoder.encode_byte(0xA5))
        );
        assert!(encoder.encode_token("G1").is_err());
    }

    #[test]
    fn test_frame_samples() {
        let encoder = encoder(0, 0);
        let frame = encoder.encode_byte(0x00);
        let samples = frame.samples().collect::<Vec<_>>();

        let mut expected = encoder.zero_pulse().samples().repeat(9);
        expected.extend(encoder.one_pulse().samples());
        assert_eq!(samples, expected);
    }

    #[test]
    fn test_write_stream() {
        let encoder = encoder(1, 2);
        let mut samples: Vec<u8> = vec![];
        encoder.write_stream(&mut samples, &[0xA5, 0x00]).unwrap();

        // 22050 / 8 = 2756 one pulses per second
        let second = 2756 * 8;
        let one = encoder.one_pulse().len();
        let zero = encoder.zero_pulse().len();
        let data = (5 * zero + 5 * one) + (9 * zero + one);
        assert_eq!(samples.len(), second + data + 2 * second);

        assert_eq!(&samples[..second], encoder.one_pulse().samples().repeat(2756));
        let frame = encoder.encode_byte(0xA5).samples().collect::<Vec<_>>();
        assert_eq!(&samples[second..second + frame.len()], frame.as_slice());
        assert!(samples[second + data..]
            .chunks(one)
            .all(|c| c == encoder.one_pulse().samples()));
    }

    #[test]
    fn test_write_stream_without_carrier() {
        let encoder = encoder(0, 0);
        let mut samples: Vec<u8> = vec![];
        encoder.write_stream(&mut samples, &[]).unwrap();
        assert!(samples.is_empty());
    }
}
