//! Discrete configuration choices offered by the command line.
//!
//! The numeric values are the ones understood by the cassette interfaces the tools target,
//! e.g. the HUG1802/HEC1802/ETI-660 computers need 500/1000 Hz instead of the standard
//! 1200/2400 Hz.

use strum_macros::{Display, EnumIter, EnumString};

/// Frequency used for a logical 1 bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum OnesFrequency {
    #[strum(serialize = "300")]
    Hz300,
    #[strum(serialize = "500")]
    Hz500,
    #[strum(serialize = "600")]
    Hz600,
    #[strum(serialize = "1000")]
    Hz1000,
    #[strum(serialize = "1200")]
    Hz1200,
    #[default]
    #[strum(serialize = "2400")]
    Hz2400,
    #[strum(serialize = "4800")]
    Hz4800,
    #[strum(serialize = "9600")]
    Hz9600,
}

impl OnesFrequency {
    pub fn hz(self) -> u32 {
        match self {
            OnesFrequency::Hz300 => 300,
            OnesFrequency::Hz500 => 500,
            OnesFrequency::Hz600 => 600,
            OnesFrequency::Hz1000 => 1000,
            OnesFrequency::Hz1200 => 1200,
            OnesFrequency::Hz2400 => 2400,
            OnesFrequency::Hz4800 => 4800,
            OnesFrequency::Hz9600 => 9600,
        }
    }
}

/// Frequency used for a logical 0 bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum ZeroFrequency {
    #[strum(serialize = "300")]
    Hz300,
    #[strum(serialize = "500")]
    Hz500,
    #[strum(serialize = "600")]
    Hz600,
    #[default]
    #[strum(serialize = "1200")]
    Hz1200,
    #[strum(serialize = "2400")]
    Hz2400,
    #[strum(serialize = "4800")]
    Hz4800,
    #[strum(serialize = "9600")]
    Hz9600,
}

impl ZeroFrequency {
    pub fn hz(self) -> u32 {
        match self {
            ZeroFrequency::Hz300 => 300,
            ZeroFrequency::Hz500 => 500,
            ZeroFrequency::Hz600 => 600,
            ZeroFrequency::Hz1200 => 1200,
            ZeroFrequency::Hz2400 => 2400,
            ZeroFrequency::Hz4800 => 4800,
            ZeroFrequency::Hz9600 => 9600,
        }
    }
}

/// Sample rate of the generated audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum Framerate {
    #[strum(serialize = "4800")]
    Hz4800,
    #[strum(serialize = "9600")]
    Hz9600,
    #[strum(serialize = "11025")]
    Hz11025,
    #[default]
    #[strum(serialize = "22050")]
    Hz22050,
    #[strum(serialize = "44100")]
    Hz44100,
    #[strum(serialize = "48000")]
    Hz48000,
}

impl Framerate {
    pub fn hz(self) -> u32 {
        match self {
            Framerate::Hz4800 => 4800,
            Framerate::Hz9600 => 9600,
            Framerate::Hz11025 => 11025,
            Framerate::Hz22050 => 22050,
            Framerate::Hz44100 => 44100,
            Framerate::Hz48000 => 48000,
        }
    }
}

/// Number of data bytes in each Intel HEX record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum BytesPerRow {
    #[strum(serialize = "2")]
    Two,
    #[strum(serialize = "4")]
    Four,
    #[strum(serialize = "8")]
    Eight,
    #[default]
    #[strum(serialize = "16")]
    Sixteen,
    #[strum(serialize = "32")]
    ThirtyTwo,
}

impl BytesPerRow {
    pub fn bytes(self) -> usize {
        match self {
            BytesPerRow::Two => 2,
            BytesPerRow::Four => 4,
            BytesPerRow::Eight => 8,
            BytesPerRow::Sixteen => 16,
            BytesPerRow::ThirtyTwo => 32,
        }
    }

    /// Width of a row in hex digits.
    pub fn digits(self) -> usize {
        self.bytes() * 2
    }
}
