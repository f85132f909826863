//! Hexadecimal text files to Kansas City Standard WAV files and Intel HEX files.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    config::{BytesPerRow, Framerate, OnesFrequency, ZeroFrequency},
    files, hexcodec, intel_hex,
    kcs::{self, Encoder, KcsConfig},
    program::{self, RomPrefix},
};

#[derive(Args, Debug, Clone)]
pub struct HexToWavArgs {
    #[clap(short, long, default_value = ".")]
    #[clap(help = "Directory with the hexadecimal (.hex) files")]
    pub source: PathBuf,
    #[clap(short, long, default_value = ".")]
    #[clap(help = "Directory to write the converted files to")]
    pub target: PathBuf,
    #[clap(long)]
    #[clap(help = "Do not export WAV files")]
    pub no_wav: bool,
    #[clap(long, default_value = "2400", value_parser = OnesFrequency::from_str)]
    #[clap(help = "Frequency of a 1 bit in Hz [300, 500, 600, 1000, 1200, 2400, 4800, 9600]")]
    pub ones_freq: OnesFrequency,
    #[clap(long, default_value = "1200", value_parser = ZeroFrequency::from_str)]
    #[clap(help = "Frequency of a 0 bit in Hz [300, 500, 600, 1200, 2400, 4800, 9600]")]
    pub zero_freq: ZeroFrequency,
    #[clap(long, default_value = "22050", value_parser = Framerate::from_str)]
    #[clap(help = "Sample rate in Hz [4800, 9600, 11025, 22050, 44100, 48000]")]
    pub framerate: Framerate,
    #[clap(long, default_value = "225")]
    #[clap(help = "Amplitude of the square waves [0-255]")]
    pub amplitude: u8,
    #[clap(long, default_value = "2", value_parser = clap::value_parser!(u32).range(0..=60))]
    #[clap(help = "Seconds of carrier tone before the data [0-60]")]
    pub leader: u32,
    #[clap(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=60))]
    #[clap(help = "Seconds of carrier tone after the data [0-60]")]
    pub trailer: u32,
    #[clap(long)]
    #[clap(help = "Hexadecimal ROM file placed in front of every program")]
    pub rom: Option<PathBuf>,
    #[clap(long)]
    #[clap(help = "The ROM file is an RCA Studio ROM")]
    pub studio_rom: bool,
    #[clap(long)]
    #[clap(help = "Export Intel HEX files")]
    pub ihex: bool,
    #[clap(long, default_value = "16", value_parser = BytesPerRow::from_str)]
    #[clap(help = "Number of bytes per Intel HEX record [2, 4, 8, 16, 32]")]
    pub bytes_per_row: BytesPerRow,
    #[clap(long, default_value = "0000", value_parser = hexcodec::parse_hex_u16)]
    #[clap(help = "Start address of the program (hex)")]
    pub origin: u16,
    #[clap(long)]
    #[clap(help = "Also save Intel HEX files in a single directory")]
    pub flat_ihex_copy: bool,
}

impl HexToWavArgs {
    pub fn kcs_config(&self) -> KcsConfig {
        KcsConfig {
            framerate: self.framerate.hz(),
            ones_freq: self.ones_freq.hz(),
            zero_freq: self.zero_freq.hz(),
            amplitude: self.amplitude,
            leader_secs: self.leader,
            trailer_secs: self.trailer,
        }
    }
}

/// Read the ROM file, if one is given and exists.
fn read_rom(args: &HexToWavArgs) -> Result<Option<Vec<u8>>> {
    let Some(path) = &args.rom else {
        return Ok(None);
    };
    if !path.is_file() {
        tracing::warn!(
            "Rom file {} does not exist. Proceeding without rom file",
            path.display()
        );
        return Ok(None);
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    let rom = hexcodec::byte_tokens(&text)
        .with_context(|| format!("Invalid rom file {}", path.display()))?;
    tracing::info!("Using rom file {} ({} bytes)", path.display(), rom.len());

    Ok(Some(rom))
}

/// Collects the index of converted programs.
struct Index {
    lines: Vec<String>,
}

impl Index {
    fn add(&mut self, name: &str, summary: &str) {
        let line = program::index_line(name, summary);
        tracing::info!("{}", line);
        self.lines.push(line);
    }

    fn write(&self, target: &Path) -> Result<()> {
        let path = files::flat_path(&target.join("wav"), "Index", "Index", "txt")?;
        let contents = self
            .lines
            .iter()
            .map(|line| format!("{}\n", line))
            .collect::<String>();
        files::write(&path, &contents)
    }
}

fn convert_file(
    path: &Path,
    args: &HexToWavArgs,
    encoder: Option<&Encoder>,
    rom: Option<RomPrefix<'_>>,
    index: &mut Index,
) -> Result<()> {
    let name = files::program_name(path)?;
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let program = hexcodec::byte_tokens(&text)?;
    let data = program::splice(rom, &program);
    let summary = program::address_summary(args.origin, data.len());

    if let Some(encoder) = encoder {
        let wav_file = files::grouped_path(&args.target, "wav", &name, "wav")?;
        tracing::info!("Creating wav file {}", wav_file.display());
        kcs::wav::write_wav(&wav_file, encoder, &data)?;
        tracing::debug!(title = %summary, album = %name, "Wav metadata");
        index.add(&name, &summary);
    }

    if args.ihex {
        let text = intel_hex::to_text(&intel_hex::encode_bytes(
            &data,
            args.bytes_per_row,
            args.origin,
        ));
        let ihex_file = files::grouped_path(&args.target, "ihex", &name, "hex")?;
        tracing::info!("Writing Intel HEX file {}", ihex_file.display());
        files::write(&ihex_file, &text)?;
        if args.flat_ihex_copy {
            let copy = files::flat_path(&args.target, "ihex", &name, "hex")?;
            tracing::info!("Copying {} to {}", name, copy.display());
            files::write(&copy, &text)?;
        }
    }

    Ok(())
}

/// Convert every hexadecimal file in the source directory.
pub fn convert(args: &HexToWavArgs) -> Result<()> {
    let encoder = if args.no_wav {
        None
    } else {
        Some(Encoder::new(&args.kcs_config())?)
    };

    let rom = read_rom(args)?;
    let prefix = rom.as_deref().map(|rom| {
        if args.studio_rom {
            RomPrefix::Studio(rom)
        } else {
            RomPrefix::Full(rom)
        }
    });

    let sources = files::find_sources(&args.source, &["hex"])?;
    if sources.is_empty() {
        tracing::warn!("No hex files found in {}", args.source.display());
    }

    let mut index = Index { lines: vec![] };
    for path in sources {
        convert_file(&path, args, encoder.as_ref(), prefix, &mut index)
            .with_context(|| format!("Converting {} failed", path.display()))?;
    }
    if encoder.is_some() {
        index.write(&args.target)?;
    }

    Ok(())
}
