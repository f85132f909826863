//! Binary program images to hex dumps, Intel HEX files and CHIP-8 mnemonic listings.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    config::BytesPerRow,
    disassembler::{disassemble_code, listing::Listing, TranslateOptions},
    files, hexcodec, intel_hex,
};

/// Extensions of the program images picked up from the source directory.
pub const BINARY_EXTENSIONS: &[&str] = &["bin", "c8", "ch8", "cos", "dat", "st2"];

#[derive(Args, Debug, Clone)]
pub struct BinToHexArgs {
    #[clap(short, long, default_value = ".")]
    #[clap(help = "Directory with the binary program images")]
    pub source: PathBuf,
    #[clap(short, long, default_value = ".")]
    #[clap(help = "Directory to write the converted files to")]
    pub target: PathBuf,
    #[clap(long)]
    #[clap(help = "Do not separate hex values with spaces")]
    pub no_space: bool,
    #[clap(long)]
    #[clap(help = "Also save hex files in a single directory")]
    pub flat_copy: bool,
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
    #[clap(long)]
    #[clap(help = "Export CHIP-8 mnemonic files")]
    pub mnemonic: bool,
    #[clap(long, value_parser = hexcodec::parse_hex_u16)]
    #[clap(help = "Relocate the program to this address (hex) in the mnemonic files")]
    pub relocate: Option<u16>,
    #[clap(long, default_value = "0", value_parser = hexcodec::parse_hex_u16)]
    #[clap(help = "Value (hex) added to the registers used by sprite draws")]
    pub display_adjust: u16,
}

impl Default for BinToHexArgs {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            target: PathBuf::from("."),
            no_space: false,
            flat_copy: false,
            ihex: false,
            bytes_per_row: BytesPerRow::default(),
            origin: 0x0000,
            flat_ihex_copy: false,
            mnemonic: false,
            relocate: None,
            display_adjust: 0,
        }
    }
}

/// The converted forms of one program.
#[derive(Debug, PartialEq, Eq)]
pub struct Conversion {
    pub hex: String,
    pub intel_hex: Option<String>,
    pub mnemonic: Option<String>,
}

/// Convert a single program image.
#[tracing::instrument(skip(program))]
pub fn convert_program(name: &str, program: &[u8], args: &BinToHexArgs) -> Conversion {
    let hex = hexcodec::hex_dump(program, !args.no_space);

    let intel_hex = args.ihex.then(|| {
        intel_hex::to_text(&intel_hex::encode_bytes(
            program,
            args.bytes_per_row,
            args.origin,
        ))
    });

    let mnemonic = args.mnemonic.then(|| {
        let entries = disassemble_code(
            program,
            TranslateOptions {
                origin: args.origin,
                relocate_to: args.relocate,
                display_adjust: args.display_adjust,
            },
        );
        Listing::new(name, entries).generate()
    });

    Conversion {
        hex,
        intel_hex,
        mnemonic,
    }
}

fn convert_file(path: &Path, args: &BinToHexArgs) -> Result<()> {
    let name = files::program_name(path)?;
    let program =
        std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let conversion = convert_program(&name, &program, args);

    let hex_file = files::grouped_path(&args.target, "hex", &name, "hex")?;
    tracing::info!("Writing hex file {}", hex_file.display());
    files::write(&hex_file, &conversion.hex)?;
    if args.flat_copy {
        let copy = files::flat_path(&args.target, "hex", &name, "hex")?;
        tracing::info!("Copying {} to {}", name, copy.display());
        files::write(&copy, &conversion.hex)?;
    }

    if let Some(intel_hex) = &conversion.intel_hex {
        let ihex_file = files::grouped_path(&args.target, "ihex", &name, "hex")?;
        tracing::info!("Writing Intel HEX file {}", ihex_file.display());
        files::write(&ihex_file, intel_hex)?;
        if args.flat_ihex_copy {
            let copy = files::flat_path(&args.target, "ihex", &name, "hex")?;
            tracing::info!("Copying {} to {}", name, copy.display());
            files::write(&copy, intel_hex)?;
        }
    }

    if let Some(mnemonic) = &conversion.mnemonic {
        let mnemonic_file = files::grouped_path(&args.target, "mnemonic", &name, "txt")?;
        tracing::info!("Writing mnemonic file {}", mnemonic_file.display());
        files::write(&mnemonic_file, mnemonic)?;
    }

    Ok(())
}

/// Convert every program image in the source directory.
pub fn convert(args: &BinToHexArgs) -> Result<()> {
    let sources = files::find_sources(&args.source, BINARY_EXTENSIONS)?;
    if sources.is_empty() {
        tracing::warn!("No binary files found in {}", args.source.display());
    }

    for path in sources {
        convert_file(&path, args).with_context(|| format!("Converting {} failed", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_convert_program_hex_only() {
        let conversion = convert_program("TEST", &[0x00, 0xE0, 0x12], &BinToHexArgs::default());
        assert_eq!(
            conversion,
            Conversion {
                hex: "00 E0 12".to_owned(),
                intel_hex: None,
                mnemonic: None,
            }
        );
    }

    #[test]
    fn test_convert_program_all_outputs() {
        let args = BinToHexArgs {
            no_space: true,
            ihex: true,
            bytes_per_row: BytesPerRow::Two,
            origin: 0x0200,
            mnemonic: true,
            ..BinToHexArgs::default()
        };
        let conversion = convert_program("TEST", &[0x00, 0xE0, 0x12, 0x00], &args);

        assert_eq!(conversion.hex, "00E01200");
        assert_eq!(
            conversion.intel_hex.as_deref(),
            Some(":0202000000E01C\n:020202001200E8\n:00000001FF\n")
        );
        let mnemonic = conversion.mnemonic.unwrap();
        let lines = mnemonic.lines().map(str::trim_end).collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "TEST",
                "",
                "Address   Opcode    Mnemonic",
                "0200      00E0      Clear",
                "0202      1200      Goto 200",
            ]
        );
    }
}
