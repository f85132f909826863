/// Hexadecimal text encoding and decoding of bytes.
pub mod hexcodec;

/// Intel HEX records.
pub mod intel_hex;

/// Translates CHIP-8 machine code to mnemonic listings.
///
/// The steps are:
/// 1. **Relocation** - moving jump, call and index targets to a new origin
/// 2. **Display adjustment** - shifting the registers used as sprite draw coordinates
/// 3. **Decoding** - translating each opcode word into a mnemonic
pub mod disassembler;

/// Kansas City Standard audio encoding.
pub mod kcs;

/// Choices for the audio and Intel HEX settings.
pub mod config;

/// ROM splicing and program address summaries.
pub mod program;

/// Source discovery and output file layout.
pub mod files;

/// Binary images to hex, Intel HEX and mnemonic files.
pub mod bin2hex;

/// Hex files to WAV and Intel HEX files.
pub mod hex2wav;

/// Logging and chrome tracing setup.
pub mod instrumentation;
