/// Bytes of an RCA Studio ROM kept in front of a program.
pub const STUDIO_ROM_SIZE: usize = 1024;

/// Offset of the program data following a Studio ROM.
pub const STUDIO_PROGRAM_OFFSET: usize = 256;

/// How a ROM image is placed in front of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomPrefix<'a> {
    /// The whole ROM followed by the whole program.
    Full(&'a [u8]),
    /// The first 1024 bytes of an RCA Studio ROM followed by the program from offset 256.
    Studio(&'a [u8]),
}

/// Place an optional ROM in front of `program`.
#[tracing::instrument(skip(program, rom))]
pub fn splice(rom: Option<RomPrefix<'_>>, program: &[u8]) -> Vec<u8> {
    match rom {
        None => program.to_vec(),
        Some(RomPrefix::Full(rom)) => [rom, program].concat(),
        Some(RomPrefix::Studio(rom)) => {
            let rom = &rom[..rom.len().min(STUDIO_ROM_SIZE)];
            let program = program.get(STUDIO_PROGRAM_OFFSET..).unwrap_or(&[]);
            [rom, program].concat()
        }
    }
}

/// Summary of the memory a program occupies, e.g. `0200 - 02FF (1)`.
///
/// The count in parentheses is the number of 256 byte pages.
pub fn address_summary(origin: u16, len: usize) -> String {
    let end = (origin as usize + len).wrapping_sub(1) as u16;
    let pages = len.div_ceil(256);
    format!("{:04X} - {:04X} ({})", origin, end, pages)
}

/// A line of the index of converted programs.
pub fn index_line(name: &str, summary: &str) -> String {
    format!("{:.<70}{:<15}", name, summary)
}
