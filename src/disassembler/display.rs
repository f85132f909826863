use super::OpcodeWord;
use crate::hexcodec;

/// The most recent `6rkk` load seen for a register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEntry {
    /// Position of the load in the program.
    pub index: usize,
    /// The `6r` part of the word.
    pub prefix: String,
    /// The loaded value.
    pub value: u32,
}

/// Last load for each of the registers V0-VF.
#[derive(Debug, Default)]
pub struct RegisterShadowTable {
    slots: [Option<LoadEntry>; 16],
}

impl RegisterShadowTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, register: usize, entry: LoadEntry) {
        self.slots[register] = Some(entry);
    }

    pub fn get(&self, register: usize) -> Option<&LoadEntry> {
        self.slots[register].as_ref()
    }
}

fn hex_digit(c: char) -> Option<usize> {
    c.to_digit(16).map(|d| d as usize)
}

/// Parse a `6rkk` word into its register and load entry.
fn parse_load(index: usize, word: &str) -> Option<(usize, LoadEntry)> {
    let mut chars = word.chars();
    if chars.next()? != '6' {
        return None;
    }
    let register = hex_digit(chars.next()?)?;
    let value = chars.as_str();
    if !hexcodec::is_hex(value) {
        return None;
    }
    let value = u32::from_str_radix(value, 16).ok()?;

    Some((
        register,
        LoadEntry {
            index,
            prefix: word[..2].to_owned(),
            value,
        },
    ))
}

/// The register keyed by a `D` word, taken from its third digit.
fn draw_register(word: &str) -> Option<usize> {
    let mut chars = word.chars();
    if chars.next()? != 'D' {
        return None;
    }
    hex_digit(chars.nth(1)?)
}

/// Move sprites drawn by `Dxyn` by adding `delta` to the value most recently loaded into the
/// register named by the third digit of the draw.
///
/// The earlier `6rkk` load is rewritten, not the draw itself. Values saturate at `FF`. Each
/// patch is computed from the value originally loaded, so several draws through the same
/// load do not accumulate.
#[tracing::instrument(skip(words))]
pub fn adjust_display(words: &mut [OpcodeWord], delta: u16) {
    if delta == 0 {
        return;
    }

    // Pass 1: track loads and plan the patches.
    let mut table = RegisterShadowTable::new();
    let mut patches = vec![];
    for (index, word) in words.iter().enumerate() {
        let word = word.as_str();
        if let Some((register, entry)) = parse_load(index, word) {
            table.record(register, entry);
        }
        if let Some(register) = draw_register(word) {
            if let Some(load) = table.get(register) {
                let value = load.value.saturating_add(delta as u32).min(0xFF);
                patches.push((load.index, format!("{}{:02X}", load.prefix, value)));
            }
        }
    }

    // Pass 2: rewrite the loads.
    for (index, word) in patches {
        tracing::debug!("Patching load at {} to {}", index, word);
        words[index] = OpcodeWord::new(word);
    }
}
