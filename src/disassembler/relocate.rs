use super::OpcodeWord;
use crate::hexcodec;

/// Rewrite the address operand of every `1nnn`, `2nnn`, `Annn` and `Bnnn` word so that a
/// program built for `old_origin` runs from `new_origin`.
///
/// The new operand is `(nnn + new_origin - old_origin) mod 0x10000` rendered without
/// padding, so a relocated word may be shorter or longer than four digits.
#[tracing::instrument(skip(words))]
pub fn relocate(words: &mut [OpcodeWord], old_origin: u16, new_origin: u16) {
    let offset = new_origin as i64 - old_origin as i64;
    if offset == 0 {
        return;
    }

    for word in words.iter_mut() {
        if let Some(relocated) = relocate_word(word, offset) {
            *word = relocated;
        }
    }
}

fn relocate_word(word: &OpcodeWord, offset: i64) -> Option<OpcodeWord> {
    let mut chars = word.as_str().chars();
    let kind = chars.next()?;
    if !matches!(kind, '1' | '2' | 'A' | 'B') {
        return None;
    }

    let operand = chars.as_str();
    if !hexcodec::is_hex(operand) {
        tracing::warn!("Skipping relocation of '{}'", word.as_str());
        return None;
    }
    let address = i64::from_str_radix(operand, 16).ok()?;
    let address = (address + offset).rem_euclid(0x10000);

    Some(OpcodeWord::new(format!("{}{:X}", kind, address)))
}
