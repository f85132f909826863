use std::{borrow::Cow, collections::HashMap, fmt};

use lazy_static::lazy_static;

use crate::hexcodec;

/// Rewriting of `Dxyn` sprite heights through the registers that feed them.
pub mod display;

/// Mnemonic report generation.
pub mod listing;

/// Rewriting of address operands for a new program origin.
pub mod relocate;

/// A CHIP-8 opcode in its textual form, e.g. `00E0`.
///
/// Words read from a program image have four digits, except for an odd trailing byte which
/// has two. Relocated words may have any number of digits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpcodeWord(String);

impl OpcodeWord {
    pub fn new(word: impl Into<String>) -> Self {
        Self(word.into().to_ascii_uppercase())
    }

    pub fn from_u16(word: u16) -> Self {
        Self(format!("{:04X}", word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The word left padded with `0` to four digits.
    pub fn padded(&self) -> Cow<'_, str> {
        if self.0.len() < 4 {
            Cow::Owned(format!("{:0>4}", self.0))
        } else {
            Cow::Borrowed(&self.0)
        }
    }
}

impl fmt::Display for OpcodeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.padded())
    }
}

/// A decoded CHIP-8 instruction.
///
/// Register operands are kept as their hex digit and address/byte operands as the verbatim
/// trailing digits of the opcode word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `0000`
    NoOp,
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `0nnn`, machine code subroutine
    Call(String),
    /// `1nnn`
    Goto(String),
    /// `2nnn`, CHIP-8 subroutine
    Do(String),
    /// `3xkk`
    SkipIfEqualImm { x: char, kk: String },
    /// `4xkk`
    SkipIfNotEqualImm { x: char, kk: String },
    /// `5xy0`
    SkipIfEqualReg { x: char, y: char },
    /// `6xkk`
    LoadImm { x: char, kk: String },
    /// `7xkk`
    AddImm { x: char, kk: String },
    /// `8xy0`
    Move { x: char, y: char },
    /// `8xy1`
    Or { x: char, y: char },
    /// `8xy2`
    And { x: char, y: char },
    /// `8xy3`, listed as `or`
    Xor { x: char, y: char },
    /// `8xy4`
    Add { x: char, y: char },
    /// `8xy5`
    Sub { x: char, y: char },
    /// `9xy0`
    SkipIfNotEqualReg { x: char, y: char },
    /// `Annn`
    LoadIndex(String),
    /// `Bnnn`
    GotoPlusV0(String),
    /// `Cxkk`
    Random { x: char, kk: String },
    /// `Dxyn`
    Show { x: char, y: char, n: char },
    /// `Ex9E`
    SkipIfKey(char),
    /// `ExA1`
    SkipIfNotKey(char),
    /// `Fx00`
    Pitch(char),
    /// `Fx07`
    ReadTimer(char),
    /// `Fx0A`
    WaitKey(char),
    /// `Fx15`
    SetTimer(char),
    /// `Fx18`
    SetTone(char),
    /// `Fx1E`
    AddIndex(char),
    /// `Fx29`
    LoadFont(char),
    /// `Fx33`
    StoreBcd(char),
    /// `Fx55`
    StoreRegs(char),
    /// `Fx65`
    LoadRegs(char),
    /// Anything not covered by the table above.
    Data,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::NoOp => write!(f, "NoOp"),
            Instruction::Clear => write!(f, "Clear"),
            Instruction::Return => write!(f, "Return"),
            Instruction::Call(nnn) => write!(f, "Call {}", nnn),
            Instruction::Goto(nnn) => write!(f, "Goto {}", nnn),
            Instruction::Do(nnn) => write!(f, "Do {}", nnn),
            Instruction::SkipIfEqualImm { x, kk } => write!(f, "Skip if V{} = {}", x, kk),
            Instruction::SkipIfNotEqualImm { x, kk } => write!(f, "Skip if not V{} = {}", x, kk),
            Instruction::SkipIfEqualReg { x, y } => write!(f, "Skip if V{} = V{}", x, y),
            Instruction::LoadImm { x, kk } => write!(f, "V{} = {}", x, kk),
            Instruction::AddImm { x, kk } => write!(f, "V{} = V{} + {}", x, x, kk),
            Instruction::Move { x, y } => write!(f, "V{} = V{}", x, y),
            Instruction::Or { x, y } | Instruction::Xor { x, y } => write!(f, "V{} or V{}", x, y),
            Instruction::And { x, y } => write!(f, "V{} and V{}", x, y),
            Instruction::Add { x, y } => write!(f, "V{}  = V{} + V{}", x, x, y),
            Instruction::Sub { x, y } => write!(f, "V{}  = V{} - V{}", x, x, y),
            Instruction::SkipIfNotEqualReg { x, y } => write!(f, "Skip if not V{} = V{}", x, y),
            Instruction::LoadIndex(nnn) => write!(f, "I = {}", nnn),
            Instruction::GotoPlusV0(nnn) => write!(f, "Goto {} + V0", nnn),
            Instruction::Random { x, kk } => write!(f, "V{} = random and {}", x, kk),
            Instruction::Show { x, y, n } => write!(f, "Show {} at V{}, V{}", n, x, y),
            Instruction::SkipIfKey(x) => write!(f, "Skip if V{} is key", x),
            Instruction::SkipIfNotKey(x) => write!(f, "Skip if not V{} is key", x),
            Instruction::Pitch(x) => write!(f, "Pitch = V{}", x),
            Instruction::ReadTimer(x) => write!(f, "V{} = Time", x),
            Instruction::WaitKey(x) => write!(f, "V{} = Key", x),
            Instruction::SetTimer(x) => write!(f, "Time = V{}", x),
            Instruction::SetTone(x) => write!(f, "Tone = V{}", x),
            Instruction::AddIndex(x) => write!(f, "I = I + V{}", x),
            Instruction::LoadFont(x) => write!(f, "I = Display V{}", x),
            Instruction::StoreBcd(x) => write!(f, "M(I)=DECML V{}", x),
            Instruction::StoreRegs(x) => write!(f, "M(I)=V0:V{}", x),
            Instruction::LoadRegs(x) => write!(f, "V0:V{} = M(I)", x),
            Instruction::Data => write!(f, "Data"),
        }
    }
}

type RegisterInstruction = fn(char) -> Instruction;

lazy_static! {
    /// `Ex..` instructions keyed by their low byte.
    static ref KEY_INSTRUCTIONS: HashMap<&'static str, RegisterInstruction> = {
        let mut map: HashMap<&'static str, RegisterInstruction> = HashMap::new();
        map.insert("9E", Instruction::SkipIfKey);
        map.insert("A1", Instruction::SkipIfNotKey);
        map
    };

    /// `Fx..` instructions keyed by their low byte.
    static ref MISC_INSTRUCTIONS: HashMap<&'static str, RegisterInstruction> = {
        let mut map: HashMap<&'static str, RegisterInstruction> = HashMap::new();
        map.insert("00", Instruction::Pitch);
        map.insert("07", Instruction::ReadTimer);
        map.insert("0A", Instruction::WaitKey);
        map.insert("15", Instruction::SetTimer);
        map.insert("18", Instruction::SetTone);
        map.insert("1E", Instruction::AddIndex);
        map.insert("29", Instruction::LoadFont);
        map.insert("33", Instruction::StoreBcd);
        map.insert("55", Instruction::StoreRegs);
        map.insert("65", Instruction::LoadRegs);
        map
    };
}

/// Decode an opcode word. Returns `None` only for an empty word.
///
/// The word is padded to four digits first. Every pattern without a table entry decodes to
/// [`Instruction::Data`].
#[tracing::instrument]
pub fn decode(word: &OpcodeWord) -> Option<Instruction> {
    if word.is_empty() {
        return None;
    }

    let opcode = word.padded();
    if !opcode.is_ascii() {
        return Some(Instruction::Data);
    }

    let digits = opcode.as_bytes();
    let x = digits[1] as char;
    let y = digits[2] as char;
    let n = digits[3] as char;
    let nnn = || opcode[1..].to_owned();
    let kk = || opcode[2..].to_owned();

    let ins = match digits[0] {
        b'0' if x != '0' => Instruction::Call(nnn()),
        b'0' => match &*opcode {
            "00E0" => Instruction::Clear,
            "00EE" => Instruction::Return,
            "0000" => Instruction::NoOp,
            _ => Instruction::Data,
        },
        b'1' => Instruction::Goto(nnn()),
        b'2' => Instruction::Do(nnn()),
        b'3' => Instruction::SkipIfEqualImm { x, kk: kk() },
        b'4' => Instruction::SkipIfNotEqualImm { x, kk: kk() },
        b'5' => Instruction::SkipIfEqualReg { x, y },
        b'6' => Instruction::LoadImm { x, kk: kk() },
        b'7' => Instruction::AddImm { x, kk: kk() },
        b'8' => match n {
            '0' => Instruction::Move { x, y },
            '1' => Instruction::Or { x, y },
            '2' => Instruction::And { x, y },
            '3' => Instruction::Xor { x, y },
            '4' => Instruction::Add { x, y },
            '5' => Instruction::Sub { x, y },
            _ => Instruction::Data,
        },
        b'9' => Instruction::SkipIfNotEqualReg { x, y },
        b'A' => Instruction::LoadIndex(nnn()),
        b'B' => Instruction::GotoPlusV0(nnn()),
        b'C' => Instruction::Random { x, kk: kk() },
        b'D' => Instruction::Show { x, y, n },
        b'E' => KEY_INSTRUCTIONS
            .get(&opcode[2..])
            .map_or(Instruction::Data, |ins| ins(x)),
        b'F' => MISC_INSTRUCTIONS
            .get(&opcode[2..])
            .map_or(Instruction::Data, |ins| ins(x)),
        _ => Instruction::Data,
    };

    Some(ins)
}

/// Mnemonic text of an opcode word, empty for an empty word.
pub fn mnemonic(word: &OpcodeWord) -> String {
    decode(word).map_or_else(String::new, |ins| ins.to_string())
}

/// One row of a mnemonic listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicEntry {
    pub address: u16,
    pub opcode: OpcodeWord,
    pub mnemonic: String,
}

/// Decode all words in program order, assigning addresses from `origin` in steps of two.
#[tracing::instrument(skip(words))]
pub fn create_mnemonics(words: &[OpcodeWord], origin: u16) -> Vec<MnemonicEntry> {
    let mut entries = vec![];
    let mut address = origin;

    for word in words {
        entries.push(MnemonicEntry {
            address,
            opcode: word.clone(),
            mnemonic: mnemonic(word),
        });
        address = address.wrapping_add(2);
    }

    entries
}

/// Options for translating a program image into mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslateOptions {
    /// Address the program image was built for.
    pub origin: u16,
    /// Address to move the program to, if any.
    pub relocate_to: Option<u16>,
    /// Amount added to the registers feeding `Dxyn` instructions.
    pub display_adjust: u16,
}

/// Translate a program image into mnemonics, relocating and adjusting the display first.
///
/// The listing addresses start at the new origin when the program is relocated.
#[tracing::instrument(skip(program))]
pub fn disassemble_code(program: &[u8], options: TranslateOptions) -> Vec<MnemonicEntry> {
    let mut words = hexcodec::opcode_words(program);

    let origin = match options.relocate_to {
        Some(new_origin) => {
            relocate::relocate(&mut words, options.origin, new_origin);
            new_origin
        }
        None => options.origin,
    };
    display::adjust_display(&mut words, options.display_adjust);

    create_mnemonics(&words, origin)
}
