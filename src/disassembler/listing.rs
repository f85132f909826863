use super::MnemonicEntry;

/// Mnemonic report of a program.
#[derive(Debug)]
pub struct Listing {
    name: String,
    entries: Vec<MnemonicEntry>,
}

impl Listing {
    #[tracing::instrument(skip(entries))]
    pub fn new(name: &str, entries: Vec<MnemonicEntry>) -> Self {
        Self {
            name: name.to_owned(),
            entries,
        }
    }

    /// Generate a listing line from an entry
    ///
    /// E.g. `0200      00E0      Clear                         `
    pub fn generate_line(entry: &MnemonicEntry) -> String {
        format!(
            "{:<10}{:<10}{:<30}\n",
            format!("{:04X}", entry.address),
            entry.opcode.padded(),
            entry.mnemonic
        )
    }

    #[tracing::instrument(skip(self))]
    pub fn generate(&self) -> String {
        let mut str = String::new();
        str.push_str(&self.name);
        str.push_str("\n\n");
        str.push_str(&format!("{:<10}{:<10}{:<30}\n", "Address", "Opcode", "Mnemonic"));

        for entry in &self.entries {
            str.push_str(&Listing::generate_line(entry));
        }

        str
    }
}
