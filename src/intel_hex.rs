use std::fmt;

use thiserror::Error;

use crate::{
    config::BytesPerRow,
    hexcodec::{self, HexError},
};

/// The terminating record of every Intel HEX file.
pub const EOF_RECORD: &str = ":00000001FF";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntelHexError {
    #[error("Malformed row '{row}': {reason}")]
    MalformedRow { row: String, reason: HexError },
    #[error("Row of {0} bytes does not fit in a record")]
    RowTooLong(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Data = 0x00,
    EndOfFile = 0x01,
}

/// A single Intel HEX record, e.g. `:0200000000FFFF`.
///
/// Holds at most 255 data bytes, so the byte count field always matches the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    address: u16,
    record_type: RecordType,
    data: Vec<u8>,
}

impl Record {
    pub fn data(address: u16, data: Vec<u8>) -> Result<Self, IntelHexError> {
        if data.len() > u8::MAX as usize {
            return Err(IntelHexError::RowTooLong(data.len()));
        }
        Ok(Self {
            address,
            record_type: RecordType::Data,
            data,
        })
    }

    pub fn end_of_file() -> Self {
        Self {
            address: 0,
            record_type: RecordType::EndOfFile,
            data: vec![],
        }
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_count(&self) -> u8 {
        self.data.len() as u8
    }

    /// Two's complement of the low byte of the sum of all other record bytes.
    pub fn checksum(&self) -> u8 {
        let [address_hi, address_lo] = self.address.to_be_bytes();
        let sum = [
            self.byte_count(),
            address_hi,
            address_lo,
            self.record_type as u8,
        ]
        .iter()
        .chain(self.data.iter())
        .fold(0u8, |acc, b| acc.wrapping_add(*b));

        sum.wrapping_neg()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ":{:02X}{:04X}{:02X}{}{:02X}",
            self.byte_count(),
            self.address,
            self.record_type as u8,
            hexcodec::bytes_to_hex(&self.data),
            self.checksum()
        )
    }
}

/// Encode rows of hex digits as data records starting at `origin`, followed by the EOF
/// record.
///
/// The address advances by the number of bytes in each row and wraps around at 0x10000.
#[tracing::instrument(skip(rows))]
pub fn encode_rows<'a, I>(rows: I, origin: u16) -> Result<Vec<Record>, IntelHexError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = vec![];
    let mut address = origin;

    for row in rows {
        let data = hexcodec::hex_to_bytes(row).map_err(|reason| IntelHexError::MalformedRow {
            row: row.to_owned(),
            reason,
        })?;
        let record = Record::data(address, data)?;
        address = address.wrapping_add(record.byte_count() as u16);
        records.push(record);
    }
    records.push(Record::end_of_file());

    Ok(records)
}

/// Encode a program image as data records of `row` bytes each, followed by the EOF record.
#[tracing::instrument(skip(program))]
pub fn encode_bytes(program: &[u8], row: BytesPerRow, origin: u16) -> Vec<Record> {
    let mut records = vec![];
    let mut address = origin;

    for data in program.chunks(row.bytes()) {
        // At most 32 bytes, always a valid record.
        let record = Record {
            address,
            record_type: RecordType::Data,
            data: data.to_vec(),
        };
        address = address.wrapping_add(record.byte_count() as u16);
        records.push(record);
    }
    records.push(Record::end_of_file());

    records
}

/// Render records as Intel HEX text, one record per line.
pub fn to_text(records: &[Record]) -> String {
    records.iter().map(|r| format!("{}\n", r)).collect()
}
