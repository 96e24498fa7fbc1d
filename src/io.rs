//! Streaming readers and writers for files of fixed-length records.
//!
//! A record file is a plain concatenation of encoded records with no
//! header, separator or trailer. A trailing fragment shorter than one
//! record is a format error.

use crate::account::{AccountRecord, ACCOUNT_RECORD_LEN};
use crate::error::{PostingError, Result};
use crate::transaction::{TransactionRecord, TRANSACTION_RECORD_LEN};
use std::io::{self, BufWriter, Read, Write};
use std::marker::PhantomData;

/// A record type with a fixed encoded length.
pub trait FixedRecord: Sized {
    /// Encoded length in bytes.
    const LEN: usize;

    fn decode_record(bytes: &[u8]) -> Result<Self>;

    fn write_record<W: Write>(&self, writer: &mut W) -> Result<()>;
}

impl FixedRecord for AccountRecord {
    const LEN: usize = ACCOUNT_RECORD_LEN;

    fn decode_record(bytes: &[u8]) -> Result<Self> {
        AccountRecord::decode(bytes)
    }

    fn write_record<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.encode()?)?;
        Ok(())
    }
}

impl FixedRecord for TransactionRecord {
    const LEN: usize = TRANSACTION_RECORD_LEN;

    fn decode_record(bytes: &[u8]) -> Result<Self> {
        TransactionRecord::decode(bytes)
    }

    fn write_record<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.encode()?)?;
        Ok(())
    }
}

/// An iterator decoding records one at a time from a byte stream.
///
/// Iteration stops after the first error.
pub struct RecordReader<R, T> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
    _record: PhantomData<T>,
}

impl<R: Read, T: FixedRecord> RecordReader<R, T> {
    pub fn new(reader: R) -> Self {
        RecordReader {
            reader,
            buf: vec![0; T::LEN],
            done: false,
            _record: PhantomData,
        }
    }
}

impl<R: Read, T: FixedRecord> Iterator for RecordReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = match fill(&mut self.reader, &mut self.buf) {
            Ok(0) => None,
            Ok(n) if n < T::LEN => Some(Err(PostingError::ShortRecord {
                expected: T::LEN,
                actual: n,
            })),
            Ok(_) => Some(T::decode_record(&self.buf)),
            Err(e) => Some(Err(e.into())),
        };

        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}

/// Reads as many bytes as are available up to `buf.len()`.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Decodes every record in `reader`.
pub fn read_records<T: FixedRecord, R: Read>(reader: R) -> Result<Vec<T>> {
    RecordReader::new(reader).collect()
}

/// Encodes `records` back to back into `writer`.
///
/// Fails on the first record that cannot be encoded; bytes already handed to
/// `writer` for earlier records are not retracted.
pub fn write_records<T: FixedRecord, W: Write>(writer: W, records: &[T]) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for record in records {
        record.write_record(&mut writer)?;
    }
    writer.flush()?;
    Ok(())
}
