//! # csvstream
//!
//! Streaming CSV record reader and writer.
//!
//! The reader is a permissive character-level tokenizer: quoted fields may
//! contain delimiters, doubled quotes and line breaks; stray quotes are kept
//! literally; blanks padding a field before a delimiter are trimmed. The
//! writer quotes only what needs quoting, so its output reads back to the
//! same fields.
//!
//! ## Reading
//!
//! ```no_run
//! use csvstream::CsvReader;
//!
//! let mut reader = CsvReader::open("data.csv")?;
//! for record in reader.records() {
//!     let record = record?;
//!     println!("{} fields, first = {:?}", record.len(), record.get(0));
//! }
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! A blank line ends [`CsvReader::records`] just like the end of the file.
//! [`CsvReader::records_skipping_blank_lines`] and [`CsvReader::read_outcome`]
//! keep going past it.
//!
//! ## Writing
//!
//! ```no_run
//! use csvstream::CsvWriter;
//!
//! let mut writer = CsvWriter::new("data.csv")?;
//! writer.write_record(["City", "State"])?;
//! writer.write_record(["New York", "NY"])?;
//! writer.write_values([Some("Springfield"), None])?;
//! writer.save()?;
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! Output is Windows-1252 with CRLF line breaks by default; see
//! [`CsvWriter::encoding`] and [`CsvWriter::line_terminator`].

pub mod csv;
pub mod csv_reader;
pub mod csv_writer;
pub mod encoding;
pub mod error;
pub mod types;

pub use csv_reader::{read_records, CsvReader, IntoRecords, RecordIter};
pub use csv_writer::{CsvWriter, LineTerminator};
pub use error::{CsvError, Result};
pub use types::{FieldValue, ReadOutcome, Record};
