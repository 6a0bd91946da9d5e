//! CSV file writing with streaming support and legacy encodings

use crate::csv::CsvEncoder;
use crate::encoding::DEFAULT_ENCODING;
use crate::error::Result;
use crate::types::FieldValue;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use log::{debug, trace, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Line separator written between records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    /// `\r\n`, what spreadsheet tools expect
    #[default]
    CrLf,
    /// `\n`
    Lf,
}

impl LineTerminator {
    /// The terminator text
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::CrLf => "\r\n",
            LineTerminator::Lf => "\n",
        }
    }
}

/// Streaming CSV record writer
///
/// Writes one physical line per record. The terminator goes *before* every
/// record but the first, so the output never ends with an empty line.
/// Text is encoded as Windows-1252 unless another encoding is chosen.
///
/// # Examples
///
/// ```no_run
/// use csvstream::CsvWriter;
///
/// let mut writer = CsvWriter::new("output.csv").unwrap();
/// writer.write_record(["Name", "Age", "City"]).unwrap();
/// writer.write_record(["Alice", "30", "New York, NY"]).unwrap();
/// writer.save().unwrap();
/// ```
pub struct CsvWriter<W: Write = File> {
    writer: BufWriter<W>,

    // State
    row_count: u64,
    // A record has been written on the current line
    line_open: bool,
    line: String,
    encoder: CsvEncoder,

    // Configuration
    encoding: &'static Encoding,
    line_terminator: LineTerminator,
}

impl CsvWriter<File> {
    /// Create (or truncate) a CSV file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvWriter;
    ///
    /// let mut writer = CsvWriter::new("data.csv").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!("Created CSV file {}", path.display());
        Ok(Self::from_writer(file))
    }

    /// Open a CSV file for appending, creating it if needed
    ///
    /// Records already in the file are left untouched. When the file does
    /// not end with a line feed, the first record written starts a new line.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(path)?;

        let existing = file.metadata()?.len();
        let mut line_open = false;
        if existing > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            line_open = last[0] != b'\n';
        }
        debug!(
            "Opened CSV file {} for appending ({} bytes present)",
            path.display(),
            existing
        );

        let mut writer = Self::from_writer(file);
        writer.line_open = line_open;
        Ok(writer)
    }
}

impl<W: Write> CsvWriter<W> {
    /// Write into an existing byte stream
    pub fn from_writer(writer: W) -> Self {
        CsvWriter {
            writer: BufWriter::new(writer),
            row_count: 0,
            line_open: false,
            line: String::with_capacity(1024),
            encoder: CsvEncoder::new(),
            encoding: DEFAULT_ENCODING,
            line_terminator: LineTerminator::default(),
        }
    }

    /// Set the output encoding (builder pattern)
    ///
    /// UTF-16LE and UTF-16BE are written as UTF-16 code units without a
    /// byte order mark.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvWriter;
    /// use csvstream::encoding::UTF_8;
    ///
    /// let mut writer = CsvWriter::new("data.csv").unwrap().encoding(UTF_8);
    /// ```
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the line terminator (builder pattern)
    pub fn line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.line_terminator = terminator;
        self
    }

    /// Write a record of strings
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvWriter;
    ///
    /// let mut writer = CsvWriter::new("data.csv").unwrap();
    /// writer.write_record(["Name", "Quote"]).unwrap();
    /// writer.write_record(vec!["Alice", "she said \"hi\""]).unwrap();
    /// writer.save().unwrap();
    /// ```
    pub fn write_record<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.line.clear();
        if self.line_open {
            self.line.push_str(self.line_terminator.as_str());
        }
        self.encoder.encode_record(fields, &mut self.line);
        self.write_line()?;

        self.line_open = true;
        self.row_count += 1;
        Ok(())
    }

    /// Write a record of arbitrary values
    ///
    /// `None` and [`FieldValue::Empty`] are written as empty fields.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::{CsvWriter, FieldValue};
    ///
    /// let mut writer = CsvWriter::new("data.csv").unwrap();
    /// writer.write_values([
    ///     FieldValue::from("Alice"),
    ///     FieldValue::from(30),
    ///     FieldValue::from(None::<f64>),
    /// ]).unwrap();
    /// ```
    pub fn write_values<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        let fields: Vec<String> = values.into_iter().map(|v| v.into().as_string()).collect();
        self.write_record(&fields)
    }

    /// Write multiple records at once
    pub fn write_records<I, R, S>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Get the number of records written
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Flush buffered output to the underlying stream
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and close the output
    ///
    /// Dropping the writer also closes it, but swallows flush errors.
    pub fn save(self) -> Result<()> {
        let rows = self.row_count;
        self.into_inner()?;
        debug!("Saved CSV output with {} records", rows);
        Ok(())
    }

    /// Flush and unwrap the underlying stream
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }

    fn write_line(&mut self) -> Result<()> {
        trace!("Writing record {} ({} chars)", self.row_count, self.line.len());
        if self.encoding == UTF_8 {
            self.writer.write_all(self.line.as_bytes())?;
            return Ok(());
        }

        // encode() falls back to UTF-8 for these, so serialize the code units here
        if self.encoding == UTF_16LE || self.encoding == UTF_16BE {
            let little_endian = self.encoding == UTF_16LE;
            let mut bytes = Vec::with_capacity(self.line.len() * 2);
            for unit in self.line.encode_utf16() {
                if little_endian {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                } else {
                    bytes.extend_from_slice(&unit.to_be_bytes());
                }
            }
            self.writer.write_all(&bytes)?;
            return Ok(());
        }

        let (bytes, _, unmappable) = self.encoding.encode(&self.line);
        if unmappable {
            warn!(
                "Record {} has characters not representable in {}; replaced with numeric references",
                self.row_count,
                self.encoding.name()
            );
        }
        self.writer.write_all(&bytes)?;
        Ok(())
    }
}
