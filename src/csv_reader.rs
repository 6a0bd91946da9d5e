//! CSV file reading with streaming support

use crate::csv::{CharReader, CsvParser};
use crate::encoding::DEFAULT_ENCODING;
use crate::error::Result;
use crate::types::{ReadOutcome, Record};
use encoding_rs::Encoding;
use log::{debug, trace, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming CSV record reader
///
/// Reads one record at a time from any byte stream. Memory usage is bounded
/// by the largest record, not by the file.
///
/// # Blank lines
///
/// [`next_record`](CsvReader::next_record) cannot tell a blank line from the
/// end of the stream: both return `Ok(None)`, and after that the reader
/// stays exhausted. A blank line in the middle of a file therefore ends
/// reading. Use [`read_outcome`](CsvReader::read_outcome) or
/// [`records_skipping_blank_lines`](CsvReader::records_skipping_blank_lines)
/// when the rest of the file matters.
///
/// # Examples
///
/// ```no_run
/// use csvstream::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// for record in reader.records() {
///     let record = record.unwrap();
///     println!("{:?}", record);
/// }
/// ```
///
/// # With Headers
///
/// ```no_run
/// use csvstream::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv")
///     .unwrap()
///     .has_header(true);
///
/// for record in reader.records() {
///     // Data records only; the header row was consumed
///     let _record = record.unwrap();
/// }
///
/// if let Some(headers) = reader.headers() {
///     println!("Headers: {:?}", headers);
/// }
/// ```
pub struct CsvReader<R = File> {
    source: CharReader<R>,
    parser: CsvParser,

    // Set once next_record has reported "no record"
    exhausted: bool,
    row_count: u64,

    has_header: bool,
    headers: Option<Record>,
}

impl CsvReader<File> {
    /// Open a CSV file with the default encoding (Windows-1252, BOM aware)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvReader;
    ///
    /// let reader = CsvReader::open("data.csv").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_encoding(path, DEFAULT_ENCODING)
    }

    /// Open a CSV file decoded with `encoding`
    pub fn open_with_encoding<P: AsRef<Path>>(
        path: P,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(
            "Opened CSV file {} for reading ({})",
            path.display(),
            encoding.name()
        );
        Ok(Self::from_reader_with_encoding(file, encoding))
    }
}

impl<R: Read> CsvReader<R> {
    /// Read from an existing byte stream with the default encoding
    pub fn from_reader(reader: R) -> Self {
        Self::from_reader_with_encoding(reader, DEFAULT_ENCODING)
    }

    /// Read from an existing byte stream decoded with `encoding`
    pub fn from_reader_with_encoding(reader: R, encoding: &'static Encoding) -> Self {
        CsvReader {
            source: CharReader::new(reader, encoding),
            parser: CsvParser::new(),
            exhausted: false,
            row_count: 0,
            has_header: false,
            headers: None,
        }
    }

    /// Set the text encoding (builder pattern)
    ///
    /// Only takes effect before the first record is read; later calls are
    /// ignored with a warning.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvReader;
    /// use csvstream::encoding::UTF_8;
    ///
    /// let reader = CsvReader::open("data.csv").unwrap().encoding(UTF_8);
    /// ```
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        if !self.source.set_encoding(encoding) {
            warn!(
                "Ignoring encoding change to {} after reading started",
                encoding.name()
            );
        }
        self
    }

    /// Indicate that the first record is a header row (builder pattern)
    ///
    /// The header record is stored and accessible via `headers()`; the
    /// record iterators skip it.
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Get header row if it has been read
    pub fn headers(&self) -> Option<&Record> {
        self.headers.as_ref()
    }

    /// Read the next record
    ///
    /// Returns `Ok(None)` at end of stream and also when a blank line is
    /// read. After the first `None` every later call returns `None`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::open("data.csv").unwrap();
    ///
    /// while let Some(record) = reader.next_record().unwrap() {
    ///     println!("{:?}", record);
    /// }
    /// ```
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.exhausted {
            return Ok(None);
        }
        match self.read_outcome()? {
            ReadOutcome::Record(record) => Ok(Some(record)),
            ReadOutcome::BlankLine => {
                debug!(
                    "Blank line after {} records ends reading",
                    self.row_count
                );
                self.exhausted = true;
                Ok(None)
            }
            ReadOutcome::EndOfStream => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    /// Read the next record, keeping blank lines apart from end of stream
    ///
    /// A blank line does not exhaust the reader here, so reading can carry on
    /// past it.
    pub fn read_outcome(&mut self) -> Result<ReadOutcome> {
        if self.exhausted {
            return Ok(ReadOutcome::EndOfStream);
        }

        let fields = self.parser.parse_record(&mut self.source)?;
        if fields.is_empty() {
            debug!("End of CSV stream after {} records", self.row_count);
            return Ok(ReadOutcome::EndOfStream);
        }

        let record = Record::new(fields);
        if record.is_blank() {
            return Ok(ReadOutcome::BlankLine);
        }

        trace!("Record {}: {} fields", self.row_count, record.len());
        if self.has_header && self.row_count == 0 {
            self.headers = Some(record.clone());
        }
        self.row_count += 1;
        Ok(ReadOutcome::Record(record))
    }

    /// Iterate over records until the first blank line or end of stream
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::open("data.csv").unwrap();
    ///
    /// for record in reader.records() {
    ///     println!("{:?}", record.unwrap());
    /// }
    /// ```
    pub fn records(&mut self) -> RecordIter<'_, R> {
        RecordIter {
            reader: self,
            skip_blank_lines: false,
        }
    }

    /// Iterate over every record, stepping over blank lines
    pub fn records_skipping_blank_lines(&mut self) -> RecordIter<'_, R> {
        RecordIter {
            reader: self,
            skip_blank_lines: true,
        }
    }

    /// Get the number of records read so far, header included
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Unwrap the underlying stream
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    /// Release the underlying stream
    pub fn close(self) {
        debug!("Closing CSV reader after {} records", self.row_count);
    }

    /// True right after the header row was returned by `next_record`
    fn just_read_header(&self) -> bool {
        self.has_header && self.row_count == 1
    }
}

/// Iterator over CSV records borrowed from a reader
pub struct RecordIter<'a, R> {
    reader: &'a mut CsvReader<R>,
    skip_blank_lines: bool,
}

impl<R: Read> Iterator for RecordIter<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = if self.skip_blank_lines {
                match self.reader.read_outcome() {
                    Ok(ReadOutcome::Record(record)) => Ok(Some(record)),
                    Ok(ReadOutcome::BlankLine) => continue,
                    Ok(ReadOutcome::EndOfStream) => Ok(None),
                    Err(e) => Err(e),
                }
            } else {
                self.reader.next_record()
            };

            match next {
                Ok(Some(record)) => {
                    if self.reader.just_read_header() {
                        continue;
                    }
                    return Some(Ok(record));
                }
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Owning iterator over CSV records
///
/// Drops the reader, and with it the underlying stream, as soon as the
/// sequence ends or an error is returned.
pub struct IntoRecords<R> {
    reader: Option<CsvReader<R>>,
}

impl<R: Read> Iterator for IntoRecords<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        loop {
            match reader.next_record() {
                Ok(Some(record)) => {
                    if reader.just_read_header() {
                        continue;
                    }
                    return Some(Ok(record));
                }
                Ok(None) => {
                    if let Some(reader) = self.reader.take() {
                        reader.close();
                    }
                    return None;
                }
                Err(e) => {
                    self.reader = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: Read> IntoIterator for CsvReader<R> {
    type Item = Result<Record>;
    type IntoIter = IntoRecords<R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoRecords { reader: Some(self) }
    }
}

/// Open `path` and iterate over its records
///
/// The file is closed once the iterator is exhausted, even if the iterator
/// itself is kept around.
///
/// # Examples
///
/// ```no_run
/// let count = csvstream::read_records("data.csv")
///     .unwrap()
///     .filter_map(|r| r.ok())
///     .count();
/// ```
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<IntoRecords<File>> {
    Ok(CsvReader::open(path)?.into_iter())
}
