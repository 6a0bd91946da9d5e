//! Text encoding selection shared by the reader and writer

use crate::error::{CsvError, Result};
use encoding_rs::Encoding;

pub use encoding_rs::{UTF_8, WINDOWS_1252};

/// Default encoding for both directions
///
/// Windows-1252 is what spreadsheet tools expect when importing CSV on
/// Western locales. Readers still honour a byte order mark if one is present.
pub static DEFAULT_ENCODING: &Encoding = WINDOWS_1252;

/// Resolve a WHATWG encoding label such as `"utf-8"` or `"latin1"`
///
/// # Examples
///
/// ```
/// use csvstream::encoding::{encoding_for_label, WINDOWS_1252};
///
/// assert_eq!(encoding_for_label("latin1").unwrap(), WINDOWS_1252);
/// assert!(encoding_for_label("not-a-charset").is_err());
/// ```
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CsvError::UnknownEncoding(label.to_string()))
}
