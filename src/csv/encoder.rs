//! CSV encoding with minimal escaping

use super::{CR, DELIMITER, LF, QUOTE};

/// CSV encoder for writing properly escaped records
///
/// A field is quoted only when it contains a delimiter, a quote, or a line
/// break. Everything else is written verbatim, leading and trailing
/// whitespace included.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvEncoder;

impl CsvEncoder {
    /// Create a new CSV encoder
    pub fn new() -> Self {
        Self
    }

    /// Encode an entire record into `buffer`, without a line terminator
    pub fn encode_record<I, S>(&self, fields: I, buffer: &mut String)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                buffer.push(DELIMITER);
            }
            self.encode_field(field.as_ref(), buffer);
        }
    }

    /// Encode single field with proper quoting/escaping
    pub fn encode_field(&self, field: &str, buffer: &mut String) {
        if !Self::needs_quoting(field) {
            buffer.push_str(field);
            return;
        }

        buffer.reserve(field.len() + 2);
        buffer.push(QUOTE);
        for ch in field.chars() {
            if ch == QUOTE {
                // " -> ""
                buffer.push(QUOTE);
            }
            buffer.push(ch);
        }
        buffer.push(QUOTE);
    }

    /// Check if field requires quoting
    pub fn needs_quoting(field: &str) -> bool {
        field.contains([DELIMITER, QUOTE, CR, LF])
    }
}
