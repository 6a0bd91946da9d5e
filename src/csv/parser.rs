//! CSV tokenizer: quoting, escaped quotes, embedded newlines and the
//! trailing-whitespace heuristic

use super::chars::CharReader;
use super::{is_blank, CR, DELIMITER, LF, QUOTE};
use std::io::{self, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Unquoted,
    Quoted,
}

/// What stopped a trailing-field scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldEnd {
    Delimiter,
    Newline,
    EndOfStream,
}

/// Character-level CSV parser
///
/// The parser is permissive: a stray quote mid-field is kept literally and
/// an unterminated quoted field runs to end of stream. It never reports a
/// syntax error; the only failures are I/O errors from the source.
///
/// Unquoted whitespace triggers a lookahead to the end of the field. If
/// only blanks remain before the next delimiter or newline they are
/// dropped, so `a, b ,c` yields `a`, `b`, `c` while `New York` keeps its
/// inner space.
pub struct CsvParser {
    pending: String,
    fields: Vec<String>,
    state: ParserState,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self {
            pending: String::new(),
            fields: Vec::new(),
            state: ParserState::Unquoted,
        }
    }

    /// Parse the next record from `src`
    ///
    /// Returns an empty vector when the stream is exhausted before any
    /// character was read. A blank line yields a single empty field.
    pub fn parse_record<R: Read>(&mut self, src: &mut CharReader<R>) -> io::Result<Vec<String>> {
        self.pending.clear();
        self.fields.clear();
        self.state = ParserState::Unquoted;

        while let Some(c) = src.next_char()? {
            match c {
                DELIMITER if self.state == ParserState::Unquoted => {
                    self.finish_field();
                    if src.peek_char()?.is_none() {
                        self.fields.push(String::new());
                    }
                }
                QUOTE if self.state == ParserState::Quoted => {
                    if src.next_if_eq(QUOTE)? {
                        self.pending.push(QUOTE);
                    } else {
                        self.state = ParserState::Unquoted;
                        if self.finish_with_tail(src, None, true)? {
                            return Ok(self.take_fields());
                        }
                    }
                }
                QUOTE => {
                    if self.pending.is_empty() {
                        self.state = ParserState::Quoted;
                    } else {
                        self.pending.push(QUOTE);
                        if self.finish_with_tail(src, None, false)? {
                            return Ok(self.take_fields());
                        }
                    }
                }
                c if is_blank(c) && self.state == ParserState::Unquoted => {
                    if self.finish_with_tail(src, Some(c), true)? {
                        return Ok(self.take_fields());
                    }
                }
                LF => {
                    if self.state == ParserState::Quoted {
                        self.pending.push(LF);
                    } else {
                        self.finish_field();
                        return Ok(self.take_fields());
                    }
                }
                CR if src.peek_char()? == Some(LF) => {
                    src.next_char()?;
                    if self.state == ParserState::Quoted {
                        self.pending.push(CR);
                        self.pending.push(LF);
                    } else {
                        self.finish_field();
                        return Ok(self.take_fields());
                    }
                }
                other => self.pending.push(other),
            }
        }

        if !self.pending.is_empty() {
            self.finish_field();
        }
        Ok(self.take_fields())
    }

    /// Run the trailing-field scan and finalize the pending field with it.
    /// Returns true when the record ended.
    fn finish_with_tail<R: Read>(
        &mut self,
        src: &mut CharReader<R>,
        lead: Option<char>,
        eat_trailing_blanks: bool,
    ) -> io::Result<bool> {
        let (tail, end) = scan_field_tail(src, lead)?;
        if eat_trailing_blanks {
            let trimmed = trim_padding(&tail, self.pending.is_empty());
            self.pending.push_str(trimmed);
        } else {
            self.pending.push_str(&tail);
        }
        self.finish_field();

        match end {
            FieldEnd::Delimiter => {
                if src.peek_char()?.is_none() {
                    self.fields.push(String::new());
                    return Ok(true);
                }
                Ok(false)
            }
            FieldEnd::Newline | FieldEnd::EndOfStream => Ok(true),
        }
    }

    fn finish_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.pending));
    }

    fn take_fields(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fields)
    }
}

/// Read the rest of an unquoted field verbatim, starting with `lead` if given.
/// Consumes the terminating delimiter or newline.
fn scan_field_tail<R: Read>(
    src: &mut CharReader<R>,
    lead: Option<char>,
) -> io::Result<(String, FieldEnd)> {
    let mut tail = String::new();
    tail.extend(lead);

    while let Some(c) = src.next_char()? {
        match c {
            DELIMITER => return Ok((tail, FieldEnd::Delimiter)),
            LF => return Ok((tail, FieldEnd::Newline)),
            CR if src.next_if_eq(LF)? => return Ok((tail, FieldEnd::Newline)),
            other => tail.push(other),
        }
    }
    Ok((tail, FieldEnd::EndOfStream))
}

/// Drop a scanned tail that is nothing but padding, otherwise strip its
/// trailing blanks. Leading blanks go too when the field had no content yet.
fn trim_padding(tail: &str, at_field_start: bool) -> &str {
    let trimmed = tail.trim_end_matches(is_blank);
    if at_field_start {
        trimmed.trim_start_matches(is_blank)
    } else {
        trimmed
    }
}
