//! CSV utilities for tokenizing and encoding

mod chars;
mod encoder;
mod parser;

pub use chars::CharReader;
pub use encoder::CsvEncoder;
pub use parser::CsvParser;

/// Field delimiter
pub const DELIMITER: char = ',';
/// Quote character
pub const QUOTE: char = '"';

pub(crate) const CR: char = '\r';
pub(crate) const LF: char = '\n';

/// Space or tab, the only characters the whitespace heuristic trims
pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
