//! Integration tests for csvstream

use csvstream::encoding::{UTF_8, WINDOWS_1252};
use csvstream::{read_records, CsvReader, CsvWriter, FieldValue, LineTerminator, ReadOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tempfile::NamedTempFile;

// No delimiter, quote or line break; blanks only inside a field
const SAFE_CHARS: &[char] = &[
    'a', 'b', 'z', 'Q', '0', '7', 'é', 'ß', '-', '_', '.', ';', '/', ' ', '\t',
];

fn random_safe_record(rng: &mut StdRng) -> Vec<String> {
    let count: usize = rng.random_range(1..6);
    let mut fields: Vec<String> = (0..count)
        .map(|_| {
            let len: usize = rng.random_range(0..10);
            let raw: String = (0..len)
                .map(|_| SAFE_CHARS[rng.random_range(0..SAFE_CHARS.len())])
                .collect();
            raw.trim_matches([' ', '\t']).to_string()
        })
        .collect();
    // A lone empty field would be a blank line
    if fields.len() == 1 && fields[0].is_empty() {
        fields[0].push('x');
    }
    fields
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn read_all(path: &std::path::Path) -> Vec<Vec<String>> {
    read_records(path)
        .unwrap()
        .map(|r| r.unwrap().into_fields())
        .collect()
}

#[test]
fn test_write_and_read_roundtrip() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    let rows = vec![
        vec!["Name", "Age", "City"],
        vec!["Alice", "30", "NYC"],
        vec!["Bob", "25", "San Francisco"],
    ];

    {
        let mut writer = CsvWriter::new(temp.path()).unwrap();
        writer.write_records(&rows).unwrap();
        writer.save().unwrap();
    }

    assert_eq!(read_all(temp.path()), rows);
}

#[test]
fn test_generated_safe_values_roundtrip() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(42);

    for terminator in [LineTerminator::CrLf, LineTerminator::Lf] {
        let rows: Vec<Vec<String>> = (0..300).map(|_| random_safe_record(&mut rng)).collect();

        let temp = NamedTempFile::new().unwrap();
        {
            let mut writer = CsvWriter::new(temp.path())
                .unwrap()
                .line_terminator(terminator);
            writer.write_records(&rows).unwrap();
            writer.save().unwrap();
        }

        assert_eq!(read_all(temp.path()), rows);
    }
}

#[test]
fn test_crlf_blank_line_terminates_sequence() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    fs::write(temp.path(), "a,1\r\n\r\nb,2\r\n").unwrap();

    assert_eq!(read_all(temp.path()), vec![vec!["a", "1"]]);

    let mut reader = CsvReader::open(temp.path()).unwrap();
    let rows = reader
        .records_skipping_blank_lines()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(rows, vec![vec!["a", "1"], vec!["b", "2"]]);
}

#[test]
fn test_quoting_roundtrip() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    let rows = vec![
        vec!["comma, inside", r#"he said "hi""#, "line1\nline2"],
        vec!["crlf\r\ninside", "\"", ","],
        vec!["  padded in quotes, ", "plain", "x"],
    ];

    {
        let mut writer = CsvWriter::new(temp.path()).unwrap();
        writer.write_records(&rows).unwrap();
        writer.save().unwrap();
    }

    let text = fs::read_to_string(temp.path()).unwrap();
    assert!(text.starts_with(r#""comma, inside","he said ""hi""","line1"#));

    assert_eq!(read_all(temp.path()), rows);
}

#[test]
fn test_roundtrip_non_ascii_windows_1252() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    {
        let mut writer = CsvWriter::new(temp.path()).unwrap();
        writer.write_record(["Zoë", "Ångström", "naïve café"]).unwrap();
        writer.save().unwrap();
    }

    let bytes = fs::read(temp.path()).unwrap();
    assert!(!bytes.contains(&0xC3), "output should not be UTF-8");

    let mut reader = CsvReader::open_with_encoding(temp.path(), WINDOWS_1252).unwrap();
    let record = reader.next_record().unwrap().unwrap();
    assert_eq!(record, ["Zoë", "Ångström", "naïve café"]);
}

#[test]
fn test_roundtrip_utf8() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    {
        let mut writer = CsvWriter::new(temp.path())
            .unwrap()
            .encoding(UTF_8)
            .line_terminator(LineTerminator::Lf);
        writer.write_record(["東京", "日本"]).unwrap();
        writer.write_record(["Zürich", "Schweiz"]).unwrap();
        writer.save().unwrap();
    }

    let rows: Vec<_> = CsvReader::open(temp.path())
        .unwrap()
        .encoding(UTF_8)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![vec!["東京", "日本"], vec!["Zürich", "Schweiz"]]);
}

#[test]
fn test_spreadsheet_style_input() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    fs::write(
        temp.path(),
        "id, name ,city\r\n1,  Alice,New York\r\n2,\"Bob \"\"B\"\" Jones\",\"Austin,\r\nTX\"\r\n3,Carol,\r\n",
    )
    .unwrap();

    assert_eq!(
        read_all(temp.path()),
        vec![
            vec!["id", "name", "city"],
            vec!["1", "Alice", "New York"],
            vec!["2", "Bob \"B\" Jones", "Austin,\r\nTX"],
            vec!["3", "Carol", ""],
        ]
    );
}

#[test]
fn test_blank_line_terminates_sequence() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    fs::write(temp.path(), "a,b\n\nc,d\n").unwrap();

    assert_eq!(read_all(temp.path()), vec![vec!["a", "b"]]);

    // Calling next_record directly stays at "no record" after the blank line
    let mut reader = CsvReader::open(temp.path()).unwrap();
    assert_eq!(reader.next_record().unwrap().unwrap(), ["a", "b"]);
    assert!(reader.next_record().unwrap().is_none());
    assert!(reader.next_record().unwrap().is_none());
}

#[test]
fn test_blank_line_aware_reading() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    fs::write(temp.path(), "a,b\n\nc,d\n").unwrap();

    let mut reader = CsvReader::open(temp.path()).unwrap();
    let mut outcomes = Vec::new();
    loop {
        let outcome = reader.read_outcome().unwrap();
        let done = outcome == ReadOutcome::EndOfStream;
        outcomes.push(outcome);
        if done {
            break;
        }
    }
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[1], ReadOutcome::BlankLine);
    assert_eq!(outcomes[2].clone().into_record().unwrap(), ["c", "d"]);

    let mut reader = CsvReader::open(temp.path()).unwrap();
    let rows = reader
        .records_skipping_blank_lines()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
}

#[test]
fn test_empty_file() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    assert!(read_all(temp.path()).is_empty());
}

#[test]
fn test_headers() {
    init_logging();
    let temp = NamedTempFile::new().unwrap();
    {
        let mut writer = CsvWriter::new(temp.path()).unwrap();
        writer.write_record(["ID", "Score"]).unwrap();
        writer.write_values([FieldValue::Int(1), FieldValue::Float(9.5)]).unwrap();
        writer.write_values([FieldValue::Int(2), FieldValue::Empty]).unwrap();
        writer.save().unwrap();
    }

    let mut reader = CsvReader::open(temp.path()).unwrap().has_header(true);
    let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows, vec![vec!["1", "9.5"], vec!["2", ""]]);
    assert_eq!(*reader.headers().unwrap(), ["ID", "Score"]);
    assert_eq!(reader.row_count(), 3);
}

#[test]
fn test_missing_file_is_io_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let err = CsvReader::open(dir.path().join("nope.csv")).err().unwrap();
    assert_eq!(
        err.as_io().map(|e| e.kind()),
        Some(std::io::ErrorKind::NotFound)
    );
    assert!(read_records(dir.path().join("nope.csv")).is_err());
}
