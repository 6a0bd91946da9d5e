//! CSV Reader Examples
//!
//! Demonstrates:
//! - Reading records with the iterator
//! - Reading with headers
//! - Manual record reading (next_record)
//! - Blank line handling
//! - Error handling
//!
//! Run `cargo run --example csv_write` first to create the input files.

use csvstream::encoding::UTF_8;
use csvstream::{read_records, CsvReader, ReadOutcome};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== CSV Reader Examples ===\n");

    // Example 1: Read plain CSV
    println!("1. Reading plain CSV...");
    {
        let mut reader = CsvReader::open("demos/output.csv")?;
        for (i, record) in reader.records().enumerate() {
            println!("   Row {}: {:?}", i + 1, record?);
        }
        println!("   Total rows read: {}", reader.row_count());
    }

    // Example 2: Read with headers
    println!("\n2. Reading with headers...");
    {
        let mut reader = CsvReader::open("demos/typed.csv")?.has_header(true);
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        if let Some(headers) = reader.headers() {
            println!("   Headers: {:?}", headers);
        }
        for row in rows {
            println!("   {:?}", row);
        }
    }

    // Example 3: Edge cases
    println!("\n3. Reading edge cases (quotes, commas, newlines)...");
    {
        for record in read_records("demos/edge_cases.csv")? {
            let record = record?;
            println!("   {} = {:?}", &record[0], record.get(1).unwrap_or(""));
        }
    }

    // Example 4: UTF-8 input
    println!("\n4. Reading UTF-8 input...");
    {
        let mut reader = CsvReader::open("demos/utf8.csv")?.encoding(UTF_8);
        while let Some(record) = reader.next_record()? {
            println!("   {:?}", record);
        }
    }

    // Example 5: Blank lines
    println!("\n5. Blank lines...");
    {
        let input = "a,b\n\nc,d\n";

        let mut reader = CsvReader::from_reader(input.as_bytes());
        let stopped: Vec<_> = reader.records().filter_map(|r| r.ok()).collect();
        println!("   records() stops at the blank line: {:?}", stopped);

        let mut reader = CsvReader::from_reader(input.as_bytes());
        loop {
            match reader.read_outcome()? {
                ReadOutcome::Record(record) => println!("   record {:?}", record),
                ReadOutcome::BlankLine => println!("   blank line"),
                ReadOutcome::EndOfStream => break,
            }
        }
    }

    // Example 6: Error handling
    println!("\n6. Error handling example...");
    {
        match CsvReader::open("demos/nonexistent.csv") {
            Ok(_) => println!("   File opened"),
            Err(e) => println!("   Expected error: {}", e),
        }
    }

    println!("\n=== All examples completed successfully! ===");

    Ok(())
}
