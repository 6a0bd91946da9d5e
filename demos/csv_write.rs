//! CSV Writer Examples
//!
//! Demonstrates:
//! - Writing plain records
//! - Fields that need quoting (commas, quotes, line breaks)
//! - Typed values and missing values
//! - UTF-8 output with LF line endings
//! - Appending to an existing file

use csvstream::encoding::UTF_8;
use csvstream::{CsvWriter, FieldValue, LineTerminator};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== CSV Writer Examples ===\n");

    // Example 1: Plain records (Windows-1252, CRLF)
    println!("1. Writing plain CSV...");
    {
        let mut writer = CsvWriter::new("demos/output.csv")?;
        writer.write_record(["Name", "Age", "City"])?;
        writer.write_record(["Alice", "30", "NYC"])?;
        writer.write_record(["Bob", "25", "San Francisco"])?;
        writer.write_record(["Zoë", "41", "Malmö"])?;
        println!("   Wrote {} records", writer.row_count());
        writer.save()?;
    }

    // Example 2: Edge cases
    println!("\n2. Writing edge cases (quotes, commas, newlines)...");
    {
        let mut writer = CsvWriter::new("demos/edge_cases.csv")?;
        writer.write_record(["Field", "Value"])?;
        writer.write_record(["comma", "New York, NY"])?;
        writer.write_record(["quote", r#"She said "hello""#])?;
        writer.write_record(["newline", "Line 1\nLine 2"])?;
        writer.write_record(["padding", "  kept as is  "])?;
        writer.save()?;
        println!("   Written to demos/edge_cases.csv");
    }

    // Example 3: Typed values
    println!("\n3. Writing typed values...");
    {
        let mut writer = CsvWriter::new("demos/typed.csv")?;
        writer.write_record(["ID", "Score", "Active", "Comment"])?;
        for i in 0..5i64 {
            let comment = if i % 2 == 0 { Some(format!("row {}", i)) } else { None };
            writer.write_values([
                FieldValue::Int(i),
                FieldValue::Float(i as f64 * 1.25),
                FieldValue::Bool(i % 2 == 0),
                FieldValue::from(comment),
            ])?;
        }
        writer.save()?;
        println!("   Written to demos/typed.csv");
    }

    // Example 4: UTF-8 with LF
    println!("\n4. Writing UTF-8 with LF line endings...");
    {
        let mut writer = CsvWriter::new("demos/utf8.csv")?
            .encoding(UTF_8)
            .line_terminator(LineTerminator::Lf);
        writer.write_records([["東京", "Japan"], ["Zürich", "Switzerland"]])?;
        writer.save()?;
        println!("   Written to demos/utf8.csv");
    }

    // Example 5: Append
    println!("\n5. Appending to demos/output.csv...");
    {
        let mut writer = CsvWriter::append("demos/output.csv")?;
        writer.write_record(["Carol", "35", "Austin"])?;
        writer.save()?;
        println!("   Appended 1 record");
    }

    println!("\n=== All examples completed successfully! ===");

    Ok(())
}
