use crate::error::Result;
use crate::schema::RawSheet;
use log::debug;
use std::io::Read;
use std::path::Path;

const BOM: char = '\u{feff}';

/// Reads a CSV export into a [`RawSheet`]. Every record is kept, including
/// the header row and blank separator rows, and rows may differ in width.
pub fn read_sheet_from_reader<R: Read>(reader: R) -> Result<RawSheet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut sheet = RawSheet::new();
    for record in csv_reader.records() {
        let record = record?;
        sheet.push(record.iter().map(str::to_string).collect());
    }

    if let Some(first) = sheet.first_mut().and_then(|row| row.first_mut()) {
        if first.starts_with(BOM) {
            *first = first.trim_start_matches(BOM).to_string();
        }
    }

    debug!(
        "Read sheet with {} rows and {} columns",
        sheet.len(),
        sheet.iter().map(Vec::len).max().unwrap_or(0)
    );

    Ok(sheet)
}

pub fn read_sheet_from_str(text: &str) -> Result<RawSheet> {
    read_sheet_from_reader(text.as_bytes())
}

pub fn read_sheet_from_path<P: AsRef<Path>>(path: P) -> Result<RawSheet> {
    let file = std::fs::File::open(path)?;
    read_sheet_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_ragged_rows() {
        let sheet = read_sheet_from_str("a,b,c\n\nx,\"1,234\"\n").unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet[0], vec!["a", "b", "c"]);
        assert_eq!(sheet[1], vec!["x", "1,234"]);
    }

    #[test]
    fn test_strips_bom() {
        let sheet = read_sheet_from_str("\u{feff}หมวด,รหัส\n").unwrap();
        assert_eq!(sheet[0][0], "หมวด");
    }

    #[test]
    fn test_blank_separator_rows_with_commas_are_kept() {
        let sheet = read_sheet_from_str("h1,h2\n,\nBakery,A01\n").unwrap();
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet[1], vec!["", ""]);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_sheet_from_path("/definitely/not/here.csv").is_err());
    }
}
