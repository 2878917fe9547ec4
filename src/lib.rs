//! # Brewery Sheet
//!
//! Converts a brewery list pasted from a web page into an Excel workbook.
//!
//! Each input line has the shape `<ordinal> <name> (<location>)`. The run is a
//! straight pipeline with no shared state between stages:
//!
//! 1. decode the input file with one declared encoding
//! 2. split every non-blank line into a name/location [`Record`], folding
//!    curly quotes, en dashes and accented e to ASCII
//! 3. lay the records out as a two-column [`Grid`] sized to its longest values
//! 4. write the grid as a single-sheet `.xlsx` workbook
//!
//! The first malformed line aborts the run before any output file is created.
pub mod error;
mod helpers;
pub mod record;
pub mod spreadsheet;
pub mod text;

pub use crate::error::BrewerySheetError;
pub use crate::record::Record;
pub use crate::spreadsheet::Grid;

use crate::error::ResultMessage;
use crate::spreadsheet::DEFAULT_FILE_NAME;
use crate::text::Normalizer;
use encoding_rs::Encoding;
use encoding_rs::UTF_8;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Settings for one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Plain-text brewery list
    pub input: PathBuf,
    /// Workbook to create or replace
    pub output: PathBuf,
    /// Encoding the whole input file is declared to use
    pub encoding: &'static Encoding,
}

impl ConvertOptions {
    /// Options reading `input` as UTF-8 and writing the default workbook name.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_FILE_NAME),
            encoding: UTF_8,
        }
    }
}

/// Reads `text` into records, one per non-blank line, in input order.
pub fn parse(text: &str) -> Result<Vec<Record>, BrewerySheetError> {
    record::parse_records(text, &Normalizer::default())
}

/// Runs the whole conversion and returns the number of rows written.
pub fn convert(options: &ConvertOptions) -> Result<usize, BrewerySheetError> {
    let bytes = fs::read(&options.input).with_prefix(&format!("Read '{}'", options.input.display()))?;
    let text = text::decode(&bytes, options.encoding)?;
    info!(
        path = %options.input.display(),
        bytes = bytes.len(),
        encoding = options.encoding.name(),
        "read brewery list"
    );

    let records = parse(&text)?;
    let grid = Grid::from_records(&records);
    spreadsheet::write_spreadsheet(&grid, &options.output)?;
    Ok(grid.row_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordError;
    use std::path::Path;
    use zip::ZipArchive;

    fn options(directory: &Path, content: &[u8]) -> ConvertOptions {
        let input = directory.join("breweries.txt");
        fs::write(&input, content).unwrap();
        ConvertOptions {
            output: directory.join("Brewery List.xlsx"),
            ..ConvertOptions::new(input)
        }
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::new("list.txt");
        assert_eq!(options.output, PathBuf::from("Brewery List.xlsx"));
        assert_eq!(options.encoding, UTF_8);
    }

    #[test]
    fn test_convert() {
        let directory = tempfile::tempdir().unwrap();
        let content = "1. Stone Brewing (\"Big Bear IPA\")\n2. River\u{2013}Side Brewing (Townsville)\n\n3. Caf\u{e9} Brewery (Montr\u{e9}al)\n";
        let options = options(directory.path(), content.as_bytes());

        assert_eq!(convert(&options).unwrap(), 3);
        let file = fs::File::open(&options.output).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        assert!(archive.by_name("xl/worksheets/sheet1.xml").is_ok());
    }

    #[test]
    fn test_convert_empty_input() {
        let directory = tempfile::tempdir().unwrap();
        let options = options(directory.path(), b"");

        assert_eq!(convert(&options).unwrap(), 0);
        assert!(options.output.exists());
    }

    #[test]
    fn test_convert_malformed_line_writes_nothing() {
        let directory = tempfile::tempdir().unwrap();
        let options = options(directory.path(), b"1. Stone Brewing (Escondido)\n2. Lonely Brewery\n");

        let error = convert(&options).unwrap_err();
        assert_eq!(error.to_string(), "Line 2: No '(' found in '2. Lonely Brewery'");
        assert!(matches!(error, BrewerySheetError::LineError { line: 2, .. }));
        assert!(matches!(
            error.root(),
            BrewerySheetError::RecordError(RecordError::MissingParenthesis(_))
        ));
        assert!(!options.output.exists());
    }

    #[test]
    fn test_convert_declared_encoding() {
        let directory = tempfile::tempdir().unwrap();
        let mut options = options(directory.path(), b"1. Caf\xE9 \x96 Bar (Qu\xE9bec)\n");

        // Latin-1 bytes are not valid UTF-8
        assert!(matches!(convert(&options), Err(BrewerySheetError::EncodingError(_))));
        assert!(!options.output.exists());

        options.encoding = text::resolve_encoding("windows-1252").unwrap();
        assert_eq!(convert(&options).unwrap(), 1);
    }

    #[test]
    fn test_convert_missing_input() {
        let directory = tempfile::tempdir().unwrap();
        let options = ConvertOptions::new(directory.path().join("missing.txt"));

        let error = convert(&options).unwrap_err();
        assert!(error.to_string().starts_with("Read '"));
    }

    #[test]
    fn test_parse() {
        let records = parse("1. Stone Brewing (\"Big Bear IPA\")\n").unwrap();
        assert_eq!(
            records,
            vec![Record {
                name: "Stone Brewing".to_owned(),
                location: "Big Bear IPA".to_owned(),
            }]
        );
    }
}
