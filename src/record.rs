//! Line splitting for pasted brewery lists.
//!
//! Each line looks like `<ordinal> <name> (<location>)`. The ordinal is thrown
//! away, the rest is split at the first `(` and both halves are folded to ASCII.

use crate::error::BrewerySheetError;
use crate::text::Normalizer;
use thiserror::Error;
use tracing::debug;

/// Characters removed from the location field after normalization
const LOCATION_STRIPPED: &[char] = &['(', ')', '"'];

/// Errors specific to splitting a line into a record
#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("No '(' found in '{0}'")]
    MissingParenthesis(String),
}

/// A brewery name and its location, both ASCII.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub location: String,
}

/// Splits one line into a normalized record.
pub fn split_record(line: &str, normalizer: &Normalizer) -> Result<Record, BrewerySheetError> {
    // First token is the ordinal or bullet
    let joined = line.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    let (name, location) = joined
        .split_once('(')
        .ok_or_else(|| RecordError::MissingParenthesis(line.trim().to_owned()))?;

    let name = normalizer.normalize(name.trim_end())?;
    let mut location = normalizer.normalize(location)?;
    location.retain(|character| !LOCATION_STRIPPED.contains(&character));
    Ok(Record { name, location })
}

/// Splits every non-blank line of `text` into a record, keeping input order.
/// The first malformed line aborts the pass.
pub fn parse_records(text: &str, normalizer: &Normalizer) -> Result<Vec<Record>, BrewerySheetError> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            debug!(line = line_number, "skip blank line");
            continue;
        }
        let record = split_record(line, normalizer).map_err(|error| error.at_line(line_number))?;
        debug!(line = line_number, name = %record.name, location = %record.location, "parsed record");
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EncodingError;
    use proptest::prelude::*;

    fn split(line: &str) -> Result<Record, BrewerySheetError> {
        split_record(line, &Normalizer::default())
    }

    fn record(name: &str, location: &str) -> Record {
        Record {
            name: name.to_owned(),
            location: location.to_owned(),
        }
    }

    #[test]
    fn split_strips_quotes_from_location() {
        assert_eq!(
            split("1. Stone Brewing (\"Big Bear IPA\")").unwrap(),
            record("Stone Brewing", "Big Bear IPA")
        );
    }

    #[test]
    fn split_normalizes_en_dash() {
        assert_eq!(
            split("2. River\u{2013}Side Brewing (Townsville)").unwrap(),
            record("River-Side Brewing", "Townsville")
        );
    }

    #[test]
    fn split_collapses_whitespace() {
        assert_eq!(
            split("  3)\tBell\u{2019}s   Brewery   (Kalamazoo,  MI)  ").unwrap(),
            record("Bell's Brewery", "Kalamazoo, MI")
        );
    }

    #[test]
    fn split_removes_curly_quote_from_location() {
        assert_eq!(
            split("4. Brasserie Caf\u{e9} (\u{201C}Montr\u{e9}al\")").unwrap(),
            record("Brasserie Cafe", "Montreal")
        );
    }

    #[test]
    fn split_only_at_first_parenthesis() {
        assert_eq!(
            split("5. Odell (Fort Collins (CO))").unwrap(),
            record("Odell", "Fort Collins CO")
        );
    }

    #[test]
    fn split_accepts_empty_name() {
        assert_eq!(split("6. (Somewhere)").unwrap(), record("", "Somewhere"));
        assert_eq!(split("7.(Anywhere)").unwrap_err().to_string(), "No '(' found in '7.(Anywhere)'");
    }

    #[test]
    fn split_discards_prefix_token() {
        let record = split("\u{2022} Founders (Grand Rapids)").unwrap();
        assert_eq!(record.name, "Founders");
        assert!(!record.name.contains('\u{2022}'));
    }

    #[test]
    fn split_without_parenthesis() {
        let error = split("8. Lonely Brewery").unwrap_err();
        assert!(matches!(
            error,
            BrewerySheetError::RecordError(RecordError::MissingParenthesis(ref line)) if line == "8. Lonely Brewery"
        ));
    }

    #[test]
    fn split_unmapped_character() {
        let error = split("9. Brau\u{df}haus (Berlin)").unwrap_err();
        assert!(matches!(error, BrewerySheetError::EncodingError(_)));
    }

    #[test]
    fn parse_keeps_order_and_skips_blank_lines() {
        let text = "1. Stone Brewing (Escondido)\r\n\r\n2. Odell (Fort Collins)\n   \n3. Bell\u{2019}s (Kalamazoo)\n";
        let records = parse_records(text, &Normalizer::default()).unwrap();
        assert_eq!(
            records,
            vec![
                record("Stone Brewing", "Escondido"),
                record("Odell", "Fort Collins"),
                record("Bell's", "Kalamazoo"),
            ]
        );
    }

    #[test]
    fn parse_empty_text() {
        assert!(parse_records("", &Normalizer::default()).unwrap().is_empty());
    }

    #[test]
    fn parse_reports_failing_line() {
        let text = "1. Stone Brewing (Escondido)\n\n3. Lonely Brewery\n4. Odell (Fort Collins)\n";
        let error = parse_records(text, &Normalizer::default()).unwrap_err();
        assert_eq!(error.to_string(), "Line 3: No '(' found in '3. Lonely Brewery'");
        assert!(matches!(error, BrewerySheetError::LineError { line: 3, .. }));
        assert!(matches!(
            error.root(),
            BrewerySheetError::RecordError(RecordError::MissingParenthesis(line)) if line == "3. Lonely Brewery"
        ));
    }

    #[test]
    fn parse_reports_unmapped_character_as_encoding_error() {
        let text = "1. Stone Brewing (Escondido)\n2. Brau\u{df}haus (Berlin)\n";
        let error = parse_records(text, &Normalizer::default()).unwrap_err();
        assert!(matches!(error, BrewerySheetError::LineError { line: 2, .. }));
        assert!(matches!(
            error.root(),
            BrewerySheetError::EncodingError(EncodingError::Unrepresentable { character: '\u{df}', .. })
        ));
    }

    fn words(pattern: &'static str) -> impl Strategy<Value = String> {
        prop::collection::vec(pattern, 0..4).prop_map(|words| words.join(" "))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_split_drops_prefix_and_strips_location(
            prefix in "([0-9]{1,3}[.)]|\u{2022}|-)",
            name in words("[A-Za-z'&-]{1,12}"),
            location in "[ -~]{0,40}",
        ) {
            let line = format!("{} {} ({})", prefix, name, location);
            let record = split(&line).unwrap();

            prop_assert_eq!(&record.name, &name);
            prop_assert!(!record.location.contains(LOCATION_STRIPPED));
            prop_assert!(record.name.is_ascii() && record.location.is_ascii());

            let mut expected = location.clone();
            expected.retain(|character| !LOCATION_STRIPPED.contains(&character));
            prop_assert_eq!(
                record.location.split_whitespace().collect::<Vec<_>>(),
                expected.split_whitespace().collect::<Vec<_>>()
            );
        }
    }
}
