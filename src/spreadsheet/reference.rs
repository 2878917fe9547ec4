//! Excel-style A1 cell references.

/// Converts a 1-based column index to its letters ("A", "Z", "AA", ...).
pub(crate) fn col_to_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = col;
    while remaining > 0 {
        let offset = (remaining - 1) % 26;
        letters.push(b'A' + offset as u8);
        remaining = (remaining - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Converts 1-based (row, col) indexes to a reference such as "B7".
pub(crate) fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letters(col), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(col_to_letters(1), "A");
        assert_eq!(col_to_letters(2), "B");
        assert_eq!(col_to_letters(26), "Z");
        assert_eq!(col_to_letters(27), "AA");
        assert_eq!(col_to_letters(52), "AZ");
        assert_eq!(col_to_letters(703), "AAA");
    }

    #[test]
    fn cell_reference() {
        assert_eq!(index_to_reference(1, 1), "A1");
        assert_eq!(index_to_reference(42, 2), "B42");
    }
}
