use crate::spreadsheet::reference::index_to_reference;

/// A single text cell with its 1-based position.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (1-based)
    pub row: usize,
    /// Column index (1-based)
    pub col: usize,
    /// Cell text
    pub value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Display width of the value, counted in characters.
    pub fn width(&self) -> usize {
        self.value.chars().count()
    }
}
