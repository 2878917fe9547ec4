use crate::record::Record;
use crate::spreadsheet::cell::Cell;

/// Column layout used for brewery records: name, then location
const RECORD_COLUMNS: usize = 2;

/// Rows of text cells laid out for one worksheet, with per-column widths.
///
/// Cells are kept in row-major order. Every column's width is the longest
/// value seen in it, and stays 0 while the column only holds empty strings.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    /// All cells in row-major order
    pub(crate) cells: Vec<Cell>,
    /// Number of rows pushed so far
    rows: usize,
    /// Longest value per column, 0-based by column
    widths: [usize; RECORD_COLUMNS],
}

impl Grid {
    /// Lays out records one per row, keeping their order.
    pub fn from_records(records: &[Record]) -> Self {
        let mut grid = Self::default();
        for record in records {
            grid.push_row([record.name.as_str(), record.location.as_str()]);
        }
        grid
    }

    fn push_row(&mut self, values: [&str; RECORD_COLUMNS]) {
        self.rows += 1;
        for (index, value) in values.into_iter().enumerate() {
            let cell = Cell {
                row: self.rows,
                col: index + 1,
                value: value.to_owned(),
            };
            self.widths[index] = self.widths[index].max(cell.width());
            self.cells.push(cell);
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        RECORD_COLUMNS
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Width of a 1-based column, `None` when the column does not exist.
    pub fn width(&self, col: usize) -> Option<usize> {
        col.checked_sub(1).and_then(|index| self.widths.get(index)).copied()
    }

    /// Cells of one 1-based row.
    pub(crate) fn row(&self, row: usize) -> Option<&[Cell]> {
        if row == 0 || row > self.rows {
            return None;
        }
        let lower = (row - 1) * RECORD_COLUMNS;
        self.cells.get(lower..lower + RECORD_COLUMNS)
    }

    /// Reference spanning every cell, e.g. "A1:B12", or "A1" when empty.
    pub fn dimension(&self) -> String {
        match self.cells.last() {
            Some(last) => format!("A1:{}", last.reference()),
            None => "A1".to_owned(),
        }
    }
}
