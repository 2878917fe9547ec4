//! # Spreadsheet Module
//!
//! Lays brewery records out as a [`Grid`] and persists it as an Excel
//! workbook (`.xlsx`) with a single worksheet whose columns are sized to
//! their longest value.

pub mod cell;
pub mod grid;
pub(crate) mod reference;
pub mod xlsx;

pub use cell::Cell;
pub use grid::Grid;
pub use xlsx::write_spreadsheet;
pub use xlsx::XlsxWriter;

/// Name of the single worksheet
pub const SHEET_NAME: &str = "Brewery List";

/// Workbook file written when no output path is given
pub const DEFAULT_FILE_NAME: &str = "Brewery List.xlsx";
