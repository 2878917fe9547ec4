use thiserror::Error;

/// Main error type for the brewery sheet converter.
/// Aggregates errors from the standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum BrewerySheetError {
    #[error("{0}")]
    WithContextError(String),

    #[error("Line {line}: {source}")]
    LineError {
        line: usize,
        #[source]
        source: Box<BrewerySheetError>,
    },

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    // Text module errors
    #[error("{0}")]
    EncodingError(#[from] crate::text::EncodingError),

    // Record module errors
    #[error("{0}")]
    RecordError(#[from] crate::record::RecordError),
}

impl BrewerySheetError {
    /// Attaches a 1-based input line number, keeping the error's own variant reachable.
    pub(crate) fn at_line(self, line: usize) -> Self {
        BrewerySheetError::LineError {
            line,
            source: Box::new(self),
        }
    }

    /// Returns the underlying error with any line context removed.
    pub fn root(&self) -> &BrewerySheetError {
        match self {
            BrewerySheetError::LineError { source, .. } => source.root(),
            other => other,
        }
    }
}

pub(crate) trait ResultMessage<T> {
    fn with_prefix(self, message: &str) -> Result<T, BrewerySheetError>;
}

impl<T, E: Into<BrewerySheetError>> ResultMessage<T> for Result<T, E> {
    fn with_prefix(self, message: &str) -> Result<T, BrewerySheetError> {
        self.map_err(|e| BrewerySheetError::WithContextError(format!("{}: {}", message, e.into())))
    }
}
