//! ZIP archive helper utilities for Excel (.xlsx) packages
//! Provides convenient methods for writing XML parts into a ZIP archive

use crate::error::BrewerySheetError;
use crate::helpers::xml::XmlWriter;
use std::io::Seek;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Helper trait for ZIP archive operations writing XML parts
pub(crate) trait ZipHelper<WS: Write + Seek> {
    /// Starts a deflated entry and hands an XML writer for it to `body`,
    /// after writing the XML declaration
    fn write_xml<F>(&mut self, name: &str, body: F) -> Result<(), BrewerySheetError>
    where
        F: FnOnce(&mut XmlWriter<&mut ZipWriter<WS>>) -> Result<(), BrewerySheetError>;
}

impl<WS: Write + Seek> ZipHelper<WS> for ZipWriter<WS> {
    fn write_xml<F>(&mut self, name: &str, body: F) -> Result<(), BrewerySheetError>
    where
        F: FnOnce(&mut XmlWriter<&mut ZipWriter<WS>>) -> Result<(), BrewerySheetError>,
    {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.start_file(name, options)?;
        let mut writer = XmlWriter::new(self);
        writer.declaration()?;
        body(&mut writer)
    }
}
