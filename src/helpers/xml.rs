//! XML utilities for Office Open XML packages
//! Provides an XML writer wrapper used to generate workbook parts, and a
//! reader wrapper used to inspect generated parts in tests

use crate::error::BrewerySheetError;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Writer;
use std::io::Write;

/// XML writer wrapper producing compact, UTF-8 spreadsheet parts
pub(crate) struct XmlWriter<W> {
    writer: Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a new XML writer without indentation
    pub(crate) fn new(inner: W) -> XmlWriter<W> {
        XmlWriter {
            writer: Writer::new(inner),
        }
    }

    /// Writes the standalone UTF-8 XML declaration
    pub(crate) fn declaration(&mut self) -> Result<(), BrewerySheetError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(())
    }

    /// Writes an opening tag with attributes
    pub(crate) fn start(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), BrewerySheetError> {
        let event = BytesStart::new(tag).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(event))?;
        Ok(())
    }

    /// Writes a closing tag
    pub(crate) fn end(&mut self, tag: &str) -> Result<(), BrewerySheetError> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    /// Writes a self-closing tag with attributes
    pub(crate) fn empty(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), BrewerySheetError> {
        let event = BytesStart::new(tag).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(event))?;
        Ok(())
    }

    /// Writes escaped text content
    pub(crate) fn text(&mut self, text: &str) -> Result<(), BrewerySheetError> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Writes `<tag attributes>text</tag>`
    pub(crate) fn element(&mut self, tag: &str, attributes: &[(&str, &str)], text: &str) -> Result<(), BrewerySheetError> {
        self.start(tag, attributes)?;
        self.text(text)?;
        self.end(tag)
    }

    /// Writes already serialized XML verbatim
    pub(crate) fn raw(&mut self, xml: &str) -> Result<(), BrewerySheetError> {
        self.writer.get_mut().write_all(xml.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use reader::XmlReader;


#[cfg(test)]
#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}
