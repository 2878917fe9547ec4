use crate::error::BrewerySheetError;
use crate::error::ResultMessage;
use crate::helpers::xml::XmlWriter;
use crate::helpers::zip::ZipHelper;
use crate::spreadsheet::grid::Grid;
use crate::spreadsheet::SHEET_NAME;
use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing::warn;
use zip::ZipWriter;

// Namespaces used by Office Open XML parts
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_CORE_PROPERTIES: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_EXTENDED_PROPERTIES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";

// Relationship types
const REL_OFFICE_DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str = "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_WORKSHEET: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_SHARED_STRINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

// Part content types
const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const CT_SHARED_STRINGS: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPERTIES: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

// Package part paths
const PART_CONTENT_TYPES: &str = "[Content_Types].xml";
const PART_ROOT_RELATIONSHIPS: &str = "_rels/.rels";
const PART_APP: &str = "docProps/app.xml";
const PART_CORE: &str = "docProps/core.xml";
const PART_WORKBOOK: &str = "xl/workbook.xml";
const PART_WORKBOOK_RELATIONSHIPS: &str = "xl/_rels/workbook.xml.rels";
const PART_STYLES: &str = "xl/styles.xml";
const PART_SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const PART_WORKSHEET: &str = "xl/worksheets/sheet1.xml";

/// Application name recorded in document properties
const APPLICATION: &str = env!("CARGO_PKG_NAME");

/// Single font, the two mandatory fills, one border and the "Normal" style
const STYLES: &str = concat!(
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    r#"</styleSheet>"#,
);

/// De-duplicated table of cell strings, indexed in first-seen order
#[derive(Debug, Default)]
struct SharedStrings {
    strings: Vec<String>,
    indexes: HashMap<String, usize>,
    /// Number of cells referencing the table
    count: usize,
}

impl SharedStrings {
    fn from_grid(grid: &Grid) -> Self {
        let mut table = Self::default();
        for cell in &grid.cells {
            table.insert(&cell.value);
        }
        table
    }

    /// Returns the index of `value`, adding it on first use.
    fn insert(&mut self, value: &str) -> usize {
        self.count += 1;
        if let Some(index) = self.indexes.get(value) {
            return *index;
        }
        let index = self.strings.len();
        self.strings.push(value.to_owned());
        self.indexes.insert(value.to_owned(), index);
        index
    }

    fn index(&self, value: &str) -> Option<usize> {
        self.indexes.get(value).copied()
    }
}

/// Writes a [`Grid`] as a single-sheet `.xlsx` package.
pub struct XlsxWriter<WS: Write + Seek> {
    zip: ZipWriter<WS>,
    created: DateTime<Utc>,
}

impl<WS: Write + Seek> XlsxWriter<WS> {
    /// Creates a writer over any seekable sink.
    pub fn new(inner: WS) -> Self {
        Self {
            zip: ZipWriter::new(inner),
            created: Utc::now(),
        }
    }

    /// Overrides the creation timestamp stored in the document properties.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Writes every package part for `grid` and finishes the archive.
    pub fn write(mut self, grid: &Grid) -> Result<WS, BrewerySheetError> {
        let shared_strings = SharedStrings::from_grid(grid);
        self.write_content_types()?;
        self.write_root_relationships()?;
        self.write_app_properties()?;
        self.write_core_properties()?;
        self.write_workbook()?;
        self.write_workbook_relationships()?;
        self.zip.write_xml(PART_STYLES, |writer| writer.raw(STYLES))?;
        self.write_shared_strings(&shared_strings)?;
        self.write_worksheet(grid, &shared_strings)?;
        Ok(self.zip.finish()?)
    }

    fn write_content_types(&mut self) -> Result<(), BrewerySheetError> {
        self.zip.write_xml(PART_CONTENT_TYPES, |writer| {
            writer.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
            writer.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELATIONSHIPS)])?;
            writer.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
            for (part, content_type) in [
                (PART_WORKBOOK, CT_WORKBOOK),
                (PART_WORKSHEET, CT_WORKSHEET),
                (PART_STYLES, CT_STYLES),
                (PART_SHARED_STRINGS, CT_SHARED_STRINGS),
                (PART_CORE, CT_CORE_PROPERTIES),
                (PART_APP, CT_EXTENDED_PROPERTIES),
            ] {
                let part_name = format!("/{}", part);
                writer.empty("Override", &[("PartName", part_name.as_str()), ("ContentType", content_type)])?;
            }
            writer.end("Types")
        })
    }

    fn write_root_relationships(&mut self) -> Result<(), BrewerySheetError> {
        self.zip.write_xml(PART_ROOT_RELATIONSHIPS, |writer| {
            write_relationships(writer, &[
                (REL_OFFICE_DOCUMENT, PART_WORKBOOK),
                (REL_CORE_PROPERTIES, PART_CORE),
                (REL_EXTENDED_PROPERTIES, PART_APP),
            ])
        })
    }

    fn write_app_properties(&mut self) -> Result<(), BrewerySheetError> {
        self.zip.write_xml(PART_APP, |writer| {
            writer.start("Properties", &[("xmlns", NS_EXTENDED_PROPERTIES)])?;
            writer.element("Application", &[], APPLICATION)?;
            writer.end("Properties")
        })
    }

    fn write_core_properties(&mut self) -> Result<(), BrewerySheetError> {
        let timestamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.zip.write_xml(PART_CORE, |writer| {
            writer.start("cp:coreProperties", &[
                ("xmlns:cp", NS_CORE_PROPERTIES),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
                ("xmlns:dcterms", "http://purl.org/dc/terms/"),
                ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ])?;
            writer.element("dc:creator", &[], APPLICATION)?;
            writer.element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &timestamp)?;
            writer.element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &timestamp)?;
            writer.end("cp:coreProperties")
        })
    }

    fn write_workbook(&mut self) -> Result<(), BrewerySheetError> {
        self.zip.write_xml(PART_WORKBOOK, |writer| {
            writer.start("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_RELATIONSHIPS)])?;
            writer.start("bookViews", &[])?;
            writer.empty("workbookView", &[("activeTab", "0")])?;
            writer.end("bookViews")?;
            writer.start("sheets", &[])?;
            writer.empty("sheet", &[("name", SHEET_NAME), ("sheetId", "1"), ("r:id", "rId1")])?;
            writer.end("sheets")?;
            writer.end("workbook")
        })
    }

    fn write_workbook_relationships(&mut self) -> Result<(), BrewerySheetError> {
        self.zip.write_xml(PART_WORKBOOK_RELATIONSHIPS, |writer| {
            // Targets are relative to xl/
            write_relationships(writer, &[
                (REL_WORKSHEET, "worksheets/sheet1.xml"),
                (REL_STYLES, "styles.xml"),
                (REL_SHARED_STRINGS, "sharedStrings.xml"),
            ])
        })
    }

    fn write_shared_strings(&mut self, shared_strings: &SharedStrings) -> Result<(), BrewerySheetError> {
        self.zip.write_xml(PART_SHARED_STRINGS, |writer| {
            let count = shared_strings.count.to_string();
            let unique_count = shared_strings.strings.len().to_string();
            writer.start("sst", &[("xmlns", NS_MAIN), ("count", count.as_str()), ("uniqueCount", unique_count.as_str())])?;
            for string in &shared_strings.strings {
                writer.start("si", &[])?;
                writer.element("t", &[("xml:space", "preserve")], string)?;
                writer.end("si")?;
            }
            writer.end("sst")
        })
    }

    fn write_worksheet(&mut self, grid: &Grid, shared_strings: &SharedStrings) -> Result<(), BrewerySheetError> {
        self.zip.write_xml(PART_WORKSHEET, |writer| {
            writer.start("worksheet", &[("xmlns", NS_MAIN), ("xmlns:r", NS_RELATIONSHIPS)])?;
            writer.empty("dimension", &[("ref", grid.dimension().as_str())])?;
            writer.start("sheetViews", &[])?;
            writer.empty("sheetView", &[("tabSelected", "1"), ("workbookViewId", "0")])?;
            writer.end("sheetViews")?;
            writer.empty("sheetFormatPr", &[("defaultRowHeight", "15")])?;

            // Width 0 hides a column in Excel, so only sized columns are listed
            let widths = (1..=grid.column_count())
                .filter_map(|col| grid.width(col).filter(|width| *width > 0).map(|width| (col, width)))
                .collect::<Vec<_>>();
            if !widths.is_empty() {
                writer.start("cols", &[])?;
                for (col, width) in widths {
                    let col = col.to_string();
                    let width = width.to_string();
                    writer.empty("col", &[("min", col.as_str()), ("max", col.as_str()), ("width", width.as_str()), ("customWidth", "1")])?;
                }
                writer.end("cols")?;
            }

            if grid.is_empty() {
                writer.empty("sheetData", &[])?;
            } else {
                writer.start("sheetData", &[])?;
                for row in 1..=grid.row_count() {
                    let row_number = row.to_string();
                    writer.start("row", &[("r", row_number.as_str())])?;
                    for cell in grid.row(row).unwrap_or_default() {
                        let index = shared_strings.index(&cell.value).unwrap_or_default().to_string();
                        writer.start("c", &[("r", cell.reference().as_str()), ("t", "s")])?;
                        writer.element("v", &[], &index)?;
                        writer.end("c")?;
                    }
                    writer.end("row")?;
                }
                writer.end("sheetData")?;
            }

            writer.empty("pageMargins", &[
                ("left", "0.75"),
                ("right", "0.75"),
                ("top", "1"),
                ("bottom", "1"),
                ("header", "0.5"),
                ("footer", "0.5"),
            ])?;
            writer.end("worksheet")
        })
    }
}

/// Writes a relationships part with ids rId1, rId2, ... in the given order.
fn write_relationships<W: Write>(writer: &mut XmlWriter<W>, relationships: &[(&str, &str)]) -> Result<(), BrewerySheetError> {
    writer.start("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)])?;
    for (index, (kind, target)) in relationships.iter().enumerate() {
        let id = format!("rId{}", index + 1);
        writer.empty("Relationship", &[("Id", id.as_str()), ("Type", *kind), ("Target", *target)])?;
    }
    writer.end("Relationships")
}

/// Persists `grid` as a workbook at `path`, replacing any existing file.
///
/// The file handle is closed on every exit path; a partially written file is
/// removed when writing fails.
pub fn write_spreadsheet(grid: &Grid, path: &Path) -> Result<(), BrewerySheetError> {
    let file = File::create(path).with_prefix(&format!("Create '{}'", path.display()))?;
    let result = XlsxWriter::new(file)
        .write(grid)
        .and_then(|file| Ok(file.sync_all()?));
    if let Err(error) = result {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "could not remove partial output");
        }
        return Err(error).with_prefix(&format!("Write '{}'", path.display()));
    }
    info!(path = %path.display(), rows = grid.row_count(), "wrote spreadsheet");
    Ok(())
}
