//! Fixed-layout export of a confirmed document.
//!
//! The report always holds the same sections in the same order: Title, Authors,
//! Emails, Affiliations, Keywords, Abstract. Sections without data show the
//! [`PLACEHOLDER`] instead of an empty line.
//!
//! # Example
//!
//! ```
//! use docmeta::{ExportReport, MetadataDocument};
//!
//! let document = MetadataDocument {
//!     title: Some("Foo".to_string()),
//!     ..Default::default()
//! };
//! let report = ExportReport::from(&document);
//! assert_eq!(report.section("Title"), Some("Foo"));
//! assert_eq!(report.section("Affiliations"), Some("—"));
//! ```

use crate::{FieldRole, MetadataDocument, Result};
use log::info;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the exported report file.
pub const EXPORT_FILE_NAME: &str = "metadata_report.txt";

/// Line width the abstract is wrapped to.
pub const REPORT_LINE_WIDTH: usize = 80;

/// Shown in place of a section without data.
pub const PLACEHOLDER: &str = "—";

/// One labeled section of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub label: &'static str,
    pub body: String,
}

/// A read-only rendering of a document into fixed sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    sections: Vec<ReportSection>,
}

impl ExportReport {
    /// All sections in report order.
    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// The body of the section with the given label.
    pub fn section(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|section| section.label == label)
            .map(|section| section.body.as_str())
    }

    /// Writes the report text to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{self}")?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the report into `dir` under [`EXPORT_FILE_NAME`], replacing any
    /// previous export, and returns the file path.
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(EXPORT_FILE_NAME);
        let file = std::fs::File::create(&path)?;
        self.write_to(std::io::BufWriter::new(file))?;
        info!("exported metadata report to {}", path.display());
        Ok(path)
    }
}

/// Renders a document into its report.
pub fn serialize(document: &MetadataDocument) -> ExportReport {
    ExportReport::from(document)
}

impl From<&MetadataDocument> for ExportReport {
    fn from(document: &MetadataDocument) -> Self {
        let metadata = &document.metadata;
        let sections = vec![
            section(FieldRole::Title, document.title.clone()),
            section(FieldRole::Authors, join(&metadata.authors, ", ")),
            section(FieldRole::Emails, join(&metadata.emails, ", ")),
            section(FieldRole::Affiliations, join(&metadata.affiliations, "\n")),
            section(FieldRole::Keywords, join(&metadata.keywords, ", ")),
            section(
                FieldRole::Abstract,
                document
                    .abstract_text
                    .as_deref()
                    .map(|text| textwrap::fill(text, REPORT_LINE_WIDTH)),
            ),
        ];
        Self { sections }
    }
}

fn join(items: &[String], separator: &str) -> Option<String> {
    (!items.is_empty()).then(|| items.join(separator))
}

fn section(role: FieldRole, body: Option<String>) -> ReportSection {
    ReportSection {
        label: role.label(),
        body: body
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.label.to_uppercase())?;
            writeln!(f, "{}", "=".repeat(section.label.len()))?;
            writeln!(f, "{}", section.body)?;
        }
        Ok(())
    }
}
