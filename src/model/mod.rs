//! Data model for report processing.
//!
//! Word tokens flow in from extraction, incidents come out of the parser,
//! and the output tables are what downstream consumers read.

mod category;
mod document;
mod incident;
mod table;
mod word;

pub use category::Category;
pub use document::{DocumentInfo, ExtractedDocument, SkippedDocument};
pub use incident::{Incident, ParseResult};
pub use table::{
    count_cell_incidents, split_incident_cell, CategoryRow, CategoryTable, CountryRow,
    CountryTable, ReportTables, Tabular, TotalsRow, TotalsTable, BULLET,
};
pub use word::{is_bold_font, WordToken};
