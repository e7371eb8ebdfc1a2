//! # threatsort
//!
//! Turns threat-intelligence PDF reports into structured incident tables.
//!
//! Each report carries a "Threat Detail" section where a bold actor name is
//! followed by a plain-text description, grouped under bold section headers.
//! The crate extracts the word stream of each report, segments it into
//! incidents per category, merges incidents across reports by actor and
//! derives country statistics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use threatsort::{render, ThreatSort};
//!
//! fn main() -> threatsort::Result<()> {
//!     let report = ThreatSort::new().run(["week-01.pdf", "week-02.pdf"])?;
//!
//!     println!("{}", report.summary().executive);
//!     let json = render::to_json(&report, render::JsonFormat::Pretty, &Default::default())?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! Six tables in fixed order: `Access Broker`, `Data Breaches`, `Malware`,
//! `Other Threats`, `Totals` and `Country Occurrences`. Inside an `Incident`
//! cell, an actor with several descriptions gets one `•`-prefixed line per
//! description.

pub mod aggregate;
pub mod cleanup;
pub mod country;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod summary;

pub use aggregate::AggregateStore;
pub use country::{extract_countries, CountryAliases};
pub use error::{Error, Result};
pub use extract::{
    ErrorMode, ExtractOptions, PageSelection, PdfWordSource, ReadingOrder, WordSource,
};
pub use model::{
    Category, CategoryRow, CategoryTable, CountryRow, CountryTable, DocumentInfo,
    ExtractedDocument, Incident, ParseResult, ReportTables, SkippedDocument, TotalsTable,
    WordToken,
};
pub use parser::parse_words;
pub use render::{JsonFormat, RenderOptions};
pub use summary::Summary;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

/// What to do when a document cannot be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failing document
    #[default]
    AllOrNothing,
    /// Log the failure, record it in the report and continue
    SkipFailed,
}

/// Options for a multi-document run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Word extraction options
    pub extract: ExtractOptions,

    /// Failure handling across documents
    pub failure_policy: FailurePolicy,

    /// Extract and parse documents in parallel
    pub parallel: bool,
}

impl ReportOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            failure_policy: FailurePolicy::AllOrNothing,
            parallel: true,
        }
    }
}

/// Result of a run over a set of reports.
#[derive(Debug, Clone)]
pub struct Report {
    /// The six output tables
    pub tables: ReportTables,

    /// Processed documents in fold order
    pub documents: Vec<DocumentInfo>,

    /// Documents left out under [`FailurePolicy::SkipFailed`]
    pub skipped: Vec<SkippedDocument>,
}

impl Report {
    /// Wrap tables built elsewhere.
    pub fn from_tables(tables: ReportTables) -> Self {
        Self {
            tables,
            documents: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Narrative summary of the tables.
    pub fn summary(&self) -> Summary {
        Summary::from_tables(&self.tables)
    }

    /// Total incident count.
    pub fn total_incidents(&self) -> usize {
        self.tables.totals.total()
    }
}

/// Builder for report runs.
///
/// # Example
///
/// ```no_run
/// use threatsort::{PageSelection, ThreatSort};
///
/// let report = ThreatSort::new()
///     .lenient()
///     .skip_failed()
///     .with_pages(PageSelection::Range(2..=6))
///     .run(["reports/w01.pdf", "reports/w02.pdf"])?;
/// println!("{} incidents", report.total_incidents());
/// # Ok::<(), threatsort::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreatSort {
    options: ReportOptions,
}

impl ThreatSort {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from options.
    pub fn with_options(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Skip undecodable pages instead of failing their document.
    pub fn lenient(mut self) -> Self {
        self.options.extract = self.options.extract.lenient();
        self
    }

    /// Skip failing documents instead of aborting the run.
    pub fn skip_failed(mut self) -> Self {
        self.options.failure_policy = FailurePolicy::SkipFailed;
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.options.parallel = false;
        self
    }

    /// Restrict extraction to some pages of every document.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options.extract = self.options.extract.with_pages(pages);
        self
    }

    /// Set the span reading order.
    pub fn with_reading_order(mut self, order: ReadingOrder) -> Self {
        self.options.extract = self.options.extract.with_reading_order(order);
        self
    }

    /// Options in use.
    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Process PDF files.
    pub fn run<I, P>(&self, paths: I) -> Result<Report>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let source = PdfWordSource::with_options(self.options.extract.clone());
        self.run_with(&source, paths)
    }

    /// Process documents through any word source.
    pub fn run_with<S, I, P>(&self, source: &S, paths: I) -> Result<Report>
    where
        S: WordSource + ?Sized,
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        if paths.is_empty() {
            return Err(Error::NoDocuments);
        }
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        let process = |path: &PathBuf| -> Result<(DocumentInfo, ParseResult)> {
            let doc = source.extract(path)?;
            let result = parse_words(&doc.words);
            log::debug!(
                "{}: {} words, {} incidents",
                path.display(),
                doc.words.len(),
                result.len()
            );
            Ok((doc.info, result))
        };

        // Results come back in path order either way; the fold below is sequential.
        let outcomes: Vec<Result<(DocumentInfo, ParseResult)>> = if self.options.parallel {
            paths.par_iter().map(process).collect()
        } else {
            paths.iter().map(process).collect()
        };

        let mut store = AggregateStore::new();
        let mut documents = Vec::new();
        let mut skipped = Vec::new();
        for (path, outcome) in paths.iter().zip(outcomes) {
            match outcome {
                Ok((info, result)) => {
                    store.fold(&result);
                    documents.push(info);
                }
                Err(e) => match self.options.failure_policy {
                    FailurePolicy::AllOrNothing => return Err(e.in_document(path)),
                    FailurePolicy::SkipFailed => {
                        log::warn!("Skipping {}: {}", path.display(), e);
                        skipped.push(SkippedDocument {
                            path: path.clone(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        let tables = aggregate::build_report_tables(&store, CountryAliases::builtin());
        log::info!(
            "Processed {} documents ({} skipped), {} incidents",
            documents.len(),
            skipped.len(),
            tables.totals.total()
        );
        Ok(Report {
            tables,
            documents,
            skipped,
        })
    }
}

/// Parse one PDF report into per-category incidents.
///
/// # Example
///
/// ```no_run
/// use threatsort::{parse_file, Category};
///
/// let result = parse_file("week-01.pdf")?;
/// for incident in result.incidents(Category::AccessBroker) {
///     println!("{}: {}", incident.actor, incident.description);
/// }
/// # Ok::<(), threatsort::Error>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseResult> {
    let doc = PdfWordSource::new().extract(path.as_ref())?;
    Ok(parse_words(&doc.words))
}

/// Extract the word stream of one PDF report.
pub fn extract_words<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<ExtractedDocument> {
    PdfWordSource::with_options(options).extract(path.as_ref())
}

/// Build the six tables from per-document results, folded in slice order.
pub fn build_tables(results: &[ParseResult]) -> ReportTables {
    let store: AggregateStore = results.iter().collect();
    aggregate::build_report_tables(&store, CountryAliases::builtin())
}

/// Build the six tables from PDF files with default options.
///
/// Paths are processed in sorted order; any failing document fails the run.
pub fn build_tables_from_paths<I, P>(paths: I) -> Result<ReportTables>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Ok(ThreatSort::new().run(paths)?.tables)
}
