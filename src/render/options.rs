//! Rendering options.

/// What to include next to the six tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Add the narrative summary
    pub include_summary: bool,

    /// Add per-document metadata
    pub include_documents: bool,
}

impl RenderOptions {
    /// Create options with defaults (tables only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the summary section.
    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    /// Enable or disable the document list.
    pub fn with_documents(mut self, include: bool) -> Self {
        self.include_documents = include;
        self
    }
}
