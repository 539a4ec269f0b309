pub mod error;
mod structural;

pub use error::ParseDiagnostic;

use crate::command::Command;

/// The command tree of one source document.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// Synthetic root owning the document's top-level commands.
    pub root: Command,
    /// Warnings collected while building the tree.
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse the source Markdown into its command tree.
    pub fn parse(&self) -> Parsed {
        structural::build_tree(&self.source, self.file_id)
    }
}
