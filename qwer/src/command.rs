use std::collections::BTreeMap;
use std::ops::Range;

/// A command opened by a `##`-or-deeper heading. It is runnable iff its code
/// is non-empty; otherwise it only groups sub-commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    /// Case-folded heading text with whitespace runs joined by `-`.
    pub name: String,
    /// Heading level: 2-6 (`##`-`######`). Zero for the synthetic root.
    pub level: u8,
    /// Trimmed text of the last code block under the heading. Empty when the
    /// heading has no body.
    pub code: String,
    /// Sub-commands keyed by name. Ordered so listings are deterministic.
    pub children: BTreeMap<String, Command>,
    /// Source file ID (for error reporting with codespan-reporting).
    pub file_id: usize,
    /// Byte span of the heading in its source, for error reporting.
    pub span: Range<usize>,
}

impl Command {
    /// The synthetic root that owns the top-level commands of a tree.
    pub fn root() -> Self {
        Command::default()
    }

    pub fn is_runnable(&self) -> bool {
        !self.code.is_empty()
    }

    /// A namespace has sub-commands but nothing to execute itself.
    pub fn is_namespace(&self) -> bool {
        self.code.is_empty() && !self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&Command> {
        self.children.get(name)
    }

    /// Follow `path` one name per level, starting at `self`.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        path.iter()
            .try_fold(self, |current, name| current.child(name.as_ref()))
    }
}

/// Derive a command name from rendered heading text: lower-case, with each
/// run of whitespace collapsed into a single `-`.
pub fn command_name(heading: &str) -> String {
    heading
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
