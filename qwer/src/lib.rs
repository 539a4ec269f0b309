//! Markdown files as command trees.
//!
//! Headings (`##` and deeper) become commands, the last code block under a
//! heading becomes its script, and heading depth becomes command nesting.

pub mod command;
pub mod listing;
pub mod merge;
pub mod parser;
pub mod resolve;

pub use command::Command;
pub use listing::list;
pub use merge::{merge, merge_all};
pub use resolve::{Resolution, resolve, separator_boundary};
