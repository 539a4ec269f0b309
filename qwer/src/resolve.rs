//! Turning the user's tokens into a command path plus pass-through arguments.

use log::debug;

use crate::command::Command;

/// Token that ends the command path on the command line.
pub const SEPARATOR: &str = "--";

/// Number of non-flag tokens before the first [`SEPARATOR`] in the raw
/// process arguments (program name excluded), or `None` without a separator.
///
/// Every token starting with `-` counts as one of the tool's own flags, so a
/// flag value such as the path in `-f tasks.md` is counted as a command token.
pub fn separator_boundary<S: AsRef<str>>(argv: &[S]) -> Option<usize> {
    let position = argv.iter().position(|arg| arg.as_ref() == SEPARATOR)?;
    Some(
        argv[..position]
            .iter()
            .filter(|arg| !arg.as_ref().starts_with('-'))
            .count(),
    )
}

/// Split flag-free tokens at `boundary` into command-path candidates and
/// arguments that are passed through unconditionally.
pub fn split_arguments(args: &[String], boundary: Option<usize>) -> (&[String], &[String]) {
    match boundary {
        Some(k) if k <= args.len() => args.split_at(k),
        _ => (args, &args[args.len()..]),
    }
}

/// Outcome of resolving tokens against a command tree.
#[derive(Debug, PartialEq)]
pub enum Resolution<'a> {
    /// No command tokens were given.
    ListAll,
    /// The deepest matching command has code to run.
    Runnable {
        command: &'a Command,
        path: Vec<String>,
        extra: Vec<String>,
    },
    /// The deepest matching command has no code. It is either a namespace
    /// whose children should be listed, or an empty heading.
    Namespace {
        command: &'a Command,
        path: Vec<String>,
    },
    /// No prefix of the tokens names a command.
    NotFound { tokens: Vec<String> },
}

/// Resolve `args` (the tokens left after the tool's own flags, separator
/// removed) against `root` by longest-prefix match.
///
/// With a `boundary` from [`separator_boundary`], only the first `boundary`
/// tokens are candidates for the command path.
pub fn resolve<'a>(root: &'a Command, args: &[String], boundary: Option<usize>) -> Resolution<'a> {
    let (candidates, passthrough) = split_arguments(args, boundary);

    if candidates.is_empty() {
        return Resolution::ListAll;
    }

    let Some((length, command)) = (1..=candidates.len())
        .rev()
        .find_map(|i| root.find(&candidates[..i]).map(|command| (i, command)))
    else {
        return Resolution::NotFound {
            tokens: candidates.to_vec(),
        };
    };

    let path = candidates[..length].to_vec();
    debug!("resolved `{}` ({} of {} tokens)", path.join(" "), length, candidates.len());

    if !command.is_runnable() {
        return Resolution::Namespace { command, path };
    }

    let extra = candidates[length..]
        .iter()
        .chain(passthrough)
        .cloned()
        .collect();
    Resolution::Runnable {
        command,
        path,
        extra,
    }
}
