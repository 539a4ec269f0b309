use std::collections::BTreeMap;
use std::ops::Range;

use log::debug;
use pulldown_cmark::{Event, Options, Parser as CmarkParser, Tag, TagEnd};

use crate::command::{Command, command_name};
use crate::parser::Parsed;
use crate::parser::error::ParseDiagnostic;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the command tree of one Markdown document.
pub fn build_tree(source: &str, file_id: usize) -> Parsed {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = CmarkParser::new_ext(source, options);
    let events: Vec<(Event<'_>, Range<usize>)> = parser.into_offset_iter().collect();

    let mut state = BuildState::new(file_id);
    state.process_events(&events);
    state.finalize()
}

// ---------------------------------------------------------------------------
// Build state
// ---------------------------------------------------------------------------

struct BuildState {
    file_id: usize,
    /// Commands whose section is still open, shallowest first. The top of the
    /// stack is always the most recently opened heading, so code blocks attach
    /// there.
    command_stack: Vec<CommandBuilder>,
    root: Command,
    diagnostics: Vec<ParseDiagnostic>,
}

struct CommandBuilder {
    name: String,
    level: u8,
    code: String,
    children: BTreeMap<String, Command>,
    span: Range<usize>,
}

impl CommandBuilder {
    fn into_command(self, file_id: usize) -> Command {
        Command {
            name: self.name,
            level: self.level,
            code: self.code,
            children: self.children,
            file_id,
            span: self.span,
        }
    }
}

impl BuildState {
    fn new(file_id: usize) -> Self {
        BuildState {
            file_id,
            command_stack: Vec::new(),
            root: Command::root(),
            diagnostics: Vec::new(),
        }
    }

    fn process_events(&mut self, events: &[(Event<'_>, Range<usize>)]) {
        let mut i = 0;

        while i < events.len() {
            let (ref ev, ref range) = events[i];

            match ev {
                Event::Start(Tag::Heading { level, .. }) => {
                    // `HeadingLevel` discriminants are the heading depths 1-6
                    let heading_level = *level as u8;

                    i += 1;
                    let text = collect_heading_text(events, &mut i);

                    // Level 1 is the document title
                    if heading_level == 1 {
                        continue;
                    }

                    self.open_command(&text, heading_level, range.clone());
                }

                Event::Start(Tag::CodeBlock(_)) => {
                    i += 1;
                    let code = collect_code_block(events, &mut i);
                    match self.command_stack.last_mut() {
                        Some(builder) => builder.code = code,
                        None => self.diagnostics.push(
                            ParseDiagnostic::warning(
                                "code block outside any command is ignored",
                                range.clone(),
                                self.file_id,
                            )
                            .with_note("add a `##` heading above it to make it runnable"),
                        ),
                    }
                }

                _ => {
                    i += 1;
                }
            }
        }
    }

    fn open_command(&mut self, text: &str, level: u8, span: Range<usize>) {
        let name = command_name(text);
        if name.is_empty() {
            self.diagnostics.push(ParseDiagnostic::warning(
                "heading has no text",
                span.clone(),
                self.file_id,
            ));
        }

        self.close_commands_to_level(level);

        debug!("heading `{}` opens command `{}` (level {})", text.trim(), name, level);
        self.command_stack.push(CommandBuilder {
            name,
            level,
            code: String::new(),
            children: BTreeMap::new(),
            span,
        });
    }

    /// Close commands from the stack down to the given heading level.
    fn close_commands_to_level(&mut self, new_level: u8) {
        while self
            .command_stack
            .last()
            .is_some_and(|top| top.level >= new_level)
        {
            if let Some(builder) = self.command_stack.pop() {
                self.attach(builder);
            }
        }
    }

    /// Attach a finished command to the innermost open command, or to the root.
    /// A later sibling with the same name replaces the earlier one.
    fn attach(&mut self, builder: CommandBuilder) {
        let command = builder.into_command(self.file_id);
        let parent = match self.command_stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root.children,
        };

        let span = command.span.clone();
        let name = command.name.clone();
        if let Some(previous) = parent.insert(name.clone(), command) {
            self.diagnostics.push(
                ParseDiagnostic::warning(
                    format!("duplicate command `{}` replaces an earlier definition", name),
                    span,
                    self.file_id,
                )
                .with_related(previous.span),
            );
        }
    }

    fn finalize(mut self) -> Parsed {
        while let Some(builder) = self.command_stack.pop() {
            self.attach(builder);
        }

        Parsed {
            root: self.root,
            diagnostics: self.diagnostics,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Collect heading text (all Text and Code events until End(Heading)).
fn collect_heading_text(events: &[(Event<'_>, Range<usize>)], i: &mut usize) -> String {
    let mut text = String::new();
    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(TagEnd::Heading(_)) => {
                *i += 1;
                break;
            }
            Event::Text(s) | Event::Code(s) => {
                text.push_str(s);
                *i += 1;
            }
            Event::SoftBreak | Event::HardBreak => {
                text.push(' ');
                *i += 1;
            }
            _ => {
                *i += 1;
            }
        }
    }
    text
}

/// The trimmed body of the code block whose start event was just consumed.
/// Leaves `i` after the block's end event.
fn collect_code_block(events: &[(Event<'_>, Range<usize>)], i: &mut usize) -> String {
    let end = events[*i..]
        .iter()
        .position(|(ev, _)| matches!(ev, Event::End(TagEnd::CodeBlock)))
        .map_or(events.len(), |offset| *i + offset);

    let body: String = events[*i..end]
        .iter()
        .filter_map(|(ev, _)| match ev {
            Event::Text(s) => Some(&**s),
            _ => None,
        })
        .collect();

    *i = (end + 1).min(events.len());
    body.trim().to_string()
}
