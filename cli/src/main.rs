mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::debug;

use qwer::{Command, Resolution};
use runner::ScriptOptions;

const EXAMPLES: &str = "\
Default file priority (per directory, from the current one up to the repository root):
  1. QWER.md
  2. qwer.md

Examples:
  qwer hello world
  qwer test -- --verbose
  qwer scripts bash -- arg1 arg2
  qwer --file docs.md build";

#[derive(Parser)]
#[command(
    name = "qwer",
    version,
    about = "Markdown command runner",
    override_usage = "qwer [OPTIONS] [COMMAND]... [-- ARGS...]",
    after_help = EXAMPLES
)]
struct Cli {
    /// List all available commands
    #[arg(short, long)]
    list: bool,

    /// Markdown file to read commands from (skips the directory search)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log how command files are found, parsed and resolved
    #[arg(short, long)]
    verbose: bool,

    /// Command path; tokens that name no sub-command are passed to the command
    command: Vec<String>,

    /// Arguments passed to the command (after --)
    #[arg(last = true)]
    args: Vec<String>,
}

struct Reporter {
    writer: StandardStream,
    config: term::Config,
    files: SimpleFiles<String, String>,
}

impl Reporter {
    fn new(no_color: bool) -> Self {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Reporter {
            writer: StandardStream::stderr(color_choice),
            config: term::Config::default(),
            files: SimpleFiles::new(),
        }
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit_to_write_style(
            &mut self.writer.lock(),
            &self.config,
            &self.files,
            diagnostic,
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(logger::level_filter(
        std::env::var("RUST_LOG").ok().as_deref(),
        cli.quiet,
        cli.verbose,
    ));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let sources = match &cli.file {
        Some(file) => vec![file.clone()],
        None => runner::find_sources_from_cwd()?,
    };

    let mut reporter = Reporter::new(cli.no_color);
    let root = load_commands(&sources, &mut reporter)?;

    if cli.list {
        print_listing("Available commands:", &root, "");
        return Ok(ExitCode::SUCCESS);
    }

    let argv: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let boundary = qwer::separator_boundary(&argv);
    let tokens: Vec<String> = cli.command.into_iter().chain(cli.args).collect();
    debug!("tokens {:?}, separator boundary {:?}", tokens, boundary);

    match qwer::resolve(&root, &tokens, boundary) {
        Resolution::ListAll => {
            print_listing("Available commands:", &root, "");
            Ok(ExitCode::SUCCESS)
        }
        Resolution::NotFound { tokens } => {
            eprintln!("Command not found: {}", tokens.join(" "));
            println!();
            print_listing("Available commands:", &root, "");
            Ok(ExitCode::FAILURE)
        }
        Resolution::Namespace { command, path } => {
            let path = path.join(" ");
            reporter.emit(
                &Diagnostic::error()
                    .with_message(format!("No code block found for command: {}", path))
                    .with_labels(vec![
                        Label::primary(command.file_id, command.span.clone())
                            .with_message("no code block under this heading"),
                    ]),
            );
            if !command.children.is_empty() {
                println!();
                print_listing("Available subcommands:", command, &path);
            }
            Ok(ExitCode::FAILURE)
        }
        Resolution::Runnable { command, extra, .. } => {
            if let Err(e) = runner::run(&command.code, &extra, &ScriptOptions::default()) {
                eprintln!("Command failed: {e}");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read, parse and merge the command files, most general first.
fn load_commands(
    sources: &[PathBuf],
    reporter: &mut Reporter,
) -> Result<Command, Box<dyn std::error::Error>> {
    let mut root = Command::root();

    for path in sources {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        let file_id = reporter
            .files
            .add(path.display().to_string(), source.clone());

        debug!("parsing {} (file {})", path.display(), file_id);
        let parsed = qwer::parser::Parser::new(source, file_id).parse();
        for warning in &parsed.diagnostics {
            reporter.emit(&warning.to_diagnostic());
        }

        qwer::merge(&mut root, parsed.root);
    }

    Ok(root)
}

fn print_listing(title: &str, command: &Command, prefix: &str) {
    println!("{}", title);
    for path in qwer::list(command, prefix) {
        println!("  {}", path);
    }
}
