//! Interactive command - the single-screen utility.
//!
//! Every line read from stdin is one user action. Actions that change the
//! document or the options build a new [`RenderOptions`] value and run exactly
//! one render pass; errors are drawn on the screen and the loop keeps going.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use pdfquote_core::{PageSelection, QuoteConfig, RenderModel, RenderOptions, render};

use super::load_config;
use super::process::save_download;
use super::screen::{ScreenHeader, render_screen};

const HELP: &str = "\
Commands:
  open <path>            load a PDF
  close                  unload the current PDF
  pages all              extract every page
  pages <start> <end>    extract an inclusive 1-indexed range
  breakdown on|off       show individual item calculations
  wordcount on|off       show the word count
  save [path]            write the extracted text to a file
  show                   redraw the screen
  help                   show this help
  quit                   leave";

/// Arguments for the interactive command.
#[derive(Args)]
pub struct InteractiveArgs {
    /// PDF to open on start
    input: Option<PathBuf>,
}

/// A parsed user action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Open(PathBuf),
    Close,
    Pages(PageSelection),
    Breakdown(bool),
    WordCount(bool),
    Save(Option<PathBuf>),
    Show,
    Help,
    Quit,
}

fn parse_toggle(value: Option<&str>) -> Result<bool, String> {
    match value {
        Some("on") | Some("true") | Some("yes") => Ok(true),
        Some("off") | Some("false") | Some("no") => Ok(false),
        _ => Err("expected 'on' or 'off'".to_string()),
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "open" if !rest.is_empty() => Ok(Command::Open(PathBuf::from(rest))),
        "open" => Err("usage: open <path>".to_string()),
        "close" => Ok(Command::Close),
        "pages" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let selection = match parts.as_slice() {
                [start, end] => PageSelection::parse(&format!("{}-{}", start, end))?,
                [single] => PageSelection::parse(single)?,
                _ => return Err("usage: pages all | pages <start> <end>".to_string()),
            };
            Ok(Command::Pages(selection))
        }
        "breakdown" => parse_toggle(rest.split_whitespace().next()).map(Command::Breakdown),
        "wordcount" => parse_toggle(rest.split_whitespace().next()).map(Command::WordCount),
        "save" if rest.is_empty() => Ok(Command::Save(None)),
        "save" => Ok(Command::Save(Some(PathBuf::from(rest)))),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (type 'help')", other)),
    }
}

/// Current input of the screen plus the last render.
struct Session {
    config: QuoteConfig,
    source: Option<String>,
    document: Option<Vec<u8>>,
    options: RenderOptions,
    model: RenderModel,
}

/// What the loop should do after an action.
enum Outcome {
    Redraw,
    Quiet,
    Message(String),
    Quit,
}

impl Session {
    fn new(config: QuoteConfig) -> Self {
        let options = config.initial_options();
        let mut session = Self {
            config,
            source: None,
            document: None,
            options,
            model: RenderModel::default(),
        };
        session.rerender();
        session
    }

    fn rerender(&mut self) {
        debug!("Render pass with {:?}", self.options);
        self.model = render(self.document.as_deref(), &self.options, &self.config);
    }

    fn set_options(&mut self, options: RenderOptions) -> Outcome {
        self.options = options;
        self.rerender();
        Outcome::Redraw
    }

    async fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Open(path) => match tokio::fs::read(&path).await {
                Ok(data) => {
                    info!("Opened {}", path.display());
                    self.source = Some(path.display().to_string());
                    self.document = Some(data);
                    self.rerender();
                    Outcome::Redraw
                }
                Err(e) => Outcome::Message(format!("cannot open {}: {}", path.display(), e)),
            },
            Command::Close => {
                self.source = None;
                self.document = None;
                self.rerender();
                Outcome::Redraw
            }
            Command::Pages(pages) => self.set_options(self.options.with_pages(pages)),
            Command::Breakdown(show) => self.set_options(self.options.with_item_breakdown(show)),
            Command::WordCount(show) => self.set_options(self.options.with_word_count(show)),
            Command::Save(path) => match save_download(&self.model, path.as_deref()) {
                Ok(_) => Outcome::Quiet,
                Err(e) => Outcome::Message(format!("save failed: {}", e)),
            },
            Command::Show => Outcome::Redraw,
            Command::Help => Outcome::Message(HELP.to_string()),
            Command::Quit => Outcome::Quit,
        }
    }

    fn draw(&self) {
        let header = ScreenHeader {
            source: self.source.as_deref(),
            options: &self.options,
        };
        println!("{}", render_screen(&self.model, &header));
    }
}

fn prompt() {
    print!("{} ", style(">").cyan());
    let _ = std::io::stdout().flush();
}

pub async fn run(args: InteractiveArgs, config_path: Option<&str>) -> anyhow::Result<std::process::ExitCode> {
    let config = load_config(config_path)?;
    let mut session = Session::new(config);

    if let Some(input) = args.input {
        if let Outcome::Message(msg) = session.apply(Command::Open(input)).await {
            eprintln!("{} {}", style("✗").red(), msg);
        }
    }
    session.draw();
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{} {}", style("✗").red(), msg);
                prompt();
                continue;
            }
        };

        match session.apply(command).await {
            Outcome::Redraw => session.draw(),
            Outcome::Quiet => {}
            Outcome::Message(msg) => println!("{}", msg),
            Outcome::Quit => break,
        }
        prompt();
    }

    Ok(std::process::ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfquote_core::NoticeKind;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("open a b.pdf"), Ok(Command::Open(PathBuf::from("a b.pdf"))));
        assert_eq!(parse_command("pages all"), Ok(Command::Pages(PageSelection::All)));
        assert_eq!(parse_command("pages 2 5"), Ok(Command::Pages(PageSelection::range(2, 5))));
        assert_eq!(parse_command("pages 3-4"), Ok(Command::Pages(PageSelection::range(3, 4))));
        assert_eq!(parse_command("breakdown on"), Ok(Command::Breakdown(true)));
        assert_eq!(parse_command("wordcount off"), Ok(Command::WordCount(false)));
        assert_eq!(parse_command("save"), Ok(Command::Save(None)));
        assert_eq!(parse_command("  "), Ok(Command::Show));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("open").is_err());
        assert!(parse_command("pages 0 3").is_err());
        assert!(parse_command("pages 1 2 3").is_err());
        assert!(parse_command("breakdown maybe").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[tokio::test]
    async fn test_session_survives_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.pdf");
        std::fs::write(&bad, b"not a pdf").unwrap();

        let mut session = Session::new(QuoteConfig::default());
        assert_eq!(session.model.notices[0].kind, NoticeKind::NoFileProvided);

        assert!(matches!(session.apply(Command::Open(bad)).await, Outcome::Redraw));
        assert_eq!(session.model.notices[0].kind, NoticeKind::MalformedDocument);

        let missing = dir.path().join("missing.pdf");
        assert!(matches!(session.apply(Command::Open(missing)).await, Outcome::Message(_)));
        assert_eq!(session.model.notices[0].kind, NoticeKind::MalformedDocument);

        assert!(matches!(session.apply(Command::WordCount(true)).await, Outcome::Redraw));
        assert!(session.options.show_word_count);

        assert!(matches!(session.apply(Command::Close).await, Outcome::Redraw));
        assert_eq!(session.model.notices[0].kind, NoticeKind::NoFileProvided);
    }
}
