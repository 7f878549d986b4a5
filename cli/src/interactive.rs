use crate::commands::import_export::{copy_to, ExportCommand};
use crate::commands::locate::{clipboard_page, locate_in_view};
use crate::commands::AppContext;
use crate::format::visible_entries;
use marklist::browser::{activate, open_url};
use marklist::clipboard::SystemClipboard;
use marklist::error::{MarklistError, Result};
use marklist::view::BookmarkView;
use marklist::SortOrder;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// What a shell line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Order(SortOrder),
    Filter(String),
    Locate(Option<String>),
    Export(Option<PathBuf>),
    Copy,
    Open(usize),
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            return Ok(ShellCommand::Filter(query.trim().to_string()));
        }

        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (line, None),
        };

        match cmd {
            "ls" | "list" => Ok(ShellCommand::List),
            "asc" => Ok(ShellCommand::Order(SortOrder::Ascending)),
            "desc" => Ok(ShellCommand::Order(SortOrder::Descending)),
            "l" | "locate" => Ok(ShellCommand::Locate(arg.map(str::to_string))),
            "export" => Ok(ShellCommand::Export(arg.map(PathBuf::from))),
            "copy" => Ok(ShellCommand::Copy),
            "o" | "open" => {
                let arg = arg.ok_or("Usage: open <number>")?;
                match arg.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(ShellCommand::Open(n)),
                    _ => Err(format!("Invalid index: {}", arg)),
                }
            }
            "?" | "help" => Ok(ShellCommand::Help),
            "q" | "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => match cmd.parse::<usize>() {
                Ok(n) if n > 0 => Ok(ShellCommand::Open(n)),
                _ => Err(format!("Unknown command: {} (type '?' for help)", cmd)),
            },
        }
    }
}

/// Shell state: the displayed list survives between commands
pub struct Shell<'a> {
    ctx: &'a AppContext<'a>,
    view: BookmarkView,
}

impl<'a> Shell<'a> {
    pub fn new(ctx: &'a AppContext<'a>, order: SortOrder) -> Result<Self> {
        Ok(Self {
            ctx,
            view: ctx.load_view(order)?,
        })
    }

    pub fn view(&self) -> &BookmarkView {
        &self.view
    }

    /// Run one command; `false` ends the shell
    pub fn handle(&mut self, command: ShellCommand) -> Result<bool> {
        match command {
            ShellCommand::List => self.print(),
            ShellCommand::Order(order) => {
                // A fresh request; the current filter carries over
                let query = self.view.query().to_string();
                self.view = self.ctx.load_view(order)?;
                self.view.apply_filter(&query);
                self.print();
            }
            ShellCommand::Filter(query) => {
                let shown = self.view.apply_filter(&query);
                log::debug!("Filter '{}' shows {} of {}", query, shown, self.view.len());
                self.print();
            }
            ShellCommand::Locate(url) => {
                let url = url.or_else(clipboard_page);
                if locate_in_view(&mut self.view, url.as_deref()).is_some() {
                    self.print();
                }
            }
            ShellCommand::Export(file) => {
                let export = ExportCommand {
                    file,
                    ..ExportCommand::default()
                };
                let target = export.target(self.ctx);
                let records = self.view.records();
                export
                    .export_format(&target)?
                    .exporter(&self.ctx.config.document_title, &self.ctx.config.date_format)
                    .export(&records, &target)?;
                println!("Exported {} bookmark(s) to {}", records.len(), target.display());
            }
            ShellCommand::Copy => {
                let mut clipboard = SystemClipboard::new().inspect_err(|_| {
                    eprintln!("Failed to copy URLs");
                })?;
                copy_to(&mut clipboard, &self.view.records())?;
            }
            ShellCommand::Open(position) => {
                let record = self.view.get(position - 1).ok_or_else(|| {
                    MarklistError::InvalidInput(format!("Index {} not found", position))
                })?;
                println!("Opening: {}", record.url);
                activate(&record.url, "", open_url)?;
            }
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn print(&self) {
        if self.view.visible_count() == 0 {
            println!("No bookmarks to display.");
            return;
        }
        let entries = visible_entries(&self.view, &self.ctx.config.date_format, self.ctx.limit);
        self.ctx.format.print_entries(&entries, self.ctx.nc);
    }
}

pub fn run(ctx: &AppContext, order: SortOrder) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| MarklistError::Other(e.to_string()))?;
    let mut shell = Shell::new(ctx, order)?;

    println!(
        "marklist interactive mode - {} bookmark(s), type '?' for help",
        shell.view().len()
    );

    loop {
        let readline = rl.readline("marklist> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)
                    .map_err(|e| MarklistError::Other(e.to_string()))?;

                match ShellCommand::parse(line) {
                    Ok(command) => match shell.handle(command) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => {
                            log::error!("{}", e);
                            eprintln!("Error: {}", e);
                        }
                    },
                    Err(msg) => eprintln!("{}", msg),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "
INTERACTIVE MODE COMMANDS:

BROWSE:
    ls                     List the visible bookmarks
    asc | desc             Reload sorted oldest or newest first
    /keywords              Show only bookmarks whose title or URL contains keywords
    /                      Clear the filter

FIND & OPEN:
    locate [url]           Highlight the bookmark for url (default: URL on clipboard)
    open <n> | o <n> | <n> Open bookmark number n in the browser

SHARE:
    export [file]          Write the list to file (default: bookmarks.html)
    copy                   Copy every URL to the clipboard

HELP & EXIT:
    ?  or help             Show this help
    q  or quit or exit     Exit interactive mode
    ^D or ^C               Exit interactive mode
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::bookmark_file;
    use marklist::config::Config;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case("ls", ShellCommand::List)]
    #[case("asc", ShellCommand::Order(SortOrder::Ascending))]
    #[case("desc", ShellCommand::Order(SortOrder::Descending))]
    #[case("/rust lang", ShellCommand::Filter("rust lang".to_string()))]
    #[case("/", ShellCommand::Filter(String::new()))]
    #[case("locate", ShellCommand::Locate(None))]
    #[case("locate https://a.example", ShellCommand::Locate(Some("https://a.example".to_string())))]
    #[case("export", ShellCommand::Export(None))]
    #[case("export out.md", ShellCommand::Export(Some(PathBuf::from("out.md"))))]
    #[case("copy", ShellCommand::Copy)]
    #[case("open 3", ShellCommand::Open(3))]
    #[case("7", ShellCommand::Open(7))]
    #[case("?", ShellCommand::Help)]
    #[case("q", ShellCommand::Quit)]
    fn test_parse(#[case] line: &str, #[case] expected: ShellCommand) {
        assert_eq!(ShellCommand::parse(line).unwrap(), expected);
    }

    #[rstest]
    #[case("open")]
    #[case("open zero")]
    #[case("0")]
    #[case("frobnicate")]
    fn test_parse_errors(#[case] line: &str) {
        assert!(ShellCommand::parse(line).is_err());
    }

    #[test]
    fn test_shell_session() {
        let (dir, path) = bookmark_file();
        let config = Config::default();
        let ctx = AppContext {
            source: Some(&path),
            nc: true,
            ..AppContext::new(&config)
        };
        let mut shell = Shell::new(&ctx, SortOrder::Descending).unwrap();
        assert_eq!(shell.view().get(0).unwrap().title, "Beta");

        assert!(shell.handle(ShellCommand::Filter("gamma".to_string())).unwrap());
        assert_eq!(shell.view().visible_count(), 1);

        // Reordering keeps the filter
        assert!(shell.handle(ShellCommand::Order(SortOrder::Ascending)).unwrap());
        assert_eq!(shell.view().get(0).unwrap().title, "Alpha");
        assert_eq!(shell.view().visible_count(), 1);

        assert!(shell
            .handle(ShellCommand::Locate(Some("https://b.example".to_string())))
            .unwrap());
        assert_eq!(shell.view().highlighted(), Some(2));

        let target = dir.path().join("out.md");
        assert!(shell.handle(ShellCommand::Export(Some(target.clone()))).unwrap());
        let md = fs::read_to_string(&target).unwrap();
        assert_eq!(md.lines().count(), 3);
        assert!(md.starts_with("- [Alpha](https://a.example)"));

        assert!(matches!(
            shell.handle(ShellCommand::Open(9)),
            Err(MarklistError::InvalidInput(_))
        ));
        assert!(!shell.handle(ShellCommand::Quit).unwrap());
    }
}
