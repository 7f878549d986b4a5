use crate::commands::{
    import_export, list, locate, misc, search, AppContext, CommandEnum,
};
use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use marklist::config::Config;
use marklist::error::Result;
use marklist::SortOrder;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Bookmark file to read (Chromium JSON, Firefox places.sqlite or exported HTML)
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// Browser whose profile is auto-detected (chrome, chromium, brave, edge, firefox)
    #[arg(long, global = true)]
    pub browser: Option<String>,

    /// Optional custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug", global = true)]
    pub debug: bool,

    /// Output format: colored, plain, json, yaml or toml
    #[arg(short = 'f', long, global = true)]
    pub format: Option<String>,

    /// Show at most N entries
    #[arg(short = 'n', long, global = true)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Sort order flags shared by the listing commands
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct OrderArgs {
    /// Oldest first
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Newest first
    #[arg(long)]
    pub desc: bool,
}

impl OrderArgs {
    pub fn order(&self) -> Option<SortOrder> {
        if self.asc {
            Some(SortOrder::Ascending)
        } else if self.desc {
            Some(SortOrder::Descending)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List bookmarks (default)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        order: OrderArgs,

        /// Show only bookmarks whose title or URL contains QUERY
        #[arg(short = 's', long = "search")]
        query: Option<String>,
    },

    /// Find the current page among the bookmarks
    Locate {
        /// Page URL (default: the URL on the clipboard)
        url: Option<String>,

        #[command(flatten)]
        order: OrderArgs,
    },

    /// Write the bookmark list to a file
    Export {
        /// Output file (default: bookmarks.html)
        file: Option<PathBuf>,

        /// Export format: html, netscape or md (default: from the file extension)
        #[arg(long = "as", value_name = "FORMAT")]
        export_format: Option<String>,

        #[command(flatten)]
        order: OrderArgs,
    },

    /// Copy every bookmark URL to the clipboard
    Copy {
        #[command(flatten)]
        order: OrderArgs,
    },

    /// Pick a bookmark with the fuzzy finder and open it
    Open {
        /// Narrow the candidates first
        query: Option<String>,

        #[command(flatten)]
        order: OrderArgs,
    },

    /// Search as you type; Enter opens the first match
    Search {
        /// Initial query
        query: Option<String>,

        #[command(flatten)]
        order: OrderArgs,
    },

    /// List detected browser profiles
    Browsers,

    /// Start interactive shell
    Shell {
        #[command(flatten)]
        order: OrderArgs,
    },
}

impl Commands {
    pub fn into_command(self) -> CommandEnum {
        match self {
            Commands::List { order, query } => CommandEnum::List(list::ListCommand {
                order: order.order(),
                query,
            }),
            Commands::Locate { url, order } => CommandEnum::Locate(locate::LocateCommand {
                url,
                order: order.order(),
            }),
            Commands::Export {
                file,
                export_format,
                order,
            } => CommandEnum::Export(import_export::ExportCommand {
                file,
                format: export_format,
                order: order.order(),
            }),
            Commands::Copy { order } => CommandEnum::Copy(import_export::CopyCommand {
                order: order.order(),
            }),
            Commands::Open { query, order } => CommandEnum::Open(misc::OpenCommand {
                query,
                order: order.order(),
            }),
            Commands::Search { query, order } => CommandEnum::Search(search::SearchCommand {
                query,
                order: order.order(),
            }),
            Commands::Browsers => CommandEnum::Browsers(import_export::BrowsersCommand),
            Commands::Shell { order } => CommandEnum::Shell(misc::ShellCommand {
                order: order.order(),
            }),
        }
    }
}

pub fn handle_args(cli: Cli, config: &Config) -> Result<()> {
    let ctx = AppContext {
        config,
        source: cli.source.as_deref(),
        browser: cli.browser.as_deref(),
        format: cli
            .format
            .as_deref()
            .map(OutputFormat::from_string)
            .unwrap_or(OutputFormat::Colored),
        nc: cli.nc,
        limit: cli.limit,
    };

    let command = cli
        .command
        .map(Commands::into_command)
        .unwrap_or_else(|| CommandEnum::List(list::ListCommand::default()));

    command.execute(&ctx)
}
