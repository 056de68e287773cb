// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Timelive project*
//!
//! The Timelive command line tool
//!

use clap::{Parser, Subcommand, ValueEnum, builder::PossibleValue};
use directories_next::ProjectDirs;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::{Path, PathBuf};
use timelive_core::{
    ChronoDateMath, DateFormatter, DateMath, DateOrder, DateParser, TimeliveSettings,
};
use timelive_renderer::{
    HtmlFrontend, JsonFrontend, layout_list, new_block, scan_timeline_lists,
};

#[macro_use]
extern crate log;
extern crate simplelog;

const PROJECT_QUALIFIER: &str = "org";
const ORG_NAME: &str = "Timelive";
const APPLICATION_NAME: &str = "Timelive";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Timelive entry point
///
/// One of:
/// - Render the timelines found in a markdown file
/// - Print a demo timeline block
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Setup logging
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("timelive")
        .build();

    CombinedLogger::init(vec![TermLogger::new(
        if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        },
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])?;

    match args.cli_command {
        Command::Render {
            file,
            format,
            settings,
            order,
        } => {
            let mut settings = load_settings(settings.as_deref())?;
            if let Some(order) = order {
                settings.parse_date_format = order.into();
            }
            let markdown = match std::fs::read_to_string(&file) {
                Ok(markdown) => markdown,
                Err(error) => {
                    eprintln!("Error reading {}: {error}", file.display());
                    std::process::exit(1);
                }
            };
            println!("{}", render(&markdown, &settings, format, ChronoDateMath)?);
        }
        Command::NewBlock { settings, order } => {
            let order = match order {
                Some(order) => order.into(),
                None => load_settings(settings.as_deref())?.parse_date_format,
            };
            print!("{}", new_block(order, &ChronoDateMath));
        }
    }

    Ok(())
}

/// Lay out every timeline list in the document and render them all.  `math`
/// supplies the clock for relative dates and empty timelines.
fn render<M: DateMath + Clone>(
    markdown: &str,
    settings: &TimeliveSettings,
    format: OutputFormat,
    math: M,
) -> Result<String, serde_json::Error> {
    let parser = DateParser::with_date_math(settings.parse_date_format, math.clone());
    let formatter = DateFormatter::with_date_math(settings, math);
    let lists = scan_timeline_lists(markdown);
    info!("Rendering {} timelines", lists.len());

    Ok(match format {
        OutputFormat::Json => {
            let frontend = JsonFrontend { pretty: true };
            let layouts: Vec<_> = lists
                .iter()
                .map(|list| layout_list(list, &parser, &formatter, &frontend))
                .collect();
            frontend.render_all(&layouts)?
        }
        OutputFormat::Html => {
            let frontend = HtmlFrontend;
            let layouts: Vec<_> = lists
                .iter()
                .map(|list| layout_list(list, &parser, &formatter, &frontend))
                .collect();
            frontend.render_all(&layouts)
        }
    })
}

/// Load the settings from the given path, or from the default location (if
/// there is a settings file there)
fn load_settings(path: Option<&Path>) -> Result<TimeliveSettings, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(TimeliveSettings::load(path)?),
        None => match settings_file_path() {
            Some(path) => Ok(TimeliveSettings::load_or_default(&path)?),
            None => {
                warn!("No home directory found, using the default settings");
                Ok(TimeliveSettings::default())
            }
        },
    }
}

/// Get the path to the default settings file
fn settings_file_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from(PROJECT_QUALIFIER, ORG_NAME, APPLICATION_NAME)?;
    let path = project_dirs.config_dir().join(SETTINGS_FILE_NAME);
    debug!("Default settings file path = {path:?}");
    Some(path)
}

/// Timelive CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Timelive: draw timelines from markdown lists",
    after_help = "Every item of a timeline list starts with a date token, e.g. `- |2008-02-09| Something`"
)]
pub struct Cli {
    // Timelive command
    #[command(subcommand)]
    pub cli_command: Command,

    /// Log what is going on (to stderr)
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the timelines in a markdown file
    Render {
        /// Path to the markdown file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Path to the settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// The order numeric dates are written in (overrides the settings)
        #[arg(long, value_enum)]
        order: Option<Order>,
    },

    /// Print a demo timeline block
    NewBlock {
        /// Path to the settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// The order to write the dates in (overrides the settings)
        #[arg(long, value_enum)]
        order: Option<Order>,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Html,
}

impl ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Html]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            OutputFormat::Json => {
                Some(PossibleValue::new("json").help("The laid out timelines as JSON"))
            }
            OutputFormat::Html => {
                Some(PossibleValue::new("html").help("An HTML fragment per timeline"))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Order {
    Ymd,
    Dmy,
    Mdy,
}

impl ValueEnum for Order {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Ymd, Self::Dmy, Self::Mdy]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Order::Ymd => Some(PossibleValue::new("ymd").help("Year, month, day (2008-02-09)")),
            Order::Dmy => Some(PossibleValue::new("dmy").help("Day, month, year (09/02/2008)")),
            Order::Mdy => Some(PossibleValue::new("mdy").help("Month, day, year (02/09/2008)")),
        }
    }
}

impl From<Order> for DateOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Ymd => DateOrder::Ymd,
            Order::Dmy => DateOrder::Dmy,
            Order::Mdy => DateOrder::Mdy,
        }
    }
}
