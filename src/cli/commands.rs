use clap::{Args, Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use crate::cli::error::{user_error, validate_interval, validate_non_empty};
use crate::cli::output::{
    board_json, format_board, format_cards, format_import_status, format_milestones, get_terminal_width, is_tty,
};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::db::DbConnection;
use crate::filter::Axis;
use crate::notify::ChangeFeed;
use crate::repo::{import_batch, ImportBatch, ImportKind, RevisionRepo, SqliteSource};
use anyhow::{Context, Result};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bugboard")]
#[command(about = "Live milestone board for issue-tracker bugs and kanban cards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Filter toggles applied on top of the default filter state.
/// Each flag flips the named key; naming a key twice flips it back.
#[derive(Args, Debug, Clone, Default)]
pub struct ToggleArgs {
    /// Toggle a status (e.g. "Fix Released" to show released fixes)
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Vec<String>,
    /// Toggle an importance (e.g. "Wishlist")
    #[arg(long = "importance", value_name = "IMPORTANCE")]
    pub importance: Vec<String>,
    /// Toggle a milestone column (use "none" for untargeted tasks)
    #[arg(long = "milestone", value_name = "MILESTONE")]
    pub milestone: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace stored bugs, project metadata or cards with a collector JSON file
    Import {
        /// What the file contains
        #[arg(value_enum)]
        kind: ImportTarget,
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Signal watchers that upstream data changed
    Ping,
    /// Show the milestone board
    Board {
        #[command(flatten)]
        toggles: ToggleArgs,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// List milestones and which ones are shown
    Milestones {
        #[command(flatten)]
        toggles: ToggleArgs,
    },
    /// List kanban cards assigned to you
    Mine {
        /// Assignee name (defaults to board.me from the config)
        #[arg(long)]
        name: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Redraw the board whenever the stored data changes
    Watch {
        /// Seconds between change checks (defaults to watch.interval)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
        #[command(flatten)]
        toggles: ToggleArgs,
    },
    /// Show the snapshot revision and the last import
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportTarget {
    Bugs,
    Meta,
    Cards,
}

impl From<ImportTarget> for ImportKind {
    fn from(target: ImportTarget) -> Self {
        match target {
            ImportTarget::Bugs => ImportKind::Bugs,
            ImportTarget::Meta => ImportKind::Meta,
            ImportTarget::Cards => ImportKind::Cards,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    match cli.command {
        Commands::Import { kind, file } => handle_import(&config, kind.into(), &file),
        Commands::Ping => handle_ping(&config),
        Commands::Board { toggles, json } => handle_board(&config, &toggles, json),
        Commands::Milestones { toggles } => handle_milestones(&config, &toggles),
        Commands::Mine { name, json } => handle_mine(&config, name, json),
        Commands::Watch { interval, toggles } => handle_watch(&config, interval, &toggles),
        Commands::Status => handle_status(&config),
    }
}

/// Flip every toggle named on the command line
fn apply_toggles(dashboard: &mut Dashboard, toggles: &ToggleArgs) -> Result<()> {
    for key in &toggles.status {
        dashboard.toggle(Axis::Status, key)?;
    }
    for key in &toggles.importance {
        dashboard.toggle(Axis::Importance, key)?;
    }
    for key in &toggles.milestone {
        dashboard.toggle(Axis::Milestone, key)?;
    }
    Ok(())
}

/// Load the current snapshot into a fresh dashboard
fn load_dashboard(conn: &Connection, config: &Config, toggles: &ToggleArgs) -> Result<Dashboard> {
    let mut dashboard = Dashboard::new(&config.project_url);
    dashboard.refresh(&SqliteSource::new(conn))?;
    apply_toggles(&mut dashboard, toggles)?;
    Ok(dashboard)
}

fn handle_import(config: &Config, kind: ImportKind, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let batch = ImportBatch::parse(kind, &json)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    let conn = DbConnection::connect(&config.data_location)?;
    let revision = import_batch(&conn, &batch)?;
    let count = match &batch {
        ImportBatch::Bugs(bugs) => bugs.len(),
        ImportBatch::Meta(entries) => entries.len(),
        ImportBatch::Cards(cards) => cards.len(),
    };
    println!("Imported {} {} (revision {})", count, kind.as_str(), revision);
    Ok(())
}

fn handle_ping(config: &Config) -> Result<()> {
    let conn = DbConnection::connect(&config.data_location)?;
    let revision = RevisionRepo::bump(&conn)?;
    println!("Revision {}", revision);
    Ok(())
}

fn handle_board(config: &Config, toggles: &ToggleArgs, json: bool) -> Result<()> {
    let conn = DbConnection::connect(&config.data_location)?;
    let dashboard = load_dashboard(&conn, config, toggles)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board_json(&dashboard))?);
    } else {
        print!("{}", format_board(&dashboard, get_terminal_width(), is_tty()));
    }
    Ok(())
}

fn handle_milestones(config: &Config, toggles: &ToggleArgs) -> Result<()> {
    let conn = DbConnection::connect(&config.data_location)?;
    let dashboard = load_dashboard(&conn, config, toggles)?;
    print!("{}", format_milestones(&dashboard, is_tty()));
    Ok(())
}

fn handle_mine(config: &Config, name: Option<String>, json: bool) -> Result<()> {
    let name = match name.or_else(|| config.my_name.clone()) {
        Some(name) => name,
        None => user_error("No name given. Pass --name or set board.me in ~/.bugboard/rc"),
    };
    if let Err(e) = validate_non_empty(&name, "Name") {
        user_error(&e);
    }

    let conn = DbConnection::connect(&config.data_location)?;
    let dashboard = load_dashboard(&conn, config, &ToggleArgs::default())?;
    let cards = dashboard.my_cards(&name);

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        print!("{}", format_cards(&cards, is_tty()));
    }
    Ok(())
}

fn handle_status(config: &Config) -> Result<()> {
    let conn = DbConnection::connect(&config.data_location)?;
    let revision = RevisionRepo::current(&conn)?;
    let last = RevisionRepo::last_import(&conn)?;
    println!("Database: {}", config.data_location.display());
    println!("Project: {}", config.project_url);
    println!("Current revision: {}", revision);
    println!("{}", format_import_status(last.as_ref(), chrono::Utc::now().timestamp()));
    Ok(())
}

/// Poll the revision counter and redraw on change
///
/// A revision change is published on the change feed; the subscribed handler
/// marks the board stale and the loop refetches the whole snapshot.
fn handle_watch(config: &Config, interval: Option<u64>, toggles: &ToggleArgs) -> Result<()> {
    let interval = match validate_interval(interval.unwrap_or(config.watch_interval_secs)) {
        Ok(secs) => secs,
        Err(e) => user_error(&e),
    };

    let conn = DbConnection::connect(&config.data_location)?;
    let source = SqliteSource::new(&conn);
    let mut dashboard = load_dashboard(&conn, config, toggles)?;
    let mut seen = dashboard.revision().unwrap_or(0);

    let feed = ChangeFeed::new();
    let stale = Rc::new(Cell::new(false));
    let _subscription = feed.on_change({
        let stale = Rc::clone(&stale);
        move || stale.set(true)
    });

    let tty = is_tty();
    redraw(&dashboard, tty);
    log::info!("Watching revision {} every {}s", seen, interval);

    loop {
        std::thread::sleep(Duration::from_secs(interval));

        let revision = RevisionRepo::current(&conn)?;
        if revision != seen {
            seen = revision;
            feed.notify();
        }

        if stale.replace(false) && dashboard.refresh(&source)? {
            redraw(&dashboard, tty);
        }
    }
}

fn redraw(dashboard: &Dashboard, tty: bool) {
    if tty {
        // Clear screen and home the cursor
        print!("\x1b[2J\x1b[H");
    }
    print!("{}", format_board(dashboard, get_terminal_width(), tty));
}
