//! Command-line definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use sprout_core::{GraphStrategy, GraphTheme, HighlightMode, NoteId, OwnerId};
use std::path::PathBuf;

/// sprout - notes that connect themselves through shared keywords
#[derive(Parser, Debug)]
#[command(name = "sprout", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides SPROUT_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Owner whose notes are read and written
    #[arg(long, global = true, env = "SPROUT_OWNER_ID", default_value_t = 1)]
    pub owner: OwnerId,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a note; keywords are extracted automatically
    Add(AddArgs),
    /// List notes with their keywords
    #[command(visible_alias = "ls")]
    List,
    /// Show one note
    Show(IdArgs),
    /// Change a note's title or content
    Edit(EditArgs),
    /// Delete a note
    Rm(IdArgs),
    /// Print the keyword graph
    Graph(GraphArgs),
    /// Plant the welcome notes if the garden is empty
    Seed,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    pub id: NoteId,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: String,

    /// Note body (markup allowed)
    #[arg(short, long, conflicts_with = "file", default_value = "")]
    pub content: String,

    /// Read the note body from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: NoteId,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read the new body from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Node to focus, as on hover
    #[arg(long)]
    pub focus: Option<NoteId>,

    /// Which nodes a focus lights up: focal|neighborhood
    #[arg(long)]
    pub highlight: Option<HighlightMode>,

    /// Edge construction: pairwise|index
    #[arg(long)]
    pub strategy: Option<GraphStrategy>,

    /// Color theme: light|dark
    #[arg(long)]
    pub theme: Option<GraphTheme>,
}
