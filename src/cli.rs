//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Folio content studio CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load the document, fill defaults, repair references, and rewrite both persisted forms
    Sync,

    /// Start the site dev server and wait until it accepts connections
    Preview {
        /// The port the dev server listens on
        #[arg(short, long)]
        port: Option<u16>,

        /// open a browser once ready
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        open: Option<bool>,
    },

    /// Edit records in one of the collections
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// The homepage featured-entry reference
    Feature {
        #[command(subcommand)]
        command: FeatureCommands,
    },

    /// Hand-authored homepage recent entries
    Recent {
        #[command(subcommand)]
        command: RecentCommands,
    },

    /// Blog post management
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Tag registry management
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Files in the uploads directory
    Upload {
        #[command(subcommand)]
        command: UploadCommands,
    },
}

/// Which collection an `item` command targets.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CollectionArg {
    Papers,
    Projects,
    Posts,
}

/// How a field value on the command line is interpreted.
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum FieldKindArg {
    #[default]
    Text,
    Int,
    Flag,
    List,
}

/// Reorder direction.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
}

/// `item` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ItemCommands {
    /// List records in display order
    Ls { collection: CollectionArg },

    /// Insert a blank record at the front
    New { collection: CollectionArg },

    /// Delete the record at `index` (references are repaired)
    Rm {
        collection: CollectionArg,
        index: usize,
    },

    /// Move the record at `index` up or down
    Mv {
        collection: CollectionArg,
        index: usize,
        direction: Direction,
    },

    /// Print one field of a record
    Get {
        collection: CollectionArg,
        index: usize,
        key: String,

        /// how to render the value
        #[arg(short, long, value_enum, default_value = "text")]
        kind: FieldKindArg,
    },

    /// Write one field of a record
    Set {
        collection: CollectionArg,
        index: usize,
        key: String,
        value: String,

        /// how to parse the value
        #[arg(short, long, value_enum, default_value = "text")]
        kind: FieldKindArg,
    },

    /// Show or replace a record's tags (replacement is constrained to the registry)
    Tags {
        collection: CollectionArg,
        index: usize,

        /// comma-separated tags; omit to show the current membership
        tags: Option<String>,
    },
}

/// `feature` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FeatureCommands {
    /// List every entry the reference may point at
    Ls,

    /// Show what the reference currently resolves to
    Show,

    /// Point the reference at an entry
    Set {
        /// reference type: paper, project, or blog
        r#type: String,

        /// record id within that collection
        id: String,
    },
}

/// `recent` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RecentCommands {
    /// List manual entries in display order
    Ls,

    /// Insert a blank entry at the front
    Add,

    /// Delete the entry at `index`
    Rm { index: usize },

    /// Move the entry at `index` up or down
    Mv { index: usize, direction: Direction },

    /// Write one field of an entry
    Set {
        index: usize,
        key: String,
        value: String,
    },
}

/// `post` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PostCommands {
    /// Create a markdown post and its blog record
    New {
        /// post title
        title: String,

        /// display date (default: today, e.g. "Apr 15, 2025")
        #[arg(short, long)]
        date: Option<String>,

        /// short excerpt shown in listings
        #[arg(short, long)]
        excerpt: Option<String>,

        /// comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        /// read the post body from a file instead of starting empty
        #[arg(short, long)]
        body: Option<PathBuf>,

        /// route of an attached pdf (e.g. "/uploads/paper.pdf")
        #[arg(long)]
        pdf: Option<String>,
    },

    /// List authored markdown post files
    Ls,
}

/// `tag` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagCommands {
    /// Register a tag
    Add {
        /// tag name
        name: String,
    },

    /// Remove a tag from the registry (records keep their strings)
    Rm {
        /// tag name
        name: String,
    },

    /// List registered tags
    Ls,
}

/// `upload` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum UploadCommands {
    /// Copy a file into the uploads directory and print its route
    Add {
        /// the file to import
        file: PathBuf,
    },

    /// List uploaded routes
    Ls {
        /// only list pdf attachments
        #[arg(long)]
        pdf: bool,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_sync(&self) -> bool {
        matches!(self.command, Commands::Sync)
    }
    pub const fn is_preview(&self) -> bool {
        matches!(self.command, Commands::Preview { .. })
    }
}
