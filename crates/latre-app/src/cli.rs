use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "latre")]
#[command(about = "Import, deduplicate and export vCard contacts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Contact store directory, overriding `store.path`
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Import contacts from vCard files or file:// URIs")]
    Import {
        #[arg(required = true)]
        sources: Vec<String>,

        /// Resolve every contact on its own, skipping the whole-batch probe
        #[arg(long)]
        no_batch_add: bool,
    },

    #[command(about = "Export stored contacts to vCard")]
    Export {
        /// Target file, or directory with --split
        #[arg(long, short)]
        output: PathBuf,

        /// Write one file per contact
        #[arg(long)]
        split: bool,

        /// Keep photo references instead of embedding local images
        #[arg(long)]
        no_photos: bool,
    },

    #[command(about = "List stored contacts")]
    List,

    #[command(about = "Remove contacts by uid")]
    Remove {
        #[arg(required = true)]
        uids: Vec<String>,
    },
}
