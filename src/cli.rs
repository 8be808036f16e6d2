use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quire - content runtime for small sites
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to $QUIRE_CONFIG_PATH/quire.toml, ./quire.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Machine-readable output (one JSON object per line)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror every configured source into the data store once
    Sync,

    /// Mirror every configured source and keep mirroring until Ctrl+C
    Watch,

    /// Load the mirrored pages and list them
    Pages {
        /// List drafts instead of published pages
        #[arg(long, conflicts_with = "featured")]
        drafts: bool,

        /// List only featured pages
        #[arg(long)]
        featured: bool,
    },

    /// Print the integrity digest of a file under the static root
    Integrity {
        /// Path relative to the static root
        path: PathBuf,
    },

    /// Build a spritesheet from SVG files or URLs and print it
    Sprites {
        /// SVG files or http(s) URLs, in spritesheet order
        #[arg(required = true)]
        sources: Vec<String>,
    },

    /// Resolve an icon file name against the icons directory
    Icon {
        /// Icon file name, e.g. icon-192x192.png or favicon.ico
        name: String,

        /// Write the icon body to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the site chrome: title, logo, navigation and icons
    Site,
}
