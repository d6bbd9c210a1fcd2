//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notexml")]
#[command(about = "Read map notes from API responses or dump files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Reader configuration file (default: $NOTEXML_CONFIG)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, later files refreshing earlier ones
    List {
        /// XML files to read, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Input dialect (api, dump)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Show each note's comments
        #[arg(long)]
        comments: bool,
    },

    /// Show note and comment totals
    Stats {
        /// XML files to read, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Input dialect (api, dump)
        #[arg(short, long)]
        dialect: Option<String>,
    },
}
