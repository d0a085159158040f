use crate::types::SymbolKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docsym")]
#[command(about = "Prefix symbol search over generated documentation indexes", long_about = None)]
pub struct Cli {
    /// Config file (default: ./docsym.toml, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Search data: JSON bucket map, search script, or directory of all_*.js scripts
    #[arg(short, long, global = true)]
    pub index: Option<PathBuf>,
    /// Number of leading name units forming a bucket key
    #[arg(long, global = true)]
    pub partition_width: Option<usize>,
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find symbols whose name starts with QUERY
    Search {
        query: String,
        #[arg(short, long)]
        kind: Option<SymbolKind>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// List bucket keys with entry counts
    Buckets {
        #[arg(long)]
        json: bool,
    },
    /// List every entry of one bucket
    List {
        bucket: String,
        #[arg(long)]
        json: bool,
    },
    /// Serve the index over MCP on stdio
    Serve,
}
