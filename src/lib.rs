pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod load;
pub mod search;
pub mod server;
pub mod source;
pub mod tools;
pub mod tracing;
pub mod types;

pub use context::SearchContext;
pub use error::{EmptyQueryError, LoadError, MalformedIndexError, SourceError};
pub use load::{LoadOptions, load_from_str, load_path};
pub use search::{Bucket, IndexStore, PartitionRule, QueryResolver, ResolveOptions, normalize, resolve};
pub use source::SourceFormat;
pub use types::{SymbolEntry, SymbolKind};
