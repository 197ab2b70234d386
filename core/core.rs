pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod generator;
pub mod listing;
pub mod paths;
pub mod render;
pub mod tree;

pub use config::Config;
pub use content::ContentOracle;
pub use error::{AppError, Result};
pub use filter::PathFilter;
pub use generator::{Generation, GeneratorOptions, SummaryGenerator};
pub use listing::{DirListing, ListedEntry, list_dir};
pub use render::render_summary;
pub use tree::{BuildReport, SummaryEntry, SummaryLink, TreeBuilder};
