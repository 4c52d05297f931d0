use std::path::PathBuf;

use clap::{Parser, Subcommand};

use trove::ItemType;

#[derive(Parser)]
#[command(
    name = "trove",
    about = "In-memory fuzzy search and ranking for content libraries",
    version
)]
pub struct Cli {
    /// Directory for the persisted query history
    #[arg(long, default_value = ".trove", global = true)]
    pub state_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a JSON corpus file with optional facet filters
    Search {
        /// Path to a JSON array of corpus items
        #[arg(short, long)]
        corpus: PathBuf,

        /// Query string; blank returns the corpus in order
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = trove::DEFAULT_LIMIT)]
        limit: usize,

        /// Exact category filter
        #[arg(long)]
        category: Option<String>,

        /// Exact type filter (article, newsletter, trend)
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<ItemType>,

        /// Exact author filter
        #[arg(long)]
        author: Option<String>,

        /// Tag filter, repeatable; an item matches if it carries any of them
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Inclusive start of the publication window (RFC 3339)
        #[arg(long)]
        start_date: Option<String>,

        /// Inclusive end of the publication window (RFC 3339)
        #[arg(long)]
        end_date: Option<String>,

        /// Category to boost, repeatable
        #[arg(long = "prefer-category")]
        preferred_categories: Vec<String>,

        /// Author to boost, repeatable
        #[arg(long = "prefer-author")]
        preferred_authors: Vec<String>,
    },

    /// Print autocomplete suggestions for a query
    Suggest {
        /// Path to a JSON array of corpus items
        #[arg(short, long)]
        corpus: PathBuf,

        query: String,

        #[arg(short, long, default_value_t = trove::DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Print corpus facet statistics
    Stats {
        /// Path to a JSON array of corpus items
        #[arg(short, long)]
        corpus: PathBuf,
    },

    /// Print or clear the persisted query history
    History {
        /// Empty the history instead of printing it
        #[arg(long)]
        clear: bool,
    },
}
