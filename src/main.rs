use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trove::{
    codec, suggest, summarize, CorpusIndex, DateRange, FileBackend, FilterPipeline, FilterSet,
    HistoryStore, Preferences, QueryEngine, RankingBooster, SearchableItem,
};

mod cli;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let history_backend = FileBackend::new(cli.state_dir.clone());

    match cli.command {
        Commands::Search {
            corpus,
            query,
            limit,
            category,
            kind,
            author,
            tags,
            start_date,
            end_date,
            preferred_categories,
            preferred_authors,
        } => {
            let index = load_corpus(&corpus)?;
            let engine = QueryEngine::new();
            let mut history = HistoryStore::load(history_backend);

            let filter = FilterSet {
                category,
                kind,
                author,
                tags: if tags.is_empty() { None } else { Some(tags) },
                date_range: parse_range(start_date.as_deref(), end_date.as_deref())?,
            };
            let preferences = Preferences {
                preferred_categories,
                preferred_authors,
                recent_searches: history.entries().to_vec(),
            };

            let results = engine.search(&index, &query, limit);
            let results = FilterPipeline::new().apply(results, &filter)?;
            let results = RankingBooster::new().rank(results, &preferences);

            history.add(&query);

            if results.is_empty() {
                println!("no results");
                return Ok(());
            }
            for result in &results {
                println!(
                    "{:>3}. [{:.3}] {} ({}, {}, {})",
                    result.rank + 1,
                    result.score,
                    result.item.title,
                    result.item.id,
                    result.item.category,
                    result.item.published_at.format("%Y-%m-%d"),
                );
            }
        }

        Commands::Suggest {
            corpus,
            query,
            limit,
        } => {
            let index = load_corpus(&corpus)?;
            let engine = QueryEngine::new();
            for term in suggest(&engine, &index, &query, limit) {
                println!("{term}");
            }
        }

        Commands::Stats { corpus } => {
            let index = load_corpus(&corpus)?;
            let summary = summarize(&index);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::History { clear } => {
            let mut history = HistoryStore::load(history_backend);
            if clear {
                history.clear();
            } else {
                for entry in history.entries() {
                    println!("{entry}");
                }
            }
        }
    }

    Ok(())
}

fn load_corpus(path: &Path) -> Result<CorpusIndex, Box<dyn Error>> {
    let payload = fs::read_to_string(path)?;
    let items: Vec<SearchableItem> = serde_json::from_str(&payload)?;
    Ok(CorpusIndex::from_items(items))
}

fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<DateRange>, Box<dyn Error>> {
    // Route through the codec so CLI flags and URL parameters agree on
    // format and validation
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    if let Some(start) = start {
        pairs.push((codec::PARAM_START_DATE, start));
    }
    if let Some(end) = end {
        pairs.push((codec::PARAM_END_DATE, end));
    }
    Ok(codec::decode(pairs)?.date_range)
}
