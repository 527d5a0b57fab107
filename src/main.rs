//! reelrank CLI - content-based movie recommendations from a CSV dataset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reelrank::corpus::loader;
use reelrank::eval::evaluate;
use reelrank::poster::TmdbClient;
use reelrank::{FeatureSet, Recommender};

#[derive(Parser)]
#[command(name = "reelrank")]
#[command(
    author,
    version,
    about = "Content-based movie recommendations (TF-IDF + cosine similarity)"
)]
struct Cli {
    /// Path to the movie dataset CSV
    #[arg(long, short = 'd', env = "REELRANK_DATA", default_value = "data/tmdb_5000_movies.csv")]
    data: PathBuf,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    Baseline,
    Hybrid,
}

impl From<Model> for FeatureSet {
    fn from(model: Model) -> Self {
        match model {
            Model::Baseline => FeatureSet::Baseline,
            Model::Hybrid => FeatureSet::Hybrid,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact movie title
        title: String,

        /// Model variant
        #[arg(long, short = 'm', value_enum, default_value_t = Model::Hybrid)]
        model: Model,

        /// Number of recommendations
        #[arg(long, short = 'n', default_value_t = 10)]
        top: usize,

        /// Look up poster URLs on TMDB (needs TMDB_API_KEY)
        #[arg(long)]
        posters: bool,
    },

    /// Evaluate a model variant over a list of test titles
    Evaluate {
        /// Model variant
        #[arg(long, short = 'm', value_enum, default_value_t = Model::Baseline)]
        model: Model,

        /// Recommendations fetched per test title
        #[arg(long, short = 'n', default_value_t = 2000)]
        top: usize,

        /// Test titles (defaults to the standard five)
        titles: Vec<String>,
    },

    /// Show the top TF-IDF terms of one movie
    Terms {
        /// Exact movie title
        title: String,

        /// Model variant
        #[arg(long, short = 'm', value_enum, default_value_t = Model::Baseline)]
        model: Model,

        /// Number of terms
        #[arg(long, short = 'n', default_value_t = 10)]
        top: usize,
    },

    /// List movie titles in the dataset
    Movies {
        /// Maximum titles to print
        #[arg(long, short = 'n', default_value_t = 1000)]
        limit: usize,
    },
}

const DEFAULT_TEST_TITLES: [&str; 5] = [
    "Batman",
    "Superman",
    "The Avengers",
    "Spider-Man",
    "Iron Man",
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("reelrank=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reelrank=info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let corpus = loader::load_corpus(&cli.data)
        .with_context(|| format!("loading dataset from {}", cli.data.display()))?;
    let engine = Recommender::new(corpus);

    match cli.command {
        Commands::Recommend {
            title,
            model,
            top,
            posters,
        } => {
            let results = engine.recommend(model.into(), &title, top)?;
            let tmdb = if posters {
                let client = TmdbClient::from_env()
                    .context("--posters needs the TMDB_API_KEY environment variable")?;
                Some(client)
            } else {
                None
            };

            println!("Recommendations for {title:?} ({} model):", feature_name(model));
            for (rank, rec) in results.iter().enumerate() {
                match &tmdb {
                    Some(client) => {
                        let poster = client
                            .poster_url(&rec.title)?
                            .unwrap_or_else(|| "-".to_string());
                        println!("{:>3}. {:<40} {:.4}  {}", rank + 1, rec.title, rec.score, poster);
                    }
                    None => {
                        println!("{:>3}. {:<40} {:.4}", rank + 1, rec.title, rec.score);
                    }
                }
            }
        }

        Commands::Evaluate { model, top, titles } => {
            let titles: Vec<String> = if titles.is_empty() {
                DEFAULT_TEST_TITLES.iter().map(ToString::to_string).collect()
            } else {
                titles
            };
            let rows = evaluate(&engine, model.into(), &titles, top);

            println!("=== {} ===", feature_name(model).to_uppercase());
            println!("{:<20} {:>10} {:>10} {:>10}", "Title", "Precision", "Recall", "F1-Score");
            for row in rows {
                println!(
                    "{:<20} {:>10.4} {:>10.4} {:>10.4}",
                    row.title, row.precision, row.recall, row.f1
                );
            }
        }

        Commands::Terms { title, model, top } => {
            let row = engine
                .corpus()
                .index_of(&title)
                .ok_or_else(|| reelrank::Error::TitleNotFound(title.clone()))?;
            let terms = engine.model(model.into()).top_terms(row, top);

            println!("Top TF-IDF terms for {title:?} ({} model):", feature_name(model));
            for (term, weight) in terms {
                println!("{term:<24} {weight:.4}");
            }
        }

        Commands::Movies { limit } => {
            let mut titles: Vec<&str> = engine
                .corpus()
                .movies()
                .iter()
                .map(|movie| movie.title.as_str())
                .collect();
            titles.sort_unstable();
            for title in titles.into_iter().take(limit) {
                println!("{title}");
            }
        }
    }

    Ok(())
}

fn feature_name(model: Model) -> &'static str {
    FeatureSet::from(model).name()
}
