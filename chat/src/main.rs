use anyhow::Result;
use clap::Parser;
use recommender::{EngineConfig, VectorizerConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "chat")]
#[command(about = "Recommend movies similar to one you like", long_about = None)]
struct Args {
    /// Movies table (TMDB 5000 layout)
    #[arg(long, default_value = "tmdb_5000_movies.csv")]
    movies: PathBuf,
    /// Credits table (TMDB 5000 layout)
    #[arg(long, default_value = "tmdb_5000_credits.csv")]
    credits: PathBuf,
    /// Number of recommendations per query
    #[arg(long, default_value_t = 10)]
    k: usize,
    /// Number of random titles suggested at start-up
    #[arg(long, default_value_t = 5)]
    samples: usize,
    /// Use idf = ln(n/df) + 1 instead of ln((1+n)/(1+df)) + 1
    #[arg(long, default_value_t = false)]
    no_smooth_idf: bool,
    /// Weight terms by 1 + ln(tf) instead of the raw count
    #[arg(long, default_value_t = false)]
    sublinear_tf: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    println!("{}", chat::WELCOME);
    let config = EngineConfig {
        default_k: args.k,
        vectorizer: VectorizerConfig { smooth_idf: !args.no_smooth_idf, sublinear_tf: args.sublinear_tf },
    };
    let engine = match chat::load_engine(&args.movies, &args.credits, config) {
        Ok(engine) => engine,
        Err(err) => {
            println!("Could not load data. Exiting chatbot.");
            return Err(err);
        }
    };

    tracing::info!(records = engine.len(), terms = engine.vocabulary().len(), "chat ready");

    let mut stdout = io::stdout().lock();
    let suggestions = engine.sample_titles(&mut rand::thread_rng(), args.samples);
    chat::print_suggestions(&mut stdout, &suggestions)?;
    chat::run_session(&engine, io::stdin().lock(), &mut stdout, engine.config().default_k)?;
    Ok(())
}
