use anyhow::Result;
use axum::Router;
use clap::Parser;
use recommender::dataset::load_tmdb;
use recommender::{Engine, EngineConfig, VectorizerConfig};
use server::build_app;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Movies table (TMDB 5000 layout)
    #[arg(long, default_value = "tmdb_5000_movies.csv")]
    movies: String,
    /// Credits table (TMDB 5000 layout)
    #[arg(long, default_value = "tmdb_5000_credits.csv")]
    credits: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Recommendations returned when a request omits k
    #[arg(long, default_value_t = 10)]
    k: usize,
    /// Use idf = ln(n/df) + 1 instead of ln((1+n)/(1+df)) + 1
    #[arg(long, default_value_t = false)]
    no_smooth_idf: bool,
    /// Weight terms by 1 + ln(tf) instead of the raw count
    #[arg(long, default_value_t = false)]
    sublinear_tf: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let raw = load_tmdb(&args.movies, &args.credits)?;
    let config = EngineConfig {
        default_k: args.k,
        vectorizer: VectorizerConfig { smooth_idf: !args.no_smooth_idf, sublinear_tf: args.sublinear_tf },
    };
    let engine = Engine::from_raw(raw, config)?;
    let app: Router = build_app(Arc::new(engine))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
