//! Interactive read-eval loop over a recommendation [`Engine`].

use recommender::dataset::load_tmdb;
use recommender::{Engine, EngineConfig, RecommendError};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub const WELCOME: &str = "🎬 Welcome to the Movie Recommendation Chatbot! 🎬\nI can help you find movies similar to one you like.";
pub const FAREWELL: &str = "Thanks for chatting! Enjoy your movie night! 👋";

/// Read both tables and build the engine.
pub fn load_engine(movies: &Path, credits: &Path, config: EngineConfig) -> anyhow::Result<Engine> {
    let raw = load_tmdb(movies, credits)?;
    Ok(Engine::from_raw(raw, config)?)
}

pub fn print_suggestions<W: Write>(out: &mut W, titles: &[&str]) -> io::Result<()> {
    if titles.is_empty() {
        return Ok(());
    }
    writeln!(out, "\nTo get started, you could ask for recommendations based on movies like:")?;
    for title in titles {
        writeln!(out, "  - {title}")?;
    }
    Ok(())
}

/// Prompt until `quit`/`exit` or end of input.
pub fn run_session<R: BufRead, W: Write>(engine: &Engine, input: R, out: &mut W, k: usize) -> io::Result<()> {
    writeln!(out, "\nType 'quit' or 'exit' to end the chat.")?;
    let mut lines = input.lines();
    loop {
        write!(out, "\nEnter a movie title you like: ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            writeln!(out, "{FAREWELL}")?;
            return Ok(());
        };
        let query = line?;
        let query = query.trim();

        if matches!(query.to_lowercase().as_str(), "quit" | "exit") {
            writeln!(out, "{FAREWELL}")?;
            return Ok(());
        }
        if query.is_empty() {
            writeln!(out, "Please enter a movie title.")?;
            continue;
        }

        match engine.recommend(query, k) {
            Ok(titles) => {
                writeln!(out, "\nGreat! If you liked '{query}', you might also enjoy these movies:")?;
                for (i, title) in titles.iter().enumerate() {
                    writeln!(out, "  {}. {title}", i + 1)?;
                }
            }
            Err(RecommendError::NotFound(title)) => {
                writeln!(out, "Sorry, the movie '{title}' was not found in our database.")?;
            }
        }
    }
}
