use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::EngineError;
use server::{
    CatalogSource, MovieRecommendation, RecommendationService, SnapshotCatalogSource,
    TmdbCatalogSource,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tmdb_client::{DEFAULT_IMAGE_BASE_URL, TmdbClient, TmdbConfig, poster_url};
use tracing::debug;

/// Characters of synopsis shown per card
const SYNOPSIS_CHARS: usize = 400;

/// movie-recs - content-based movie recommendations
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendations using TF-IDF and cosine similarity over TMDB data", long_about = None)]
struct Cli {
    /// Pages of popular movies to fetch from TMDB (20 movies per page)
    #[arg(short, long, default_value = "5")]
    pages: u32,

    /// Read the catalog from a JSON snapshot instead of the TMDB API
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every title in the catalog
    Titles,

    /// Show movies similar to a catalog title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Search TMDB for movies by name
    Search {
        #[arg(long)]
        query: String,

        /// Maximum number of results
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show TMDB details and keywords for one movie
    Details {
        /// TMDB movie id
        #[arg(long)]
        id: u64,
    },

    /// Measure recommendation latency over random catalog titles
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Titles => {
            let service = load_service(cli.pages, cli.catalog_file).await?;
            handle_titles(&service);
        }
        Commands::Recommend { title, limit } => {
            let service = load_service(cli.pages, cli.catalog_file).await?;
            handle_recommend(&service, &title, limit)?;
        }
        Commands::Search { query, limit } => handle_search(&query, limit).await?,
        Commands::Details { id } => handle_details(id).await?,
        Commands::Benchmark { requests } => {
            let service = load_service(cli.pages, cli.catalog_file).await?;
            handle_benchmark(&service, requests).await?;
        }
    }

    Ok(())
}

/// Fetch the catalog and build the engine
async fn load_service(pages: u32, catalog_file: Option<PathBuf>) -> Result<RecommendationService> {
    let start = Instant::now();

    let service = match catalog_file {
        Some(path) => {
            println!("Loading catalog snapshot from {}...", path.display());
            build_service(SnapshotCatalogSource::new(path)).await?
        }
        None => {
            println!("Fetching {} pages of popular movies from TMDB...", pages);
            let client = TmdbClient::from_env()
                .context("TMDB_API_KEY must be set (or pass --catalog-file)")?;
            build_service(TmdbCatalogSource::new(client, pages)).await?
        }
    };

    println!(
        "{} Built engine over {} movies in {:?}",
        "✓".green(),
        service.engine().len(),
        start.elapsed()
    );
    Ok(service)
}

async fn build_service(source: impl CatalogSource + 'static) -> Result<RecommendationService> {
    RecommendationService::build(source)
        .await
        .context("Failed to build the recommendation engine")
}

/// Handle the 'titles' command
fn handle_titles(service: &RecommendationService) {
    println!("{}", "Catalog titles:".bold().blue());
    for (i, title) in service.all_titles().iter().enumerate() {
        println!("{:>4}. {}", i + 1, title);
    }
}

/// Handle the 'recommend' command
fn handle_recommend(service: &RecommendationService, title: &str, limit: usize) -> Result<()> {
    let recommendations = match service.recommend(title, limit) {
        Ok(recommendations) => recommendations,
        Err(e) => {
            if let Some(EngineError::TitleNotFound { title }) = e.downcast_ref::<EngineError>() {
                eprintln!(
                    "{} '{}' is not in the catalog. Run `movie-recs titles` to see what is.",
                    "✗".red(),
                    title
                );
                std::process::exit(1);
            }
            return Err(e);
        }
    };

    println!("{}", format!("Movies similar to: {}", title).bold().blue());
    let image_base_url = image_base_url();
    for rec in &recommendations {
        print_movie_card(rec, &image_base_url);
        println!("{}", "-".repeat(60).dimmed());
    }
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(query: &str, limit: usize) -> Result<()> {
    let client = TmdbClient::from_env().context("TMDB_API_KEY must be set to search")?;
    let results = client
        .search_movies(query, limit)
        .await
        .context("TMDB search failed")?;

    if results.is_empty() {
        println!("{}", "No results found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    for movie in &results {
        println!(
            "{} ({}) - id:{}",
            movie.title.as_deref().unwrap_or(""),
            movie.release_date.as_deref().unwrap_or("N/A"),
            movie.id
        );
    }
    Ok(())
}

/// Handle the 'details' command
async fn handle_details(id: u64) -> Result<()> {
    let client = TmdbClient::from_env().context("TMDB_API_KEY must be set to fetch details")?;
    let details = client
        .movie_details(id)
        .await
        .with_context(|| format!("Failed to fetch details for movie {}", id))?;

    println!(
        "{}",
        details.title.as_deref().unwrap_or("Untitled").bold().blue()
    );
    println!(
        "{}Released: {}",
        "• ".green(),
        details.release_date.as_deref().unwrap_or("N/A")
    );
    match details.runtime {
        Some(minutes) => println!("{}Runtime: {} min", "• ".green(), minutes),
        None => println!("{}Runtime: N/A", "• ".green()),
    }
    println!("{}Genres: {}", "• ".green(), details.genre_names().join(", "));
    println!("{}Keywords: {}", "• ".cyan(), details.keyword_names().join(", "));
    if let Some(path) = &details.poster_path {
        println!("{}Poster: {}", "• ".cyan(), client.poster_url(path));
    }
    println!();
    println!("{}", details.overview.as_deref().unwrap_or(""));
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(service: &RecommendationService, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let engine = service.engine();
    let titles = service.all_titles();

    let picks: Vec<String> = (0..requests)
        .map(|_| titles[rand::random::<u64>() as usize % titles.len()].clone())
        .collect();

    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for title in picks {
        let engine = Arc::clone(&engine);
        handles.push(tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            engine.recommend(&title, 5)?;
            Ok::<_, EngineError>(start.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();
    debug!("Collected {} timings", timings.len());

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", requests);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Value at quantile `q` of already-sorted timings
fn percentile(sorted: &[Duration], q: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let index = ((sorted.len() as f64 * q) as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Image base URL from TMDB config, falling back to the public default
fn image_base_url() -> String {
    TmdbConfig::from_env()
        .map(|config| config.image_base_url)
        .unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string())
}

fn print_movie_card(rec: &MovieRecommendation, image_base_url: &str) {
    println!(
        "{} {}",
        rec.title.bold(),
        format!("(similarity {:.3})", rec.similarity).dimmed()
    );
    println!("{}", rating_line(rec.vote_average, rec.vote_count));
    println!(
        "Language: {}",
        if rec.original_language.is_empty() {
            "N/A"
        } else {
            &rec.original_language
        }
    );
    println!("{}", truncate_synopsis(&rec.overview, SYNOPSIS_CHARS));
    match &rec.poster_path {
        Some(path) => println!("Poster: {}", poster_url(image_base_url, path)),
        None => println!("No image"),
    }
}

fn rating_line(vote_average: Option<f64>, vote_count: u64) -> String {
    match vote_average {
        Some(avg) => format!("Rating: {} ({} votes)", avg, vote_count),
        None => format!("Rating: N/A ({} votes)", vote_count),
    }
}

/// First `max_chars` characters followed by "..."
fn truncate_synopsis(overview: &str, max_chars: usize) -> String {
    let mut synopsis: String = overview.chars().take(max_chars).collect();
    synopsis.push_str("...");
    synopsis
}
