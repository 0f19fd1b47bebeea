use catalog::{loader, normalize};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/popular.json"));

    println!("Loading catalog snapshot from {}...\n", path.display());

    let start = Instant::now();
    let records = loader::load_records(&path).expect("Failed to load snapshot");
    let table = normalize(records);
    let elapsed = start.elapsed();

    let with_overview = table.iter().filter(|m| !m.overview.is_empty()).count();
    let with_genres = table.iter().filter(|m| !m.genre_ids.is_empty()).count();

    println!("=== Normalize Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", table.len());
    println!("With overview: {}", with_overview);
    println!("With genres: {}", with_genres);
}
