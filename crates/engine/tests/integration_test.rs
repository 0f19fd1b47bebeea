//! Integration tests for the engine.
//!
//! These tests run a realistic catalog through normalization, weighting
//! and ranking and check the properties every query must satisfy.

use catalog::{CatalogTable, MovieRecord, loader, normalize};
use engine::{EngineError, SimilarityEngine, TermWeighting, TfidfVectorizer, cosine};

fn create_test_catalog() -> CatalogTable {
    let json = r#"{
        "page": 1,
        "results": [
            {"id": 11, "title": "Star Wars", "overview": "Princess Leia is captured by the Empire and a farm boy joins rebels to fight the galactic war", "genre_ids": [12, 28, 878], "original_language": "en", "vote_average": 8.2, "vote_count": 20000},
            {"id": 1891, "title": "The Empire Strikes Back", "overview": "The rebels scatter after the Empire attacks and Luke trains as a Jedi in the galactic war", "genre_ids": [12, 28, 878], "original_language": "en", "vote_average": 8.4, "vote_count": 17000},
            {"id": 194, "title": "Amelie", "overview": "A shy waitress in Paris decides to change the lives of those around her", "genre_ids": [35, 10749], "original_language": "fr", "vote_average": 7.9, "vote_count": 11000},
            {"id": 550, "title": "Fight Club", "overview": "An insomniac office worker and a soap salesman build an underground fight club", "genre_ids": [18], "original_language": "en"},
            {"id": 9999, "title": "Untitled Project"},
            {"id": 129, "title": "Spirited Away", "overview": "A girl wanders into a world ruled by gods and witches", "genre_ids": [16, 10751, 14], "original_language": "ja", "poster_path": "/39wmItIWsg5sZMyRUHLkWBcuVCM.jpg"}
        ],
        "total_pages": 1,
        "total_results": 6
    }"#;

    normalize(loader::parse_records(json).unwrap())
}

#[test]
fn test_sequel_ranks_first() {
    let engine = SimilarityEngine::new(create_test_catalog()).unwrap();

    let results = engine.recommend("Star Wars", 3).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].movie.title, "The Empire Strikes Back");
    assert!(results[0].score > 0.2);
}

#[test]
fn test_every_query_satisfies_ranking_properties() {
    let engine = SimilarityEngine::new(create_test_catalog()).unwrap();
    let n = engine.len();

    for title in engine.all_titles() {
        let query = engine.position_of(title).unwrap();

        for top_n in [0, 1, 3, n - 1, n + 10] {
            let results = engine.recommend(title, top_n).unwrap();

            assert_eq!(results.len(), top_n.min(n - 1));
            assert!(results.iter().all(|r| r.position != query));
            assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.score)));

            for pair in results.windows(2) {
                let ordered = pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].position < pair[1].position);
                assert!(ordered, "results out of order for '{}'", title);
            }
        }
    }
}

#[test]
fn test_matrix_is_symmetric_with_unit_diagonal() {
    let engine = SimilarityEngine::new(create_test_catalog()).unwrap();
    let matrix = engine.similarity_matrix();

    for i in 0..matrix.len() {
        assert_eq!(matrix.get(i, i), Some(1.0));
        for j in 0..matrix.len() {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
}

#[test]
fn test_scores_match_direct_cosine() {
    let table = create_test_catalog();
    let documents: Vec<&str> = table.combined_texts().collect();
    let vectors = TfidfVectorizer::new().weigh(&documents).vectors;
    let engine = SimilarityEngine::new(table.clone()).unwrap();

    for hit in engine.recommend("Star Wars", 5).unwrap() {
        let expected = cosine(&vectors[0], &vectors[hit.position]);
        assert!((hit.score - expected).abs() < 1e-12);
    }
}

#[test]
fn test_repeated_builds_are_identical() {
    let first = SimilarityEngine::new(create_test_catalog()).unwrap();
    let second = SimilarityEngine::new(create_test_catalog()).unwrap();

    assert_eq!(first.similarity_matrix(), second.similarity_matrix());

    let a: Vec<_> = first
        .recommend("Amelie", 5)
        .unwrap()
        .iter()
        .map(|r| (r.position, r.score))
        .collect();
    let b: Vec<_> = second
        .recommend("Amelie", 5)
        .unwrap()
        .iter()
        .map(|r| (r.position, r.score))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_movie_without_text_still_answers() {
    let engine = SimilarityEngine::new(create_test_catalog()).unwrap();

    let results = engine.recommend("Untitled Project", 10).unwrap();

    assert_eq!(results.len(), engine.len() - 1);
}

#[test]
fn test_stop_word_only_catalog_builds() {
    let table = normalize(vec![
        MovieRecord::new(1, "The").with_overview("and of the"),
        MovieRecord::new(2, "It").with_overview("it was"),
        MovieRecord::new(3, "Us").with_overview("us"),
    ]);

    let engine = SimilarityEngine::new(table).unwrap();

    assert_eq!(engine.vocabulary_len(), 0);
    let results = engine.recommend("It", 5).unwrap();
    let positions: Vec<usize> = results.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![0, 2]);
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_empty_and_missing_title_errors() {
    assert_eq!(
        SimilarityEngine::new(CatalogTable::new()).unwrap_err(),
        EngineError::EmptyCatalog
    );

    let engine = SimilarityEngine::new(create_test_catalog()).unwrap();
    let err = engine.recommend("star wars", 5).unwrap_err();
    assert_eq!(
        err,
        EngineError::TitleNotFound {
            title: "star wars".to_string()
        }
    );
}
