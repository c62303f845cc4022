use recommender::{Engine, MovieRecord, RecommendError};

fn scenario() -> Engine {
    Engine::initialize(vec![
        MovieRecord::new("1", "A", &["Action"], &["hero"], &["X Y"], "D1"),
        MovieRecord::new("2", "B", &["Action"], &["hero"], &["X Y"], "D1"),
        MovieRecord::new("3", "C", &["Drama"], &["family"], &["Z W"], "D2"),
    ])
    .unwrap()
}

#[test]
fn identical_metadata_ranks_first() {
    let engine = scenario();
    assert_eq!(engine.record(0).unwrap().soup(), "hero xy d1 action");
    assert_eq!(engine.record(0).unwrap().soup(), engine.record(1).unwrap().soup());

    let sim = engine.similarity();
    assert!((sim.get(0, 1) - 1.0).abs() < 1e-5);
    assert!(sim.get(0, 1) > sim.get(0, 2));

    assert_eq!(engine.recommend("A", 2).unwrap(), vec!["B", "C"]);
}

#[test]
fn unknown_title_is_not_found() {
    let engine = scenario();
    assert_eq!(
        engine.recommend("nonexistent movie", 10),
        Err(RecommendError::NotFound("nonexistent movie".into()))
    );
}

#[test]
fn case_insensitive_fallback() {
    let engine = scenario();
    assert_eq!(engine.resolve("a"), Some(0));
    assert_eq!(engine.recommend("c", 1).unwrap(), vec!["A"]);
}

#[test]
fn small_corpus_returns_everything_but_the_query() {
    let engine = scenario();
    let recs = engine.recommend_scored("B", 10).unwrap();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.row != 1));
    assert_eq!(recs[0].title, "A");
}

#[test]
fn duplicate_titles_render_from_the_similar_row() {
    let engine = Engine::initialize(vec![
        MovieRecord::new("1", "Heat", &["Crime"], &["heist"], &["Al Pacino"], "Michael Mann"),
        MovieRecord::new("2", "Thief", &["Crime"], &["heist"], &["James Caan"], "Michael Mann"),
        MovieRecord::new("3", "Heat", &["Crime"], &["heist"], &["Al Pacino"], "Michael Mann"),
    ])
    .unwrap();
    assert_eq!(engine.resolve("Heat"), Some(0));
    let recs = engine.recommend_scored("Heat", 2).unwrap();
    assert_eq!(recs[0].row, 2);
    assert_eq!(recs[0].title, "Heat");
}

#[test]
fn all_stopword_corpus_still_initializes() {
    let engine = Engine::initialize(vec![
        MovieRecord::new::<&str>("1", "First", &[], &["the"], &[], ""),
        MovieRecord::new::<&str>("2", "Second", &[], &[], &[], "of"),
    ])
    .unwrap();
    assert!(engine.vocabulary().is_empty());
    assert_eq!(engine.similarity().get(0, 0), 0.0);
    assert_eq!(engine.similarity().get(0, 1), 0.0);
    assert_eq!(engine.recommend("First", 10).unwrap(), vec!["Second"]);
}
