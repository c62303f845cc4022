use proptest::prelude::*;
use recommender::record::normalize_token;
use recommender::soup::build_soup;
use recommender::{Engine, MovieRecord};

fn arb_record() -> impl Strategy<Value = MovieRecord> {
    let words = || prop::collection::vec("[A-Za-z]{1,6}( [A-Za-z]{1,6})?", 0..4);
    ("[A-Z][a-z]{0,8}", words(), words(), words(), "[A-Za-z ]{0,10}").prop_map(|(title, genres, keywords, cast, director)| {
        MovieRecord::new(title.clone(), title, &genres, &keywords, &cast, &director)
    })
}

proptest! {
    #[test]
    fn normalized_tokens_are_lowercase_without_spaces(s in "[A-Za-zÀ-ÿ0-9 ]{0,40}") {
        let t = normalize_token(&s);
        prop_assert!(!t.contains(' '));
        prop_assert_eq!(t.to_lowercase(), t);
    }

    #[test]
    fn soup_is_deterministic(record in arb_record()) {
        prop_assert_eq!(build_soup(&record), build_soup(&record));
        prop_assert_eq!(build_soup(&record), record.soup());
    }

    #[test]
    fn matrix_is_symmetric_and_bounded(records in prop::collection::vec(arb_record(), 1..12)) {
        let engine = Engine::initialize(records).unwrap();
        let sim = engine.similarity();
        for i in 0..sim.dim() {
            let expected = if engine.vector(i).unwrap().is_empty() { 0.0 } else { 1.0 };
            prop_assert_eq!(sim.get(i, i), expected);
            for j in 0..sim.dim() {
                prop_assert!((sim.get(i, j) - sim.get(j, i)).abs() < 1e-6);
                prop_assert!((0.0..=1.0).contains(&sim.get(i, j)));
            }
        }
    }

    #[test]
    fn recommendations_exclude_the_query(records in prop::collection::vec(arb_record(), 1..12), k in 0usize..15) {
        let engine = Engine::initialize(records).unwrap();
        let title = engine.record(0).unwrap().title.clone();
        let row = engine.resolve(&title).unwrap();
        let recs = engine.recommend_scored(&title, k).unwrap();
        prop_assert_eq!(recs.len(), k.min(engine.len() - 1));
        prop_assert!(recs.iter().all(|r| r.row != row));
        prop_assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
