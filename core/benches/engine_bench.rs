use criterion::{criterion_group, criterion_main, Criterion};
use recommender::{Engine, MovieRecord};

fn corpus(n: usize) -> Vec<MovieRecord> {
    let genres = ["Action", "Drama", "Comedy", "Science Fiction", "Horror", "Romance"];
    (0..n)
        .map(|i| {
            let g = [genres[i % genres.len()], genres[(i / 7) % genres.len()]];
            let kw = [format!("keyword {}", i % 50), format!("theme {}", i % 13)];
            let cast = [format!("Actor {}", i % 97), format!("Actor {}", i % 31), format!("Actor {}", i % 11)];
            MovieRecord::new(i.to_string(), format!("Movie {i}"), &g.map(String::from), &kw, &cast, &format!("Director {}", i % 40))
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let records = corpus(1000);
    c.bench_function("initialize_1000", |b| b.iter(|| Engine::initialize(records.clone()).unwrap()));
    let engine = Engine::initialize(records).unwrap();
    c.bench_function("recommend_1000", |b| b.iter(|| engine.recommend("Movie 500", 10).unwrap()));
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
