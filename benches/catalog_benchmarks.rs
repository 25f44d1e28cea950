use campus_records::{Book, SortKey, catalog};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, seq::IndexedRandom};

const WORDS: [&str; 12] = [
    "history", "Rome", "garden", "Atlas", "river", "Silence", "engine", "Harbor", "winter",
    "Orchard", "signal", "Lantern",
];

// Random catalog with mixed-case titles so the case-insensitive paths do real work
fn random_catalog(size: u32) -> Vec<Book> {
    let mut rng = rand::rng();
    (0..size)
        .map(|id| {
            let edition: u32 = rng.random_range(1..1000);
            let mut pick = || *WORDS.choose(&mut rng).unwrap_or(&"misc");
            let title = format!("{} {} {edition}", pick(), pick());
            let author = format!("{} {}", pick(), pick());
            Book::new(id, &title, &author, pick())
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 10_000] {
        let books = random_catalog(size);
        group.bench_with_input(BenchmarkId::new("hist", size), &books, |b, books| {
            b.iter(|| catalog::search(books, "hist"));
        });
        group.bench_with_input(BenchmarkId::new("no_match", size), &books, |b, books| {
            b.iter(|| catalog::search(books, "quantum"));
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in [100, 1_000, 10_000] {
        let books = random_catalog(size);
        group.bench_with_input(BenchmarkId::new("title", size), &books, |b, books| {
            b.iter(|| catalog::sorted(books, SortKey::Title));
        });
        group.bench_with_input(BenchmarkId::new("author", size), &books, |b, books| {
            b.iter(|| catalog::sorted(books, SortKey::Author));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search, bench_sort);
criterion_main!(benches);
