//! Accumulator merge and query canonicalization benchmarks.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use campus_web::accumulator::Accumulator;
use campus_web::filters::QueryState;
use campus_web::models::{ContentItem, ItemId, ListResponse};
use campus_web::pages::Section;

fn page(page: u32, limit: u32, overlap: u32) -> ListResponse<ContentItem> {
    let start = (page - 1) * limit + 1 - overlap.min((page - 1) * limit);
    let data = (start..start + limit)
        .map(|id| ContentItem {
            id: ItemId::new(id.to_string()),
            slug: format!("news-{id}"),
            title: format!("News {id}"),
            ..ContentItem::default()
        })
        .collect();
    ListResponse::new(10_000, page, limit, data)
}

fn bench_accumulate(c: &mut Criterion) {
    let pages: Vec<_> = (1..=50).map(|p| page(p, 20, 5)).collect();

    c.bench_function("accumulate 50 overlapping pages", |b| {
        b.iter(|| {
            let mut acc = Accumulator::new();
            for (index, response) in pages.iter().enumerate() {
                acc.apply(index as u32 + 1, response.clone());
            }
            black_box(acc.len())
        });
    });
}

fn bench_canonical_href(c: &mut Criterion) {
    let url = "/en/news?utm_source=mail&to=2024-12-31&page=7&search=final+exams&from=2024-01-01&category_slug=sports";

    c.bench_function("parse and canonicalize news query", |b| {
        b.iter(|| QueryState::parse(black_box(url), Section::News.schema()).href());
    });
}

criterion_group!(benches, bench_accumulate, bench_canonical_href);
criterion_main!(benches);
