use cleanreader_core::{Document, InlineStyleResolver, Page, ReaderController, Sanitizer, extract, locate_main_content};
use cleanreader_core::DEFAULT_CONTENT_SELECTORS;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn load_fixture() -> String {
    std::fs::read_to_string("../../tests/fixtures/article.html").unwrap()
}

/// Repeats the fixture's article body to get a larger input.
fn scaled(html: &str, copies: usize) -> String {
    let start = html.find("<article>").unwrap();
    let end = html.find("</article>").unwrap() + "</article>".len();
    let section = &html[start..end];
    format!("<html><body>{}</body></html>", section.repeat(copies))
}

fn bench_sanitize(c: &mut Criterion) {
    let html = load_fixture();
    let mut group = c.benchmark_group("sanitize");

    for copies in [1, 10, 100] {
        let input = scaled(&html, copies);
        let doc = Document::parse(&input).unwrap();
        let root = locate_main_content(&doc, DEFAULT_CONTENT_SELECTORS).element;

        group.bench_with_input(BenchmarkId::from_parameter(copies), &root, |b, root| {
            b.iter(|| Sanitizer::new(&InlineStyleResolver).sanitize(black_box(root)))
        });
    }

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = load_fixture();
    c.bench_function("full_extraction", |b| b.iter(|| extract(black_box(&html))));
}

fn bench_toggle_round_trip(c: &mut Criterion) {
    let html = load_fixture();
    let page = Page::from_html(&html).unwrap();

    c.bench_function("toggle_round_trip", |b| {
        b.iter(|| {
            let mut controller = ReaderController::new(black_box(page.clone()));
            controller.toggle();
            controller.toggle();
            controller.into_page()
        })
    });
}

criterion_group!(benches, bench_sanitize, bench_full_extraction, bench_toggle_round_trip);
criterion_main!(benches);
