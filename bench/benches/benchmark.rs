use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marklist::import_export::export::{BookmarkExporter, NetscapeExporter};
use marklist::import_export::{open_source, to_html_document};
use marklist::pipeline::{filter, flatten, load, sorted};
use marklist::view::BookmarkView;
use marklist::{BookmarkNode, SortOrder};

/// A forest of `folders` folders, each holding `per_folder` bookmarks and one subfolder
fn forest(folders: usize, per_folder: usize) -> Vec<BookmarkNode> {
    (0..folders)
        .map(|f| {
            let mut children: Vec<BookmarkNode> = (0..per_folder)
                .map(|i| {
                    let n = f * per_folder + i;
                    BookmarkNode::leaf(
                        format!("Bookmark {} about topic {}", n, n % 37),
                        format!("https://example.com/{}/{}", f, i),
                        ((n * 7919) % 100_000) as i64,
                    )
                })
                .collect();
            children.push(BookmarkNode::folder(
                format!("Nested {}", f),
                vec![BookmarkNode::leaf("Deep", format!("https://deep.example/{}", f), 0)],
            ));
            BookmarkNode::folder(format!("Folder {}", f), children)
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let tree = forest(100, 100);
    let records = flatten(&tree);

    group.bench_function("flatten (10k)", |b| {
        b.iter(|| flatten(black_box(&tree)));
    });

    group.bench_function("sort desc (10k)", |b| {
        b.iter(|| sorted(black_box(&records), SortOrder::Descending));
    });

    group.bench_function("filter (10k)", |b| {
        b.iter(|| filter(black_box(&records), "topic 3"));
    });

    group.bench_function("view apply_filter (10k)", |b| {
        b.iter_with_setup(
            || BookmarkView::new(records.clone(), SortOrder::Descending),
            |mut view| view.apply_filter("TOPIC 3"),
        );
    });

    group.bench_function("to_html_document (10k)", |b| {
        b.iter(|| to_html_document(black_box(&records)));
    });

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let records = flatten(&forest(20, 100));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.html");
    NetscapeExporter.export(&records, &path).unwrap();
    let source = open_source(&path);

    group.bench_function("netscape file (2k)", |b| {
        b.iter(|| load(source.as_ref(), SortOrder::Descending).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_load);
criterion_main!(benches);
