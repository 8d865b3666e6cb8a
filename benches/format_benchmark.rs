//! Benchmarks for docpolish formatting and reporting.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docpolish::classify::{Classifier, Position};
use docpolish::codec::{DocumentCodec, DocxCodec, JsonCodec};
use docpolish::format::Formatter;
use docpolish::model::{Document, Paragraph, Section, Table};
use docpolish::report::{Reporter, Snapshot};

/// Creates a synthetic document with the given number of chapters.
fn create_document(chapters: usize) -> Document {
    let mut doc = Document::new();
    doc.add_section(Section::new());
    doc.add_paragraph(Paragraph::with_text("Synthetic Benchmark Report"));

    for i in 0..chapters {
        doc.add_paragraph(Paragraph::with_text(format!("CHAPTER {}", i + 1)));
        doc.add_paragraph(Paragraph::with_text("Background And Motivation"));
        for _ in 0..5 {
            doc.add_paragraph(Paragraph::with_text(
                "the quick brown fox jumps over the lazy dog while the survey team \
                 records every observation in a shared notebook.",
            ));
        }
        doc.add_table(Table::from_rows([
            vec!["Site", "Count", "Notes"],
            vec!["Alder", "120", "Participants completed the survey online."],
            vec!["Birch", "3,400", "Yes"],
        ]));
    }
    doc
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    let formatter = Formatter::default();

    for chapters in [1, 10, 100] {
        let doc = create_document(chapters);
        group.bench_with_input(BenchmarkId::from_parameter(chapters), &doc, |b, doc| {
            b.iter(|| {
                let mut doc = doc.clone();
                black_box(formatter.format(&mut doc))
            })
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let reporter = Reporter::default();
    let doc = create_document(50);

    c.bench_function("analyze_50", |b| b.iter(|| black_box(reporter.analyze(&doc))));

    let snapshot = Snapshot::capture(&doc);
    let mut formatted = doc.clone();
    Formatter::default().format(&mut formatted);
    c.bench_function("summarize_50", |b| {
        b.iter(|| black_box(reporter.summarize(&formatted, Some(&snapshot))))
    });
}

fn bench_classify(c: &mut Criterion) {
    let classifier = Classifier::default();
    let samples = [
        "INTRODUCTION",
        "Course Objectives",
        "the quick brown fox jumps over the lazy dog",
    ];

    c.bench_function("classify_paragraph", |b| {
        b.iter(|| {
            for text in &samples {
                black_box(classifier.classify(black_box(text), None, Position::Paragraph(3)));
            }
        })
    });
}

fn bench_codec(c: &mut Criterion) {
    let codec = JsonCodec::default();
    let bytes = codec.serialize(&create_document(50)).unwrap();

    c.bench_function("parse_50", |b| {
        b.iter(|| black_box(codec.parse(black_box(&bytes)).unwrap()))
    });

    let docx = DocxCodec::default();
    let package = docx.serialize(&create_document(50)).unwrap();
    c.bench_function("parse_docx_50", |b| {
        b.iter(|| black_box(docx.parse(black_box(&package)).unwrap()))
    });
}

criterion_group!(benches, bench_format, bench_report, bench_classify, bench_codec);
criterion_main!(benches);
