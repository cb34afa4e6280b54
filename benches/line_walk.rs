//! Benchmark for line-anchored tree scans and statement resolution.
//!
//! Large documents must stay cheap to query because line walks prune every
//! subtree that does not overlap the target line.
//!
//! Run with: cargo bench --bench line_walk

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use url::Url;

use stepstone::config::defaults::default_settings;
use stepstone::language::LanguageRegistry;
use stepstone::{Document, Navigator, NodeRules, Position, TreeProvider, TreeSitterProvider};

/// Create a Rust document with N small functions.
fn create_document(num_functions: usize) -> String {
    let mut doc = String::new();
    for i in 0..num_functions {
        doc.push_str(&format!(
            "// Function {i}\n\
             fn example{i}(x: i32) -> i32 {{\n\
             \x20   let y = x + {i};\n\
             \x20   if y > 10 {{\n\
             \x20       return y * 2;\n\
             \x20   }}\n\
             \x20   y\n\
             }}\n\n"
        ));
    }
    doc
}

fn rust_provider() -> Arc<dyn TreeProvider> {
    let registry = LanguageRegistry::new();
    registry
        .register("rust", tree_sitter_rust::LANGUAGE.into())
        .expect("register rust grammar");
    Arc::new(TreeSitterProvider::new(registry))
}

fn bench_line_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_walk");
    let provider = rust_provider();
    let rules = NodeRules::for_language(&default_settings(), "rust");

    for num_functions in [10, 100, 1000] {
        let text = create_document(num_functions);
        let document = Document::new(
            Url::parse("file:///bench/lib.rs").expect("valid url"),
            "rust",
            text,
        );
        let navigator = Navigator::with_provider(Arc::clone(&provider), &document, &rules)
            .expect("navigator");
        let middle = document.line_count() / 2;

        group.bench_with_input(
            BenchmarkId::new("line_start_nodes", num_functions),
            &middle,
            |b, &line| b.iter(|| navigator.query().line_start_nodes(black_box(line))),
        );

        group.bench_with_input(
            BenchmarkId::new("resolve_statement", num_functions),
            &middle,
            |b, &line| {
                b.iter(|| navigator.resolve_statement(black_box(Position::new(line, 4))))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_line_walk);
criterion_main!(benches);
