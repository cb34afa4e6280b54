// Statement navigation over trees produced by the real tree-sitter-rust grammar

use std::sync::Arc;

use stepstone::config::defaults::default_settings;
use stepstone::language::LanguageRegistry;
use stepstone::{
    Document, GoTo, Motion, Navigator, NodeRules, Position, ProviderHandle, Range, TreeProvider,
    TreeSitterProvider,
};
use url::Url;

const SOURCE: &str = "\
fn main() {
    let x = 1;

    // comment
    let y = foo(
        x,
    );
    bar(y); // trailing
}
";

fn p(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

fn r(start: Position, end: Position) -> Range {
    Range::new(start, end)
}

fn rust_provider() -> Arc<dyn TreeProvider> {
    let registry = LanguageRegistry::new();
    registry
        .register("rust", tree_sitter_rust::LANGUAGE.into())
        .unwrap();
    Arc::new(TreeSitterProvider::new(registry))
}

fn document(text: &str) -> Document {
    Document::new(Url::parse("file:///tmp/main.rs").unwrap(), "rust", text)
}

fn with_navigator<T>(text: &str, f: impl FnOnce(&Navigator<'_>) -> T) -> T {
    let document = document(text);
    let rules = NodeRules::for_language(&default_settings(), "rust");
    let handle = ProviderHandle::ready(rust_provider());
    let navigator = Navigator::new(&handle, &document, &rules).unwrap();
    f(&navigator)
}

const LET_X: Range = Range {
    start: Position::new(1, 4),
    end: Position::new(1, 14),
};
const LET_Y: Range = Range {
    start: Position::new(4, 4),
    end: Position::new(6, 6),
};
const BAR: Range = Range {
    start: Position::new(7, 4),
    end: Position::new(7, 23),
};

#[test]
fn test_end_of_statement_skips_blank_and_comment_lines() {
    with_navigator(SOURCE, |nav| {
        assert_eq!(nav.resolve_statement(p(1, 14)).unwrap(), LET_Y);
    });
}

#[test]
fn test_interior_of_multi_line_statement() {
    with_navigator(SOURCE, |nav| {
        assert_eq!(nav.resolve_statement(p(5, 8)).unwrap(), LET_Y);
        assert_eq!(nav.resolve_statement(p(6, 4)).unwrap(), LET_Y);
        assert_eq!(nav.resolve_statement(p(4, 15)).unwrap(), LET_Y);
    });
}

#[test]
fn test_trailing_comment_is_part_of_statement() {
    with_navigator(SOURCE, |nav| {
        assert_eq!(nav.resolve_statement(p(7, 4)).unwrap(), BAR);
        assert_eq!(nav.resolve_statement(p(7, 11)).unwrap(), BAR);
        assert_eq!(nav.resolve_statement(p(7, 16)).unwrap(), BAR);
    });
}

#[test]
fn test_comment_line_resolves_to_following_statement() {
    with_navigator(SOURCE, |nav| {
        assert_eq!(nav.resolve_statement(p(3, 6)).unwrap(), LET_Y);
        assert_eq!(nav.resolve_statement(p(2, 0)).unwrap(), LET_Y);
    });
}

#[test]
fn test_block_is_looked_through_to_function() {
    with_navigator(SOURCE, |nav| {
        let function = r(p(0, 0), p(8, 1));
        assert_eq!(nav.resolve_statement(p(0, 10)).unwrap(), function);
        assert_eq!(nav.resolve_statement(p(8, 0)).unwrap(), function);
    });
}

#[test]
fn test_last_statement_in_function_stays_put() {
    with_navigator(SOURCE, |nav| {
        assert_eq!(nav.resolve_statement(p(7, 23)).unwrap(), BAR);
    });
}

#[test]
fn test_previous_statement() {
    with_navigator(SOURCE, |nav| {
        assert_eq!(nav.prev_statement(p(4, 4)).unwrap(), LET_X);
        assert_eq!(nav.prev_statement(p(7, 4)).unwrap(), LET_Y);
        // Nothing smaller precedes the first statement in the body
        assert_eq!(nav.prev_statement(p(1, 4)).unwrap(), LET_X);
    });
}

#[test]
fn test_forward_and_backward_jumps() {
    with_navigator(SOURCE, |nav| {
        let mut position = p(1, 4);
        let mut visited = Vec::new();
        loop {
            let next = nav.jump(Motion::Next, position).unwrap();
            if next == position {
                break;
            }
            assert!(next > position);
            visited.push(next);
            position = next;
        }
        assert_eq!(visited, vec![p(1, 14), p(6, 6), p(7, 23)]);

        let mut starts = Vec::new();
        loop {
            let prev = nav.jump(Motion::Previous, position).unwrap();
            if prev == position {
                break;
            }
            assert!(prev < position);
            starts.push(prev);
            position = prev;
        }
        assert_eq!(starts, vec![p(7, 4), p(4, 4), p(1, 4)]);
    });
}

#[test]
fn test_resolution_is_idempotent_on_every_column() {
    with_navigator(SOURCE, |nav| {
        let lines = nav.query().document().line_count();
        for line in 0..lines {
            let text = nav.select_line(line).unwrap();
            for column in text.start.column..text.end.column {
                let first = nav.resolve_statement(p(line, column)).unwrap();
                let again = nav.resolve_statement(first.start).unwrap();
                assert_eq!(first, again, "cursor at {line}:{column}");
            }
        }
    });
}

#[test]
fn test_line_helpers() {
    with_navigator(SOURCE, |nav| {
        assert!(nav.classifier().is_line_empty(2).unwrap());
        assert!(nav.classifier().is_line_empty(3).unwrap());
        assert!(!nav.classifier().is_line_empty(6).unwrap());

        assert_eq!(nav.line_start(1).unwrap(), p(1, 4));
        assert!(nav.is_sol(p(1, 0)).unwrap());
        assert!(nav.is_eol(p(1, 14)).unwrap());

        assert_eq!(
            nav.go_to(GoTo::NextNonEmptyLineStart, p(1, 0)).unwrap(),
            p(4, 4)
        );
        assert_eq!(
            nav.go_to(GoTo::PrevNonEmptyLineStart, p(4, 0)).unwrap(),
            p(1, 4)
        );
        assert_eq!(nav.go_to(GoTo::NextStart, p(1, 0)).unwrap(), p(4, 4));
    });
}

#[test]
fn test_utf8_columns_are_bytes() {
    let source = "fn f() {\n    let s = \"é\";\n    g();\n}\n";
    with_navigator(source, |nav| {
        // `é` is two bytes, so the statement ends at byte 17
        let let_s = r(p(1, 4), p(1, 17));
        assert_eq!(nav.resolve_statement(p(1, 4)).unwrap(), let_s);
        assert_eq!(
            nav.resolve_statement(p(1, 17)).unwrap(),
            r(p(2, 4), p(2, 8))
        );
    });
}

#[test]
fn test_final_empty_line_resolves_to_last_statement() {
    with_navigator(SOURCE, |nav| {
        let function = r(p(0, 0), p(8, 1));
        let last = nav.query().document().line_count() - 1;
        assert_eq!(last, 9);
        assert_eq!(nav.resolve_statement(p(last, 0)).unwrap(), function);
        assert_eq!(nav.select(Motion::Next, p(last, 0)).unwrap(), function);
        assert_eq!(nav.jump(Motion::Next, p(last, 0)).unwrap(), p(8, 1));
    });
}

#[test]
fn test_comments_at_document_edges_are_not_statements() {
    let function = r(p(0, 0), p(0, 9));
    with_navigator("fn a() {}\n// end\n", |nav| {
        assert_eq!(nav.resolve_statement(p(1, 3)).unwrap(), function);
        assert_eq!(nav.select(Motion::Next, p(2, 0)).unwrap(), function);
    });

    let function = r(p(1, 0), p(1, 9));
    with_navigator("// head\nfn a() {}\n", |nav| {
        assert_eq!(nav.prev_statement(p(0, 3)).unwrap(), function);
        assert_eq!(nav.jump(Motion::Previous, p(0, 3)).unwrap(), p(1, 0));
    });
}

#[test]
fn test_leading_block_comment_joins_the_statement_after_it() {
    let source = "fn f() {\n    /* note */ let z = 2;\n}\n";
    with_navigator(source, |nav| {
        let let_z = r(p(1, 4), p(1, 25));
        assert_eq!(nav.resolve_statement(p(1, 7)).unwrap(), let_z);
        assert_eq!(nav.resolve_statement(p(1, 18)).unwrap(), let_z);
    });
}

#[test]
fn test_comment_only_document_has_no_statement() {
    with_navigator("// a\n\n// b\n", |nav| {
        assert!(nav.resolve_statement(p(1, 0)).is_err());
        assert!(nav.prev_statement(p(2, 2)).is_err());
    });
}

#[test]
fn test_out_of_range_line_is_an_error() {
    with_navigator(SOURCE, |nav| {
        let err = nav.resolve_statement(p(42, 0)).unwrap_err();
        assert!(err.to_string().contains("42"));
    });
}
