use std::fmt::Write;

use cfront::diagnostics::NullSink;
use cfront::interner::Interner;
use cfront::lexer::{Lexer, LexerOptions, Reader, StreamSpec, TokenKind};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

struct Corpus {
    name: &'static str,
    source: String,
}

fn build_mixed_syntax_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..2_000usize {
        let _ = writeln!(src, "int value_{i} = {} + {} * ({} - 1);", i, i + 1, i + 2);
        let _ = writeln!(
            src,
            "if (value_{i} >= 10 && value_{i} != 42) {{ value_{i}++; }} else {{ value_{i} = 0; }}",
        );
        let _ = writeln!(
            src,
            "{{ int nested_{i}[4] = {{1, 2, 3, value_{i}}}; nested_{i}[0]++; }}"
        );
    }

    src
}

fn build_comment_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..3_000usize {
        let _ = writeln!(src, "// line comment {i}");
        let _ = writeln!(src, "int x_{i} = {i}; // trailing comment");
        let _ = writeln!(src, "/* block comment {} {} */", i, i + 1);
        let _ = writeln!(src, "/** doc block comment {i}\n * continued\n */");
    }

    src
}

fn build_identifier_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..4_000usize {
        let _ = writeln!(
            src,
            "int very_long_identifier_name_{i}_with_suffix = another_identifier_{i};",
        );
        let _ = writeln!(
            src,
            "int combined_identifier_{i} = very_long_identifier_name_{i}_with_suffix + another_identifier_{i};",
        );
    }

    src
}

fn build_string_and_number_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..2_500usize {
        let _ = writeln!(
            src,
            "char *s_{i} = \"line\\n\\tquote:\\\" slash:\\\\ value #{i} done\";",
        );
        let _ = writeln!(src, "double d_{i} = 0x1.{i:x}p+3;");
        let _ = writeln!(src, "unsigned long long n_{i} = {i}ULL;");
    }

    src
}

fn build_preprocessor_style_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..2_000usize {
        let _ = writeln!(src, "#define MAX_{i} {}", i + 1);
        let _ = writeln!(src, "#if MAX_{i} > 0 && MAX_{i} < 100");
        let _ = writeln!(src, "int limited_{i} = MAX_{i};");
        let _ = writeln!(src, "#endif");
    }

    src
}

fn build_corpora() -> Vec<Corpus> {
    vec![
        Corpus { name: "mixed_syntax", source: build_mixed_syntax_corpus() },
        Corpus { name: "comment_heavy", source: build_comment_heavy_corpus() },
        Corpus { name: "identifier_heavy", source: build_identifier_heavy_corpus() },
        Corpus { name: "string_and_number_heavy", source: build_string_and_number_heavy_corpus() },
        Corpus { name: "preprocessor_style", source: build_preprocessor_style_corpus() },
    ]
}

fn lex_all(input: &str) -> usize {
    let mut pool = Interner::new();
    let mut reader = Reader::new();
    reader
        .push(&mut pool, StreamSpec::String { name: "<bench>", bytes: input.as_bytes() })
        .expect("in-memory stream push cannot fail");
    let mut lexer = Lexer::new(reader, LexerOptions::default());
    let mut sink = NullSink;

    let mut token_count = 0usize;
    loop {
        let token = lexer.next(&mut sink);
        token_count += 1;
        if token.kind == TokenKind::End {
            break;
        }
    }
    token_count
}

#[allow(clippy::needless_as_bytes)]
fn bench_lexer_next(c: &mut Criterion) {
    let corpora = build_corpora();
    let mut group = c.benchmark_group("lexer/next");

    for corpus in &corpora {
        let input = corpus.source.as_str();
        group.throughput(Throughput::Bytes(input.as_bytes().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(corpus.name), input, |b, input| {
            b.iter(|| {
                let token_count = lex_all(black_box(input));
                black_box(token_count);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lexer_next);
criterion_main!(benches);
