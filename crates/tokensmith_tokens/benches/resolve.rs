use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokensmith_tokens::{references_of, Dictionary, ReferenceQuery, Token, TokenType};

fn palette(size: usize) -> Dictionary {
    let mut tokens = Vec::with_capacity(size * 2);
    for i in 0..size {
        tokens.push(
            Token::new(format!("color-gray-{i}"), format!("#{:06x}", i * 7919))
                .with_type(TokenType::Color)
                .with_source("sources/core.json"),
        );
    }
    for i in 0..size {
        let target = format!("#{:06x}", i * 7919);
        tokens.push(
            Token::new(format!("light-border-{i}"), format!("1px solid {target}"))
                .with_type(TokenType::Border)
                .with_source("sources/light.json"),
        );
    }
    Dictionary::new(tokens)
}

fn bench_resolve(c: &mut Criterion) {
    let dict = palette(500);

    c.bench_function("references_of single value", |b| {
        b.iter(|| references_of(black_box("1px solid #000f77"), &dict))
    });

    c.bench_function("resolve whole dictionary", |b| {
        b.iter(|| {
            dict.tokens()
                .iter()
                .map(|t| ReferenceQuery::for_token(t).references(&dict).len())
                .sum::<usize>()
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
