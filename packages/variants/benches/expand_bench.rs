use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filament_parser::parse;
use filament_variants::VariantExpander;

fn expand_single_block(c: &mut Criterion) {
    let source = r#"
        @variants group-hover, hover, focus, active {
            .banana { color: yellow; }
            .chocolate { color: brown; }
        }
    "#;
    let expander = VariantExpander::with_defaults();

    c.bench_function("expand_single_block", |b| {
        b.iter(|| {
            let mut doc = parse(black_box(source)).unwrap();
            expander.expand_document(&mut doc).unwrap();
            doc.to_css()
        })
    });
}

fn expand_many_blocks(c: &mut Criterion) {
    let mut source = String::new();
    for i in 0..100 {
        source.push_str(&format!(
            "@variants responsive, group-hover, hover, focus, active {{ .util-{i} {{ color: red; }} .extra-{i} {{ color: blue; }} }}\n"
        ));
    }
    let expander = VariantExpander::with_defaults();

    c.bench_function("expand_100_blocks", |b| {
        b.iter(|| {
            let mut doc = parse(black_box(&source)).unwrap();
            expander.expand_document(&mut doc).unwrap();
            doc.to_css()
        })
    });
}

criterion_group!(benches, expand_single_block, expand_many_blocks);
criterion_main!(benches);
