use criterion::{black_box, criterion_group, criterion_main, Criterion};
use csleuth::{Analyzer, SourceBuffer};

fn synthetic_source(functions: usize) -> String {
    let mut text = String::new();
    for i in 0..functions {
        text.push_str(&format!("void func_{}() {{\n", i));
        text.push_str(&format!("    int *p_{} = malloc(16);\n", i));
        text.push_str("    int counter = 0;\n");
        text.push_str("    counter = counter + 1;\n");
        text.push_str(&format!("    free(p_{});\n", i));
        if i > 0 {
            text.push_str(&format!("    func_{}();\n", i - 1));
        }
        text.push_str("}\n");
    }
    text
}

fn bench_analyze(c: &mut Criterion) {
    let source = SourceBuffer::from_text(&synthetic_source(100));
    c.bench_function("analyze_100_functions", |b| {
        b.iter(|| {
            let analyzer = Analyzer::new();
            black_box(analyzer.analyze(black_box(&source)))
        })
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
