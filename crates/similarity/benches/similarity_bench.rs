use canonical::{tokenize, TokenizeConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use similarity::{build_vector, profile_paragraphs, score, CandidateFilter};

// Digits are not tokens, so words are spelled with letters only.
fn word(n: usize) -> String {
    const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    let n = n % (26 * 26);
    format!("w{}{}", LETTERS[n % 26] as char, LETTERS[n / 26] as char)
}

fn paragraph(i: usize, words: usize) -> String {
    (0..words)
        .map(|w| word((i * 31 + w * 7) % 97))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for words in [20, 100, 400].iter() {
        let a = build_vector(&tokenize(&paragraph(1, *words)));
        let b = build_vector(&tokenize(&paragraph(2, *words)));
        group.throughput(Throughput::Elements(*words as u64));
        group.bench_function(format!("words_{words}"), |bench| {
            bench.iter(|| score(black_box(&a), black_box(&b)))
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let paragraphs: Vec<String> = (0..200).map(|i| paragraph(i, 40)).collect();
    let profiles = profile_paragraphs(&paragraphs, &TokenizeConfig::default(), false);
    let filter = CandidateFilter::default();

    c.bench_function("filter_200x200", |bench| {
        bench.iter(|| {
            let mut admitted = 0usize;
            for (i, a) in profiles.iter().enumerate() {
                for b in &profiles[i + 1..] {
                    if filter.admits(black_box(a), black_box(b)) {
                        admitted += 1;
                    }
                }
            }
            admitted
        })
    });
}

criterion_group!(benches, bench_score, bench_filter);
criterion_main!(benches);
