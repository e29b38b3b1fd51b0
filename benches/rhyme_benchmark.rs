use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use lyric_empirics_rs::{
    Song,
    analysis::aggregator::RhymeScoreTable,
    oracle::{CachedOracle, CmuDictionary},
};

const DICTIONARY: &str = include_str!("../tests/test_data/mini_cmudict.txt");
const LYRICS: &str = include_str!("../tests/test_data/city_lights.txt");

/// 把测试歌词重复若干次，得到一首段落更多的歌。
fn long_lyrics(repeats: usize) -> String {
    let body = LYRICS.replace("123.4KEmbedShare URLCopyEmbedCopy", "");
    vec![body; repeats].join("\n")
}

fn bench_rhyme_scoring(c: &mut Criterion) {
    let dictionary = CmuDictionary::parse(DICTIONARY).expect("解析测试词典失败");
    let words: Vec<String> = DICTIONARY
        .lines()
        .filter(|line| !line.starts_with(";;;"))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_lowercase)
        .collect();

    let mut group = c.benchmark_group("Rhyme Scoring");

    group.bench_function("Score table (uncached)", |b| {
        b.iter(|| RhymeScoreTable::build(&dictionary, black_box(words.iter().map(String::as_str))))
    });

    let cached = CachedOracle::new(dictionary.clone());
    group.bench_function("Score table (cached)", |b| {
        b.iter(|| RhymeScoreTable::build(&cached, black_box(words.iter().map(String::as_str))))
    });

    let lyrics = long_lyrics(8);
    group.bench_function("Full song analysis", |b| {
        b.iter(|| {
            Song::new(
                "City Lights",
                "The Night Owls",
                black_box(&lyrics),
                "1002",
                &cached,
                &cached,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_rhyme_scoring);
criterion_main!(benches);
