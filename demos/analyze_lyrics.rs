//! 用于演示 `lyric-empirics` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --example analyze_lyrics -- <词典文件> <歌词目录 JSON> <标题> <艺术家>
//! ```
//!
//! 不带参数时使用 `tests/test_data` 中的测试数据。

use std::env;
use std::path::PathBuf;

use lyric_empirics_rs::{
    LyricEmpirics, StatRow,
    config::{StoragePaths, load_client_config},
    error::Result,
    oracle::CmuDictionary,
    providers::InMemorySource,
};

use tracing::{Level, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut args = env::args().skip(1);
    let dictionary_path = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "tests/test_data/mini_cmudict.txt".to_string()),
    );
    let catalog_path = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "tests/test_data/catalog.json".to_string()),
    );
    let title = args.next().unwrap_or_else(|| "City Lights".to_string());
    let artist = args.next().unwrap_or_else(|| "The Night Owls".to_string());

    let config = load_client_config().unwrap_or_else(|e| {
        warn!("读取客户端配置失败，使用默认配置: {}", e);
        Default::default()
    });

    info!("正在加载发音词典 {:?}...", dictionary_path);
    let dictionary = CmuDictionary::from_file(&dictionary_path)?;

    let mut client = LyricEmpirics::with_dictionary(dictionary).with_config(config);
    client.add_source(InMemorySource::from_json_file(&catalog_path)?);

    let Some(song) = client.find_song(&title, &artist).await? else {
        error!("未找到 '{}' by {}，程序退出。", title, artist);
        return Ok(());
    };

    let Some(metrics) = song.metrics() else {
        warn!("{} 没有可识别的段落，没有统计数据。", song);
        return Ok(());
    };

    info!(
        "{}: {} 个段落，{} 个词，押韵总分 {}，押韵密度 {}",
        song,
        metrics.section_count,
        metrics.word_count,
        metrics.total_rhyme_score,
        metrics.rhyme_density
    );

    let storage = StoragePaths::default();
    println!("歌词将保存到: {}", storage.lyrics_file(&song.lyrics_file_name()).display());
    println!("统计数据将追加到: {}", storage.stats_file().display());
    println!();
    println!("{}", StatRow::csv_header());
    println!("{}", song.stat_row().to_csv_record());
    println!();
    println!("{}", serde_json::to_string_pretty(&song.stat_row())?);

    Ok(())
}
