#![warn(missing_docs)]

//! # Lyric Empirics RS
//!
//! 一个用于计算歌词统计指标的 Rust 库：段落结构、词汇丰富度、音节密度以及连续取值的押韵强度。
//!
//! ## 主要功能
//!
//! - **歌词分析**: 规范化歌词文本，按 `[Verse]`、`[Chorus]` 等标题切分段落，
//!   统计词汇并对所有唯一词两两计算押韵分数。
//! - **发音数据**: 内置 CMU 发音词典解析器和启发式音节估算，也可以实现
//!   [`PhoneticOracle`] / [`SyllableOracle`] 接入其他数据来源。
//! - **歌词来源**: 通过 [`providers::LyricsSource`] 接入任意歌词服务，
//!   按顺序或并发搜索，并按标题和艺术家挑选最佳匹配。
//!
//! ## 分析一首歌
//!
//! ```rust
//! use lyric_empirics_rs::{LyricEmpirics, model::track::FoundSong, oracle::CmuDictionary,
//!     providers::InMemorySource};
//!
//! # async fn run() -> lyric_empirics_rs::Result<()> {
//! let dictionary = CmuDictionary::parse("CAT  K AE1 T\nHAT  HH AE1 T\n")?;
//! let mut client = LyricEmpirics::with_dictionary(dictionary);
//! client.add_source(InMemorySource::with_songs(vec![FoundSong::new(
//!     "1",
//!     "Cats",
//!     "Band",
//!     "[Verse]\nCat hat",
//! )]));
//!
//! match client.find_song("Cats", "Band").await? {
//!     Some(song) => println!("{} 的统计数据: {}", song, song.stat_row().to_csv_record()),
//!     None => println!("未找到歌曲。"),
//! }
//! # Ok(())
//! # }
//! ```
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod oracle;
pub mod providers;
pub mod search;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use crate::{
    config::ClientConfig,
    error::{LyricEmpiricsError, Result},
    model::{
        song::Song,
        stat_row::{StatRow, StatValue},
        track::{FoundSong, SongQuery},
    },
    oracle::{PhoneticOracle, SyllableOracle},
};

use crate::{
    oracle::{CachedOracle, CmuDictionary},
    providers::LyricsSource,
    search::RankedSong,
};

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层客户端，持有歌词来源、发音数据来源和客户端配置。
///
/// 这是与本库交互的主要入口点。
pub struct LyricEmpirics {
    sources: Vec<Box<dyn LyricsSource>>,
    phonetics: Arc<dyn PhoneticOracle>,
    syllables: Arc<dyn SyllableOracle>,
    config: ClientConfig,
}

/// 定义歌曲的搜索策略。
#[derive(Debug, Clone)]
pub enum SearchMode {
    /// 按注册顺序依次搜索歌词来源。
    ///
    /// 返回第一个找到合格结果的来源给出的最佳匹配，两次请求之间等待配置中的时间。
    Ordered,
    /// 并发搜索所有歌词来源，聚合后选出匹配度最高的结果。
    Parallel,
    /// 只搜索一个特定的歌词来源。
    ///
    /// 参数是来源的名称 (例如, "memory")。
    Specific(String),
}

impl LyricEmpirics {
    /// 使用给定的数据来源创建客户端，配置为默认值。
    pub fn new(phonetics: Arc<dyn PhoneticOracle>, syllables: Arc<dyn SyllableOracle>) -> Self {
        Self {
            sources: Vec::new(),
            phonetics,
            syllables,
            config: ClientConfig::default(),
        }
    }

    /// 使用 CMU 发音词典同时作为发音和音节数据来源。
    ///
    /// 词典会被包装在 [`CachedOracle`] 中，重复查询同一个单词不会重新计算。
    pub fn with_dictionary(dictionary: CmuDictionary) -> Self {
        let oracle = Arc::new(CachedOracle::new(dictionary));
        Self::new(oracle.clone(), oracle)
    }

    /// 替换客户端配置。
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// 当前的客户端配置。
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 可修改的客户端配置，修改在下一次搜索时生效。
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// 注册一个歌词来源，搜索时按注册顺序尝试。
    pub fn add_source(&mut self, source: impl LyricsSource + 'static) {
        debug!("[Main] 注册歌词来源 '{}'", source.name());
        self.sources.push(Box::new(source));
    }

    /// 所有已注册歌词来源的名称。
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// 直接分析一段歌词，不经过任何歌词来源。
    pub fn analyze(&self, name: &str, artist: &str, lyrics: &str, id: &str) -> Song {
        Song::new(
            name,
            artist,
            lyrics,
            id,
            self.phonetics.as_ref(),
            self.syllables.as_ref(),
        )
    }

    /// 按标题和艺术家查找歌曲并完成分析，使用 [`SearchMode::Ordered`]。
    ///
    /// # 返回
    /// * `Ok(Some(Song))` - 找到并分析了歌曲。
    /// * `Ok(None)` - 所有来源都没有合格的结果。
    /// * `Err(LyricEmpiricsError::NoSources)` - 没有注册任何歌词来源。
    pub async fn find_song(&self, title: &str, artist: &str) -> Result<Option<Song>> {
        self.search_song(&SongQuery::new(title, artist), SearchMode::Ordered)
            .await
    }

    /// 根据指定的策略查找歌曲并完成分析。
    ///
    /// # 参数
    /// * `query` - 包含标题和可选艺术家的查询。
    /// * `mode` - `SearchMode` 枚举，用于定义搜索策略。
    pub async fn search_song(
        &self,
        query: &SongQuery<'_>,
        mode: SearchMode,
    ) -> Result<Option<Song>> {
        if self.sources.is_empty() {
            return Err(LyricEmpiricsError::NoSources);
        }

        let best = match &mode {
            SearchMode::Ordered => self.search_ordered(query).await,
            SearchMode::Parallel => {
                let sources: Vec<&dyn LyricsSource> =
                    self.sources.iter().map(|s| s.as_ref()).collect();
                search::search_all_sources(&sources, query, &self.config)
                    .await
                    .into_iter()
                    .next()
            }
            SearchMode::Specific(name) => {
                let source = self
                    .sources
                    .iter()
                    .find(|s| s.name() == name.as_str())
                    .ok_or_else(|| LyricEmpiricsError::SourceNotSupported(name.clone()))?;
                search::search_source(source.as_ref(), query, &self.config)
                    .await?
                    .into_iter()
                    .next()
            }
        };

        let Some(best) = best else {
            if self.config.verbose() {
                info!("[Main] 使用 [{:?}] 模式未找到 '{}'。", mode, query.title);
            }
            return Ok(None);
        };

        if self.config.verbose() {
            info!(
                "[Main] 在 '{}' 找到 {} ~~~ {} (ID: {})",
                best.source_name, best.song.title, best.song.artist, best.song.id
            );
        }

        Ok(Some(Song::from_found(
            &best.song,
            self.phonetics.as_ref(),
            self.syllables.as_ref(),
        )))
    }

    /// 在歌词来源上按顺序搜索，返回第一个合格的结果。
    async fn search_ordered(&self, query: &SongQuery<'_>) -> Option<RankedSong> {
        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.sleep()).await;
            }

            debug!("[Main] 正在尝试歌词来源: '{}'", source.name());
            match search::search_source(source.as_ref(), query, &self.config).await {
                Ok(ranked) => {
                    if let Some(best) = ranked.into_iter().next() {
                        return Some(best);
                    }
                }
                Err(e) => {
                    warn!("[Main] 歌词来源 '{}' 搜索失败: {}", source.name(), e);
                }
            }
        }
        None
    }
}
