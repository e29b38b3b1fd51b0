//! 歌曲聚合：身份信息加上构造时一次性算好的全部统计结果。

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::analysis::{
    LyricAnalysis, Section, SongMetrics, SongStatistics, Vocabulary, aggregator::RhymeScoreTable,
    analyze_lyrics,
    normalizer::{keep_alphanumeric, remove_tag},
};
use crate::model::{stat_row::StatRow, track::FoundSong};
use crate::oracle::{PhoneticOracle, SyllableOracle};

/// 一首已分析的歌曲。
///
/// 所有派生数据都在 [`Song::new`] 中计算，之后不可变。
#[derive(Debug, Clone)]
pub struct Song {
    name: String,
    artist: String,
    id: String,
    lyrics: String,
    analysis: LyricAnalysis,
}

/// 把标题和艺术家中的弯引号替换为直引号。
fn straighten_apostrophes(text: &str) -> String {
    text.replace('’', "'")
}

impl Song {
    /// 分析一首歌曲。
    ///
    /// # 参数
    /// * `name` - 歌曲标题。
    /// * `artist` - 主要艺术家。
    /// * `lyrics` - 原始歌词，末尾的推广标签会被去除。
    /// * `id` - 歌曲在歌词来源中的 ID。
    /// * `phonetics` - 发音数据来源。
    /// * `syllables` - 音节数估算来源。
    pub fn new(
        name: &str,
        artist: &str,
        lyrics: &str,
        id: impl Into<String>,
        phonetics: &dyn PhoneticOracle,
        syllables: &dyn SyllableOracle,
    ) -> Self {
        let name = straighten_apostrophes(name);
        let artist = straighten_apostrophes(artist);
        let lyrics = remove_tag(lyrics);

        debug!("[Song] 开始分析 \"{}\" by {}", name, artist);
        let analysis = analyze_lyrics(&lyrics, phonetics, syllables);

        Self {
            name,
            artist,
            id: id.into(),
            lyrics,
            analysis,
        }
    }

    /// 分析歌词来源返回的一条结果。
    pub fn from_found(
        found: &FoundSong,
        phonetics: &dyn PhoneticOracle,
        syllables: &dyn SyllableOracle,
    ) -> Self {
        Self::new(
            &found.title,
            &found.artist,
            &found.lyrics,
            found.id.clone(),
            phonetics,
            syllables,
        )
    }

    /// 歌曲标题。
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 主要艺术家。
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// 歌曲在歌词来源中的 ID。
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 去除推广标签后的歌词。
    pub fn lyrics(&self) -> &str {
        &self.lyrics
    }

    /// 提取出的段落。
    pub fn sections(&self) -> &[Section] {
        &self.analysis.sections
    }

    /// 段落数量。
    pub fn section_count(&self) -> usize {
        self.analysis.sections.len()
    }

    /// 词汇索引。
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.analysis.vocabulary.as_ref()
    }

    /// 每个段落的唯一词集合。
    pub fn section_words(&self) -> Option<&[BTreeSet<String>]> {
        self.vocabulary().map(|v| v.section_words.as_slice())
    }

    /// 全部词，按出现顺序。
    pub fn all_words(&self) -> Option<&[String]> {
        self.vocabulary().map(|v| v.all_words.as_slice())
    }

    /// 整首歌的唯一词集合。
    pub fn unique_words(&self) -> Option<&BTreeSet<String>> {
        self.vocabulary().map(|v| &v.unique_words)
    }

    /// 整首歌的押韵分数表。
    pub fn rhyme_table(&self) -> Option<&RhymeScoreTable> {
        self.analysis.rhyme_table.as_ref()
    }

    /// 统计结果。
    pub fn statistics(&self) -> &SongStatistics {
        &self.analysis.statistics
    }

    /// 已计算的统计指标，没有段落时为 `None`。
    pub fn metrics(&self) -> Option<&SongMetrics> {
        self.analysis.statistics.metrics()
    }

    /// 保存歌词时使用的文件名：`标题_艺术家.txt`，只保留字母和数字。
    pub fn lyrics_file_name(&self) -> String {
        format!(
            "{}_{}.txt",
            keep_alphanumeric(&self.name),
            keep_alphanumeric(&self.artist)
        )
    }

    /// 供表格存储使用的统计数据行。
    pub fn stat_row(&self) -> StatRow {
        StatRow::new(
            &self.name,
            &self.artist,
            &self.id,
            self.section_count(),
            self.metrics(),
        )
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {}", self.name, self.artist)
    }
}

/// 标题和艺术家都相同即视为同一首歌。
impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.artist == other.artist
    }
}

impl Eq for Song {}
