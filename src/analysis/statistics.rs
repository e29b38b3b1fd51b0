//! 歌曲统计指标的计算。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{
    aggregator::{
        LARGE_RHYME_THRESHOLD, PhoneticLexicon, RHYME_THRESHOLD, RhymeScoreTable, proximity_score,
    },
    sections::{Section, extract_sections},
    vocabulary::Vocabulary,
};
use crate::oracle::{PhoneticOracle, SyllableOracle};

/// 所有除法得到的指标保留 4 位小数。
///
/// 按浮点数的精确值舍入，恰好位于中点时取偶数位（`1/32` 得到 `0.0312`）。
pub fn round4(value: f64) -> f64 {
    format!("{value:.4}").parse().unwrap_or(value)
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    round4(numerator / denominator as f64)
}

/// 一首至少有一个段落的歌曲的全部统计指标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMetrics {
    /// 段落数量。
    pub section_count: usize,
    /// 总词数（含重复）。
    pub word_count: usize,
    /// 唯一词数量。
    pub unique_word_count: usize,
    /// 唯一词占总词数的比例。
    pub unique_word_pct: f64,
    /// 整首歌的押韵总分。
    pub total_rhyme_score: f64,
    /// 邻近押韵总分（只统计同一段落内的押韵）。
    pub proximity_rhyme_score: f64,
    /// 押韵分数不低于 1 的唯一词比例。
    pub rhyme_density: f64,
    /// 押韵分数不低于 5 的唯一词比例。
    pub large_rhyme_density: f64,
    /// 平均每段词数。
    pub words_per_section: f64,
    /// 平均每词音节数。
    pub syllables_per_word: f64,
    /// 平均每段唯一词数。
    pub unique_words_per_section: f64,
    /// 平均每段押韵分数。
    pub rhyme_score_per_section: f64,
    /// 平均每个唯一词的押韵分数。
    pub rhyme_score_per_word: f64,
    /// 平均每段邻近押韵分数。
    pub proximity_score_per_section: f64,
    /// 平均每个唯一词的邻近押韵分数。
    pub proximity_score_per_word: f64,
    /// 至少出现在两个段落中的唯一词比例。
    pub section_similarity: f64,
}

/// 歌曲的统计结果。
///
/// 没有任何段落的歌曲不计算任何指标，而不是用 0 填充。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SongStatistics {
    /// 歌词中没有可识别的段落。
    Empty,
    /// 已计算的指标。
    Computed(SongMetrics),
}

impl SongStatistics {
    /// 已计算的指标，`Empty` 时返回 `None`。
    pub fn metrics(&self) -> Option<&SongMetrics> {
        match self {
            Self::Empty => None,
            Self::Computed(metrics) => Some(metrics),
        }
    }

    /// 是否没有任何指标。
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// 一次歌词分析的全部结果。
#[derive(Debug, Clone)]
pub struct LyricAnalysis {
    /// 提取出的段落。
    pub sections: Vec<Section>,
    /// 词汇索引，没有段落时为 `None`。
    pub vocabulary: Option<Vocabulary>,
    /// 整首歌的押韵分数表，没有段落时为 `None`。
    pub rhyme_table: Option<RhymeScoreTable>,
    /// 统计指标。
    pub statistics: SongStatistics,
}

/// 分析一段已去除推广标签的歌词。
///
/// # 参数
/// * `lyrics` - 原始歌词文本。
/// * `phonetics` - 发音数据来源。
/// * `syllables` - 音节数估算来源。
pub fn analyze_lyrics(
    lyrics: &str,
    phonetics: &dyn PhoneticOracle,
    syllables: &dyn SyllableOracle,
) -> LyricAnalysis {
    let sections = extract_sections(lyrics);
    if sections.is_empty() {
        debug!("[Statistics] 歌词中没有可识别的段落，跳过统计。");
        return LyricAnalysis {
            sections,
            vocabulary: None,
            rhyme_table: None,
            statistics: SongStatistics::Empty,
        };
    }

    let vocabulary = Vocabulary::index(&sections);
    let lexicon = PhoneticLexicon::build(
        phonetics,
        vocabulary.unique_words.iter().map(String::as_str),
    );
    let rhyme_table = RhymeScoreTable::from_lexicon(
        &lexicon,
        vocabulary.unique_words.iter().map(String::as_str),
    );
    let proximity = proximity_score(&lexicon, &vocabulary.section_words);

    let metrics = compute_metrics(&sections, &vocabulary, &rhyme_table, proximity, syllables);
    debug!(
        "[Statistics] 共 {} 个段落，{} 个词，{} 个唯一词，押韵总分 {:.4}",
        metrics.section_count, metrics.word_count, metrics.unique_word_count, metrics.total_rhyme_score
    );

    LyricAnalysis {
        sections,
        vocabulary: Some(vocabulary),
        rhyme_table: Some(rhyme_table),
        statistics: SongStatistics::Computed(metrics),
    }
}

/// 由各组件的结果组合出统计指标。
///
/// 调用方保证 `sections` 非空；非空段落至少含有一个词，因此所有分母都大于 0。
fn compute_metrics(
    sections: &[Section],
    vocabulary: &Vocabulary,
    rhyme_table: &RhymeScoreTable,
    proximity_rhyme_score: f64,
    syllables: &dyn SyllableOracle,
) -> SongMetrics {
    let section_count = sections.len();
    let word_count = vocabulary.word_count();
    let unique_word_count = vocabulary.unique_word_count();
    let total_rhyme_score = rhyme_table.total();

    let total_syllables: u64 = vocabulary
        .all_words
        .iter()
        .map(|word| u64::from(syllables.estimate_syllables(word)))
        .sum();

    SongMetrics {
        section_count,
        word_count,
        unique_word_count,
        unique_word_pct: ratio(unique_word_count as f64, word_count),
        total_rhyme_score,
        proximity_rhyme_score,
        rhyme_density: round4(rhyme_table.density(RHYME_THRESHOLD).unwrap_or_default()),
        large_rhyme_density: round4(
            rhyme_table
                .density(LARGE_RHYME_THRESHOLD)
                .unwrap_or_default(),
        ),
        words_per_section: ratio(word_count as f64, section_count),
        syllables_per_word: ratio(total_syllables as f64, word_count),
        unique_words_per_section: ratio(unique_word_count as f64, section_count),
        rhyme_score_per_section: ratio(total_rhyme_score, section_count),
        rhyme_score_per_word: ratio(total_rhyme_score, unique_word_count),
        proximity_score_per_section: ratio(proximity_rhyme_score, section_count),
        proximity_score_per_word: ratio(proximity_rhyme_score, unique_word_count),
        section_similarity: ratio(vocabulary.shared_word_count() as f64, unique_word_count),
    }
}
