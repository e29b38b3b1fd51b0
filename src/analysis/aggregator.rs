//! 押韵分数的汇总。
//!
//! 对一个唯一词集合（整首歌或单个段落）两两计算押韵强度，
//! 每个无序词对只计算一次，分数同时累加到两个词上。

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use tracing::trace;

use crate::analysis::rhyme::{PhoneticProfile, score_profiles};
use crate::oracle::PhoneticOracle;

/// 累计分数达到该值的词计入押韵密度。
pub const RHYME_THRESHOLD: f64 = 1.0;

/// 累计分数达到该值的词计入强押韵密度。
pub const LARGE_RHYME_THRESHOLD: f64 = 5.0;

/// 一组单词的发音信息，每个单词只向数据来源查询一次。
#[derive(Debug, Clone, Default)]
pub struct PhoneticLexicon {
    profiles: BTreeMap<String, PhoneticProfile>,
}

impl PhoneticLexicon {
    /// 并行查询所有单词的发音信息。
    pub fn build<'a, I>(oracle: &dyn PhoneticOracle, words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unique: BTreeSet<&str> = words.into_iter().collect();
        let profiles = unique
            .into_par_iter()
            .map(|word| (word.to_string(), PhoneticProfile::lookup(oracle, word)))
            .collect();
        Self { profiles }
    }

    /// 查询一个单词的发音信息。
    pub fn get(&self, word: &str) -> Option<&PhoneticProfile> {
        self.profiles.get(word)
    }

    /// 收录的单词数量。
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// 是否为空。
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// 单词 -> 累计押韵分数。
///
/// 每次统计都新建一张表，不同范围之间不共享。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RhymeScoreTable {
    scores: BTreeMap<String, f64>,
}

impl RhymeScoreTable {
    /// 直接使用数据来源为一组单词建表。
    pub fn build<'a, I>(oracle: &dyn PhoneticOracle, words: I) -> Self
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let lexicon = PhoneticLexicon::build(oracle, words.clone());
        Self::from_lexicon(&lexicon, words)
    }

    /// 使用已经查询好的发音信息为一组单词建表。
    ///
    /// 不在 `lexicon` 中的单词视为没有读音，与其他词的分数均为 0。
    pub fn from_lexicon<'a, I>(lexicon: &PhoneticLexicon, words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unique: BTreeSet<&str> = words.into_iter().collect();
        let owned: Vec<Cow<'_, PhoneticProfile>> = unique
            .iter()
            .map(|word| match lexicon.get(word) {
                Some(profile) => Cow::Borrowed(profile),
                None => Cow::Owned(PhoneticProfile {
                    word: word.to_string(),
                    ..Default::default()
                }),
            })
            .collect();
        let profiles: Vec<&PhoneticProfile> = owned.iter().map(AsRef::as_ref).collect();

        Self::from_profiles(&profiles)
    }

    fn from_profiles(profiles: &[&PhoneticProfile]) -> Self {
        let n = profiles.len();

        // 第 i 行保存 (i, j) 对 j > i 的分数
        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| score_profiles(profiles[i], profiles[j]))
                    .collect()
            })
            .collect();

        let mut totals = vec![0.0_f64; n];
        for (i, row) in rows.iter().enumerate() {
            for (offset, &pair_score) in row.iter().enumerate() {
                let j = i + 1 + offset;
                totals[i] += pair_score;
                totals[j] += pair_score;
            }
        }

        trace!("[RhymeScoreTable] 已计算 {} 个单词的押韵分数", n);

        Self {
            scores: profiles
                .iter()
                .map(|profile| profile.word.clone())
                .zip(totals)
                .collect(),
        }
    }

    /// 某个单词的累计分数。
    pub fn get(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    /// 按单词顺序遍历所有分数。
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(word, &score)| (word.as_str(), score))
    }

    /// 表中的单词数量。
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// 表是否为空。
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// 所有单词分数之和。
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// 累计分数不低于 `threshold` 的单词所占比例。空表返回 `None`。
    pub fn density(&self, threshold: f64) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let count = self.scores.values().filter(|&&s| s >= threshold).count();
        Some(count as f64 / self.scores.len() as f64)
    }
}

/// 邻近押韵分数：每个段落单独建表，再把各段落的总分相加。
///
/// 只统计同一段落内的词之间的押韵。
pub fn proximity_score(lexicon: &PhoneticLexicon, section_words: &[BTreeSet<String>]) -> f64 {
    let totals: Vec<f64> = section_words
        .par_iter()
        .map(|words| {
            RhymeScoreTable::from_lexicon(lexicon, words.iter().map(String::as_str)).total()
        })
        .collect();
    totals.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::CmuDictionary;

    const SAMPLE: &str = "LIGHT  L AY1 T
NIGHT  N AY1 T
BRIGHT  B R AY1 T
SIGHT  S AY1 T
DAY  D EY1
WAY  W EY1
HOUSE  HH AW1 S
";

    fn dict() -> CmuDictionary {
        CmuDictionary::parse(SAMPLE).unwrap()
    }

    #[test]
    fn test_table_accumulates_both_directions() {
        let table = RhymeScoreTable::build(&dict(), ["light", "night", "house"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("light"), Some(1.0));
        assert_eq!(table.get("night"), Some(1.0));
        assert_eq!(table.get("house"), Some(0.0));
        assert_eq!(table.total(), 2.0);
    }

    #[test]
    fn test_total_is_sum_of_values() {
        let table = RhymeScoreTable::build(
            &dict(),
            ["light", "night", "bright", "sight", "day", "way", "house"],
        );
        let summed: f64 = table.iter().map(|(_, score)| score).sum();
        assert_eq!(table.total(), summed);
        assert_eq!(table.get("light"), Some(3.0));
        assert_eq!(table.get("day"), Some(1.0));
    }

    #[test]
    fn test_densities() {
        let table = RhymeScoreTable::build(
            &dict(),
            ["light", "night", "bright", "sight", "day", "way", "house"],
        );
        assert_eq!(table.density(RHYME_THRESHOLD), Some(6.0 / 7.0));
        assert_eq!(table.density(LARGE_RHYME_THRESHOLD), Some(0.0));
        assert_eq!(RhymeScoreTable::default().density(RHYME_THRESHOLD), None);
    }

    #[test]
    fn test_unknown_words_contribute_nothing() {
        let table = RhymeScoreTable::build(&dict(), ["zzyzx", "light", "qwrt"]);
        assert_eq!(table.get("zzyzx"), Some(0.0));
        assert_eq!(table.get("qwrt"), Some(0.0));
        assert_eq!(table.get("light"), Some(0.0));
        assert_eq!(table.density(RHYME_THRESHOLD), Some(0.0));
    }

    #[test]
    fn test_from_lexicon_handles_words_outside_lexicon() {
        let dictionary = dict();
        let lexicon = PhoneticLexicon::build(&dictionary, ["light"]);
        let table = RhymeScoreTable::from_lexicon(&lexicon, ["light", "house", "absent"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("house"), Some(0.0), "不在发音表中的词按无读音处理");
        assert_eq!(table.total(), 0.0);
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let table = RhymeScoreTable::build(&dict(), ["light", "light", "night"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 2.0);
    }

    #[test]
    fn test_proximity_only_counts_within_sections() {
        let dictionary = dict();
        let sections: Vec<BTreeSet<String>> = vec![
            ["light", "day"].into_iter().map(String::from).collect(),
            ["night", "way"].into_iter().map(String::from).collect(),
            ["bright", "sight"].into_iter().map(String::from).collect(),
        ];
        let lexicon = PhoneticLexicon::build(
            &dictionary,
            sections.iter().flatten().map(String::as_str),
        );
        assert_eq!(lexicon.len(), 6);
        assert_eq!(proximity_score(&lexicon, &sections), 2.0);
    }
}
