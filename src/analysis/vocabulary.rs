//! 从段落中建立词汇索引。

use std::collections::BTreeSet;

use crate::analysis::sections::Section;

/// 一首歌的词汇索引。
///
/// 唯一词集合使用 `BTreeSet`，迭代顺序固定，下游的押韵统计因此是确定性的。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// 每个段落各自的唯一词集合，顺序与段落一致。
    pub section_words: Vec<BTreeSet<String>>,
    /// 所有段落中出现的全部词，按出现顺序（含重复）。
    pub all_words: Vec<String>,
    /// 整首歌的唯一词集合。
    pub unique_words: BTreeSet<String>,
}

impl Vocabulary {
    /// 为一组段落建立索引。
    pub fn index(sections: &[Section]) -> Self {
        let section_words = sections
            .iter()
            .map(|section| section.words().map(str::to_string).collect())
            .collect();
        let all_words: Vec<String> = sections
            .iter()
            .flat_map(Section::words)
            .map(str::to_string)
            .collect();
        let unique_words = all_words.iter().cloned().collect();

        Self {
            section_words,
            all_words,
            unique_words,
        }
    }

    /// 词的总数（含重复）。
    pub fn word_count(&self) -> usize {
        self.all_words.len()
    }

    /// 唯一词的数量。
    pub fn unique_word_count(&self) -> usize {
        self.unique_words.len()
    }

    /// 至少出现在两个不同段落中的词。
    ///
    /// 对每一对段落的唯一词集合求交集，再取所有交集的并集。
    pub fn shared_words(&self) -> BTreeSet<&str> {
        let mut shared = BTreeSet::new();
        for (i, first) in self.section_words.iter().enumerate() {
            for second in &self.section_words[i + 1..] {
                shared.extend(first.intersection(second).map(String::as_str));
            }
        }
        shared
    }

    /// 至少出现在两个段落中的唯一词数量。
    pub fn shared_word_count(&self) -> usize {
        self.shared_words().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sections::extract_sections;

    fn index(lyrics: &str) -> Vocabulary {
        Vocabulary::index(&extract_sections(lyrics))
    }

    #[test]
    fn test_counts_and_sets() {
        let vocab = index("[Verse 1]\nCat hat\n[Chorus]\nBat mat");
        assert_eq!(vocab.word_count(), 4);
        assert_eq!(vocab.unique_word_count(), 4);
        assert_eq!(vocab.all_words, ["cat", "hat", "bat", "mat"]);
        assert_eq!(vocab.section_words.len(), 2);
        assert!(vocab.section_words[0].contains("cat"));
        assert!(vocab.section_words[1].contains("mat"));
    }

    #[test]
    fn test_repeated_words_count_once_in_sets() {
        let vocab = index("[Chorus]\nla la la\nla di da");
        assert_eq!(vocab.word_count(), 6);
        assert_eq!(vocab.unique_word_count(), 3);
        assert_eq!(vocab.section_words[0].len(), 3);
    }

    #[test]
    fn test_shared_words_across_sections() {
        let vocab = index("[Verse]\na b c\n[Chorus]\nc d\n[Verse]\nd e a\n[Bridge]\nf");
        let shared: Vec<&str> = vocab.shared_words().into_iter().collect();
        assert_eq!(shared, ["a", "c", "d"]);
        assert_eq!(vocab.shared_word_count(), 3);
    }

    #[test]
    fn test_disjoint_sections_share_nothing() {
        let vocab = index("[Verse]\none two\n[Chorus]\nthree four");
        assert_eq!(vocab.shared_word_count(), 0);
    }

    #[test]
    fn test_repeats_within_one_section_are_not_shared() {
        let vocab = index("[Verse]\necho echo\n[Chorus]\nother");
        assert_eq!(vocab.shared_word_count(), 0);
    }
}
