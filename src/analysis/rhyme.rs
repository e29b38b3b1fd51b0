//! 两个单词之间的押韵强度评分。
//!
//! 评分是 [0, 1] 之间的连续值：
//! - 发音数据来源直接判定为完美押韵的单词对得 1 分；
//! - 否则比较两个单词所有读音组合的音素结尾，取最高分；
//! - 相同的单词得 0 分，没有读音的单词与任何单词都得 0 分。

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::oracle::PhoneticOracle;

/// 长度大于 2 的读音每缩短一个比较长度扣除的分数。
const STEP_PENALTY: f64 = 0.25;

/// 音素出现在非结尾位置时，分数除以该值。
const REPOSITIONED_DIVISOR: f64 = 4.0;

/// 去掉音素中的重音数字，例如 `AY1` -> `AY`。
pub fn strip_stress(phoneme: &str) -> String {
    phoneme.chars().filter(|c| c.is_alphabetic()).collect()
}

/// 音素是否含有元音字母（A/E/I/O/U，不区分大小写）。
pub fn is_vowel_bearing(phoneme: &str) -> bool {
    phoneme
        .chars()
        .any(|c| matches!(c.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U'))
}

fn has_vowel(phonemes: &[String]) -> bool {
    phonemes.iter().any(|p| is_vowel_bearing(p))
}

/// 一个单词用于押韵评分的全部发音信息。
///
/// 每个单词只查询一次数据来源，之后的两两比较完全在内存中进行。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneticProfile {
    /// 单词本身。
    pub word: String,
    /// 与该单词完美押韵的单词。
    pub perfect_rhymes: HashSet<String>,
    /// 去掉重音数字后的全部读音。
    pub pronunciations: Vec<Vec<String>>,
}

impl PhoneticProfile {
    /// 向数据来源查询一个单词的发音信息。
    pub fn lookup(oracle: &dyn PhoneticOracle, word: &str) -> Self {
        let pronunciations = oracle
            .pronunciations(word)
            .iter()
            .map(|phones| phones.iter().map(|p| strip_stress(p)).collect())
            .collect();

        Self {
            word: word.to_string(),
            perfect_rhymes: oracle.perfect_rhymes(word),
            pronunciations,
        }
    }

    /// 数据来源中是否有该单词的读音。
    pub fn has_pronunciation(&self) -> bool {
        !self.pronunciations.is_empty()
    }
}

/// 计算两个单词的押韵强度。
pub fn score(oracle: &dyn PhoneticOracle, first: &str, second: &str) -> f64 {
    if first == second {
        return 0.0;
    }
    score_profiles(
        &PhoneticProfile::lookup(oracle, first),
        &PhoneticProfile::lookup(oracle, second),
    )
}

/// 使用预先查询好的发音信息计算两个单词的押韵强度。
pub fn score_profiles(first: &PhoneticProfile, second: &PhoneticProfile) -> f64 {
    if first.word == second.word {
        return 0.0;
    }

    if first.perfect_rhymes.contains(&second.word) || second.perfect_rhymes.contains(&first.word)
    {
        return 1.0;
    }

    let mut best = 0.0_f64;
    for first_phones in &first.pronunciations {
        for second_phones in &second.pronunciations {
            best = best.max(score_pronunciations(first_phones, second_phones));
        }
    }
    best
}

/// 比较两个已去除重音数字的读音。
///
/// 音素较少的一方作为 `shorter`。两者长度相同时两种方向都计算一次并取较大值，
/// 保证结果与参数顺序无关。
pub fn score_pronunciations(first: &[String], second: &[String]) -> f64 {
    match first.len().cmp(&second.len()) {
        Ordering::Less => score_oriented(first, second),
        Ordering::Greater => score_oriented(second, first),
        Ordering::Equal => score_oriented(first, second).max(score_oriented(second, first)),
    }
}

fn score_oriented(shorter: &[String], longer: &[String]) -> f64 {
    let Some(longer_last) = longer.last() else {
        return 0.0;
    };

    match shorter {
        [] => 0.0,
        [only] => {
            if is_vowel_bearing(only) && only == longer_last {
                1.0
            } else {
                0.0
            }
        }
        [_, last] => {
            if (is_vowel_bearing(last) && last == longer_last) || longer.ends_with(shorter) {
                1.0
            } else {
                0.0
            }
        }
        _ => score_suffixes(shorter, longer),
    }
}

/// 长度大于 2 的读音：从 `ceil(n/2)` 个音素开始逐步缩短比较长度，直到 2。
///
/// 结尾完全对齐得 `1 - 0.25 * 缩短次数`；
/// 只在较长读音的其他位置出现时，再除以 4。
fn score_suffixes(shorter: &[String], longer: &[String]) -> f64 {
    let max_len = shorter.len().div_ceil(2);
    let mut best = 0.0_f64;

    for sub_len in (2..=max_len).rev() {
        let tail = &shorter[shorter.len() - sub_len..];
        if !has_vowel(tail) {
            continue;
        }

        let weight = 1.0 - STEP_PENALTY * (max_len - sub_len) as f64;
        let candidate = if longer.ends_with(tail) {
            weight
        } else if longer.windows(sub_len).any(|window| window == tail) {
            weight / REPOSITIONED_DIVISOR
        } else {
            0.0
        };
        best = best.max(candidate);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::CmuDictionary;

    fn phones(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn both_ways(a: &str, b: &str) -> f64 {
        let (a, b) = (phones(a), phones(b));
        let forward = score_pronunciations(&a, &b);
        assert_eq!(forward, score_pronunciations(&b, &a), "评分应对称");
        forward
    }

    #[test]
    fn test_strip_stress_and_vowels() {
        assert_eq!(strip_stress("AY1"), "AY");
        assert_eq!(strip_stress("T"), "T");
        assert!(is_vowel_bearing("ER"));
        assert!(is_vowel_bearing("ah"));
        assert!(!is_vowel_bearing("NG"));
        assert!(!is_vowel_bearing("Y"));
    }

    #[test]
    fn test_single_phoneme() {
        assert_eq!(both_ways("AY", "L AY"), 1.0);
        assert_eq!(both_ways("T", "L AY T"), 0.0, "辅音不能单独构成押韵");
        assert_eq!(both_ways("OW", "L AY"), 0.0);
    }

    #[test]
    fn test_two_phonemes() {
        assert_eq!(both_ways("S IY", "M IY"), 1.0);
        assert_eq!(both_ways("AY T", "L AY T"), 1.0);
        assert_eq!(both_ways("K T", "AE K T"), 1.0, "完整结尾匹配不要求元音");
        assert_eq!(both_ways("N OW", "OW N"), 0.0);
    }

    #[test]
    fn test_aligned_suffix_scores() {
        assert_eq!(both_ways("HH AE P IY", "S N AE P IY"), 1.0);
        assert_eq!(both_ways("K L M N EH T", "P R S T N EH T"), 1.0);
        assert_eq!(both_ways("K L M N EH T", "P R S T W EH T"), 0.75);
    }

    #[test]
    fn test_repositioned_match_is_penalized() {
        assert_eq!(both_ways("K L M N EH T", "N EH T R S Z D"), 0.25);
        assert_eq!(both_ways("S K EH T", "EH T S K"), 0.25);
    }

    #[test]
    fn test_consonant_only_tails_do_not_score() {
        assert_eq!(both_ways("K AE T S", "B AE T S"), 0.0);
        assert_eq!(both_ways("B R T S K", "D R T S K"), 0.0);
    }

    #[test]
    fn test_long_pronunciations_never_go_negative() {
        let score = both_ways(
            "S K R T P L M N B V C AH Z",
            "Q W R T P L M N B V C X AH Z",
        );
        assert!(score >= 0.0);
    }

    #[test]
    fn test_empty_pronunciation() {
        assert_eq!(score_pronunciations(&[], &phones("L AY T")), 0.0);
    }

    #[test]
    fn test_word_level_scoring() {
        let dict = CmuDictionary::parse(
            "LIGHT  L AY1 T\nNIGHT  N AY1 T\nHAPPY  HH AE1 P IY0\nSNAPPY  S N AE1 P IY0\n",
        )
        .unwrap();

        assert_eq!(score(&dict, "light", "night"), 1.0);
        assert_eq!(score(&dict, "night", "light"), 1.0);
        assert_eq!(score(&dict, "light", "light"), 0.0);
        assert_eq!(score(&dict, "happy", "snappy"), 1.0);
        assert_eq!(score(&dict, "light", "happy"), 0.0);
        assert_eq!(score(&dict, "missing", "light"), 0.0);
        assert_eq!(score(&dict, "light", "missing"), 0.0);
    }

    #[test]
    fn test_profile_keeps_every_pronunciation_without_stress() {
        let dict = CmuDictionary::parse("READ  R EH1 D\nREAD(2)  R IY1 D\n").unwrap();
        let profile = PhoneticProfile::lookup(&dict, "read");
        assert_eq!(profile.pronunciations.len(), 2);
        assert_eq!(profile.pronunciations[1], phones("R IY D"));
        assert!(profile.has_pronunciation());
        assert!(!PhoneticProfile::lookup(&dict, "absent").has_pronunciation());
    }
}
