//! 基于元音组的音节数估算。

use crate::oracle::SyllableOracle;

/// 不依赖词典的音节数估算器。
///
/// 统计连续元音组的数量，并对词尾不发音的 `e` 和 `-ed` 做修正。
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSyllables;

impl HeuristicSyllables {
    /// 创建一个新的估算器。
    pub fn new() -> Self {
        Self
    }
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

/// 估算一个单词的音节数。
///
/// 空字符串返回 0，其余单词至少为 1。
pub fn estimate_syllables(word: &str) -> u32 {
    if word.is_empty() {
        return 0;
    }

    let word = word.to_ascii_lowercase();
    let bytes = word.as_bytes();
    let mut syllables: u32 = 0;
    let mut previous_was_vowel = false;

    for &b in bytes {
        let vowel = is_vowel(b);
        if vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = vowel;
    }

    // 词尾不发音的 e，辅音 + le 结尾（如 table）除外
    if syllables > 1 && word.ends_with('e') {
        let consonant_le = word.ends_with("le")
            && bytes
                .len()
                .checked_sub(3)
                .and_then(|i| bytes.get(i))
                .is_some_and(|&b| !is_vowel(b));
        if !consonant_le {
            syllables -= 1;
        }
    }

    // -ed 结尾，前面是 t 或 d 时才单独成音节
    if syllables > 1 && word.ends_with("ed") {
        let before_ed = bytes.len().checked_sub(3).and_then(|i| bytes.get(i));
        if before_ed.is_some_and(|&b| !matches!(b, b't' | b'd')) {
            syllables -= 1;
        }
    }

    syllables.max(1)
}

impl SyllableOracle for HeuristicSyllables {
    fn estimate_syllables(&self, word: &str) -> u32 {
        estimate_syllables(word)
    }
}
