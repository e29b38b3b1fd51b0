//! 基于 CMU 发音词典的发音数据来源。
//!
//! 词典格式为每行一个条目：`WORD  PH1 PH2 PH3`，同一单词的其他读音写作
//! `WORD(2)`，以 `;;;` 开头的行为注释。

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{LyricEmpiricsError, Result};
use crate::oracle::{PhoneticOracle, SyllableOracle, syllables};

/// 内存中的 CMU 发音词典。
#[derive(Debug, Default, Clone)]
pub struct CmuDictionary {
    /// 小写单词 -> 全部读音（保留重音数字）。
    entries: HashMap<String, Vec<Vec<String>>>,
    /// 押韵部分（以空格连接）-> 拥有该押韵部分的单词。
    rhyme_index: HashMap<String, BTreeSet<String>>,
}

/// 返回一个读音的押韵部分：从最后一个带重音（1 或 2）的元音到结尾。
///
/// 没有带重音的元音时返回整个读音。
pub fn rhyming_part(phones: &[String]) -> &[String] {
    phones
        .iter()
        .rposition(|p| p.ends_with('1') || p.ends_with('2'))
        .map_or(phones, |index| &phones[index..])
}

/// 去掉词典条目名中表示多读音的 `(2)` 后缀。
fn strip_variant_marker(word: &str) -> &str {
    match word.rfind('(') {
        Some(index) if index > 0 && word.ends_with(')') => &word[..index],
        _ => word,
    }
}

impl CmuDictionary {
    /// 解析词典文本。
    ///
    /// # 返回
    /// 如果某一行只有单词没有音素，返回 `LyricEmpiricsError::Dictionary`。
    pub fn parse(content: &str) -> Result<Self> {
        let mut dictionary = Self::default();

        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(raw_word) = parts.next() else {
                continue;
            };
            let phones: Vec<String> = parts.map(str::to_string).collect();
            if phones.is_empty() {
                return Err(LyricEmpiricsError::Dictionary(format!(
                    "第 {} 行缺少音素: '{}'",
                    line_number + 1,
                    line
                )));
            }

            dictionary.insert(&strip_variant_marker(raw_word).to_lowercase(), phones);
        }

        debug!(
            "[CmuDictionary] 解析完成，共 {} 个单词",
            dictionary.entries.len()
        );
        Ok(dictionary)
    }

    /// 从文件加载词典。
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let dictionary = Self::parse(&content)?;
        info!(
            "[CmuDictionary] 已从 {:?} 加载 {} 个单词",
            path,
            dictionary.len()
        );
        Ok(dictionary)
    }

    /// 添加一个读音。
    pub fn insert(&mut self, word: &str, phones: Vec<String>) {
        let key = rhyming_part(&phones).join(" ");
        self.rhyme_index
            .entry(key)
            .or_default()
            .insert(word.to_string());
        self.entries.entry(word.to_string()).or_default().push(phones);
    }

    /// 词典中的单词数量。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 词典是否为空。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 词典是否收录了该单词（不区分大小写）。
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }

    fn lookup(&self, word: &str) -> Option<&Vec<Vec<String>>> {
        self.entries.get(&word.to_lowercase())
    }
}

impl PhoneticOracle for CmuDictionary {
    /// 与该单词任一读音的押韵部分相同的所有其他单词。
    fn perfect_rhymes(&self, word: &str) -> HashSet<String> {
        let key = word.to_lowercase();
        let Some(pronunciations) = self.entries.get(&key) else {
            return HashSet::new();
        };

        pronunciations
            .iter()
            .filter_map(|phones| self.rhyme_index.get(&rhyming_part(phones).join(" ")))
            .flatten()
            .filter(|candidate| **candidate != key)
            .cloned()
            .collect()
    }

    fn pronunciations(&self, word: &str) -> Vec<Vec<String>> {
        self.lookup(word).cloned().unwrap_or_default()
    }
}

impl SyllableOracle for CmuDictionary {
    /// 统计第一个读音中的元音音素（带重音数字的音素）数量，
    /// 未收录的单词退回到启发式估算。
    fn estimate_syllables(&self, word: &str) -> u32 {
        match self.lookup(word).and_then(|p| p.first()) {
            Some(phones) => phones
                .iter()
                .filter(|p| p.ends_with(|c: char| c.is_ascii_digit()))
                .count() as u32,
            None => syllables::estimate_syllables(word),
        }
    }
}
